// Render module - stick-figure instruction drawing

pub mod stickman;

pub use stickman::{Point, StickFigure, CANVAS_SIZE};
