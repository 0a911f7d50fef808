//! Dance style tables.
//!
//! Two separate taxonomies exist and are deliberately kept apart:
//!
//! - [`AnalysisStyle`] drives movement-energy thresholds and scoring.
//! - [`InstructionStyle`] drives pose instructions, the stick-figure
//!   animation cycle and the default song for beat extraction.
//!
//! A practice session carries one active style of each kind.

pub mod instruction;
pub mod profile;

pub use instruction::{AnimationFrame, Expression, InstructionStyle};
pub use profile::{AnalysisStyle, StyleProfile};
