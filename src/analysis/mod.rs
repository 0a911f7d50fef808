// Analysis module - movement energy, move counting and session metrics
//
// Architecture:
// - MovementHistory: bounded ring of per-frame energy samples
// - AnalyzerSession: owns the history, the move counter and the previous
//   frame; turns each new frame into an energy sample and a move decision
// - SessionMetrics: rate and score figures derived from an analyzer snapshot

pub mod history;
pub mod metrics;
pub mod session;

pub use history::MovementHistory;
pub use metrics::SessionMetrics;
pub use session::{movement_energy, AnalyzerSession, MoveDetection};
