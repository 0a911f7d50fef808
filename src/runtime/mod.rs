// Runtime module - the interactive practice loop
//
// Architecture:
// - PracticeSession: classifier + movement analyzer + beat-sync animator for
//   one frame at a time
// - Tracker: pulls captures, applies controls, writes the tracking log and
//   paces the loop
// - controls / feedback / pacer: the loop's side channels

pub mod controls;
pub mod feedback;
pub mod pacer;
pub mod session;
pub mod tracker;

pub use controls::{Control, ControlInput, NoControls, StdinControls};
pub use feedback::{FeedbackSink, LogAnnouncer, PhraseRateLimiter};
pub use pacer::FramePacer;
pub use session::{FrameReport, PracticeSession};
pub use tracker::{SessionClock, Tracker, TrackerSummary};
