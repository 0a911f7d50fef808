// Beat module - offline tempo and beat extraction, beat record persistence
//
// Architecture:
// - OnsetEnvelope: spectral flux onset strength (rustfft, Hann window)
// - tempo: weighted autocorrelation tempo estimate with a log-BPM prior
// - BeatTracker: dynamic-programming beat placement at the estimated period
// - BeatExtractor: decode -> resample -> envelope -> tempo -> beats
// - BeatRecord: JSON hand-off between `analyze-beats` and the tracker

pub mod extractor;
pub mod onset;
pub mod record;
pub mod tempo;
pub mod tracker;

pub use extractor::{BeatAnalysis, BeatExtractor};
pub use onset::OnsetEnvelope;
pub use record::BeatRecord;
pub use tempo::estimate_tempo;
pub use tracker::BeatTracker;

#[cfg(test)]
mod tests;
