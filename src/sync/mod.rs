// Sync module - aligning the stick-figure animation with precomputed beats

pub mod animator;

pub use animator::BeatSyncAnimator;
