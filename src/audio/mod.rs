// Audio module - WAV decoding and background music playback

pub mod player;
pub mod wav;

pub use player::{MusicPlayer, PlaybackHandle};
pub use wav::{read_wav, resample_linear, DecodedAudio};
