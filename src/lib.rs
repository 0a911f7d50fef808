// Dance Trainer Core
// Per-frame pose instruction, beat-synchronised animation and movement scoring

// Module declarations
pub mod analysis;
pub mod audio;
pub mod beat;
pub mod config;
pub mod error;
pub mod io;
pub mod pose;
pub mod render;
pub mod runtime;
pub mod styles;
pub mod sync;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, honouring `RUST_LOG` (default `info`)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
