//! Error types for the dispatch engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and simulation execution.

/// Top-level error for the dispatch engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wildgrove_core::config::ConfigError,
    },

    /// Simulation clock failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: wildgrove_core::clock::ClockError,
    },

    /// Entity store or registry operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: wildgrove_world::WorldError,
    },
}
