//! Glitchwatch — terminal host error types.

use glitchwatch_content::application::loader::ConfigError;
use thiserror::Error;

/// Startup and runtime errors for the terminal host.
#[derive(Debug, Error)]
pub enum CliError {
    /// The game configuration could not be loaded.
    #[error("game configuration error: {0}")]
    Load(#[from] ConfigError),

    /// Reading stdin failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
