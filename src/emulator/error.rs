use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from getting a program into the emulator.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read source {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
