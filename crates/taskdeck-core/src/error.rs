use thiserror::Error;

/// Errors from the auth, config, and IO edges. Board operations never
/// produce errors; unknown ids there are silent no-ops.
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
