//! Error handling and reporting for this backend.
use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};

pub(crate) type Result<T> = std::result::Result<T, BackendError>;

/// An error originating from this backend.
#[derive(Debug, Error)]
pub(crate) enum BackendError {
    #[error("could not connect to the X server: {0}")]
    Connect(#[from] ConnectError),
    #[error("error in the connection to the X server: {0}")]
    Connection(#[from] ConnectionError),
    #[error("the X server rejected a request: {0}")]
    Reply(#[from] ReplyError),
    #[error("the X server rejected a request: {0}")]
    ReplyOrId(#[from] ReplyOrIdError),
    #[error("unable to parse a text property: {0}")]
    StringConversion(#[from] std::string::FromUtf8Error),
    #[error("invalid color specification {0:?}")]
    InvalidColor(String),
}
