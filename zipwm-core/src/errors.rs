use crate::models::WindowId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZipwmError>;

#[derive(Debug, Error)]
pub enum ZipwmError {
    #[error("Parsing error: {0}")]
    SerdeParse(#[from] serde_json::error::Error),
    #[error("No screens attached")]
    NoScreens,
    #[error("{n_ws} workspaces configured but {n_screens} screens attached")]
    InsufficientWorkspaces { n_ws: usize, n_screens: usize },
    #[error("Unknown client {0}")]
    UnknownClient(WindowId),
    #[error("Workspace tag {0:?} is used twice")]
    DuplicateTag(String),
    #[error("Could not decode layout from {0:?}")]
    LayoutDecode(String),
    #[error("Error while running program: {0}")]
    SpawnProc(String),
}
