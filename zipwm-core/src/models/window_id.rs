use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a client window, supplied by the X server.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<u32> for WindowId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<WindowId> for u32 {
    fn from(id: WindowId) -> Self {
        id.0
    }
}
