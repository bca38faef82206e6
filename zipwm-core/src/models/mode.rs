use super::{RationalRect, WindowId};
use serde::{Deserialize, Serialize};

/// What the pointer is currently doing to a window. A drag is installed by a
/// mouse binding, stepped by motion events and torn down on button release.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Moving {
        window: WindowId,
        start: RationalRect,
        origin: (i32, i32),
    },
    Resizing {
        window: WindowId,
        start: RationalRect,
        origin: (i32, i32),
    },
}

impl Mode {
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
