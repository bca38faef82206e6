use super::{Gutter, Rect, ScreenId, WindowId, Workspace};
use serde::{Deserialize, Serialize};

/// Geometry of a physical monitor plus the space reserved at its edges.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDetail {
    pub rect: Rect,
    pub gutter: Gutter,
}

impl ScreenDetail {
    #[must_use]
    pub const fn new(rect: Rect, gutter: Gutter) -> Self {
        Self { rect, gutter }
    }

    /// The drawable area: the screen rectangle shrunk by the gutter.
    #[must_use]
    pub fn effective_rect(&self) -> Rect {
        self.rect.shrink_by(&self.gutter)
    }
}

impl Default for ScreenDetail {
    fn default() -> Self {
        Self {
            rect: Rect::new(0, 0, 800, 600),
            gutter: Gutter::default(),
        }
    }
}

/// A physical monitor currently displaying exactly one workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub workspace: Workspace,
    pub id: ScreenId,
    pub detail: ScreenDetail,
}

impl Screen {
    pub fn new(workspace: Workspace, id: ScreenId, detail: ScreenDetail) -> Self {
        Self {
            workspace,
            id,
            detail,
        }
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.workspace.contains(window)
    }
}
