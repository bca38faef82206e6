use crate::display_event::ConfigureRequest;
use crate::models::{Rect, WindowId};

/// These are responses from the window manager. The display server should
/// act on these actions.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayAction {
    /// Place a window at its computed geometry.
    MoveResizeWindow(WindowId, Rect),

    /// Make a window viewable.
    MapWindow(WindowId),

    /// Hide a window without unmanaging it.
    UnmapWindow(WindowId),

    /// Give a window the input focus, or focus the root when `None`.
    FocusWindow(Option<WindowId>),

    /// Stack the given windows in order, lowest first.
    Restack(Vec<WindowId>),

    /// Repaint a window's border: focused or normal color.
    SetWindowBorder(WindowId, bool),

    /// Answer a configure request of a tiled window by re-sending its
    /// current geometry.
    ReplyConfigure(WindowId, Rect),

    /// Pass a configure request of an unmanaged or floating window through
    /// to the server untouched.
    ForwardConfigure(ConfigureRequest),

    /// Nicely ask a window to close if it speaks `WM_DELETE_WINDOW`,
    /// otherwise kill the client.
    KillWindow(WindowId),
}
