use super::{Button, ModMask};
use crate::config::ManageQuery;
use crate::models::{ScreenDetail, WindowId};

/// Events translated from the X server, in the vocabulary of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    /// A client asked to be mapped; carries what the backend knows about it.
    MapRequest(WindowId, ManageQuery),
    /// A window was unmapped. `send_event` is set for synthetic events.
    UnmapNotify(WindowId, bool),
    WindowDestroy(WindowId),
    /// A client asked for a new geometry or stacking position.
    ConfigureRequest(ConfigureRequest),
    /// The root geometry changed; carries the re-queried screen list.
    ScreensChanged(Vec<ScreenDetail>),
    /// The pointer entered a window (mode `Normal` only).
    EnterNotify(WindowId),
    KeyCombo(ModMask, u32),
    MouseCombo(ModMask, Button, WindowId, i32, i32),
    Motion(i32, i32),
    ButtonRelease,
    /// A `WM_PROTOCOLS` client message; routed to the layout.
    ClientMessage(WindowId, u32),
}

/// The raw content of a `ConfigureRequest` so it can be forwarded verbatim
/// for windows we do not tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub window: WindowId,
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
    pub border_width: u32,
    pub sibling: Option<WindowId>,
    pub stack_mode: u8,
    pub value_mask: u16,
}
