use x11rb::atom_manager;

atom_manager! {
    /// The atoms the core protocol obligations rely on.
    pub AtomCollection:

    /// A handle to a response from the X11 server.
    AtomCollectionCookie {
        WMProtocols: b"WM_PROTOCOLS" as &[u8],
        WMDelete: b"WM_DELETE_WINDOW",
        WMState: b"WM_STATE",
    }
}

/// Possible values of the `state` field of `WM_STATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmWindowState {
    Withdrawn,
    Normal,
    Iconic,
}

impl From<WmWindowState> for u32 {
    fn from(value: WmWindowState) -> Self {
        match value {
            WmWindowState::Withdrawn => 0,
            WmWindowState::Normal => 1,
            WmWindowState::Iconic => 3,
        }
    }
}
