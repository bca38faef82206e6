use serde::{Deserialize, Serialize};

/// User-facing operations, bound to keys and mouse buttons by the config.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    FocusUp,
    FocusDown,
    SwapUp,
    SwapDown,
    SwapMaster,
    /// Bring a workspace to the current screen, swapping screens if it is
    /// visible elsewhere.
    View(String),
    /// Focus the screen showing the workspace instead of stealing it.
    GreedyView(String),
    /// Move the focused window to the given workspace.
    ShiftTo(String),
    ToggleFloating,
    IncMaster(i32),
    ShrinkMaster,
    ExpandMaster,
    NextLayout,
    FirstLayout,
    CloseWindow,
    /// Start a pointer drag moving the clicked window (mouse bindings only).
    MoveWindow,
    /// Start a pointer drag resizing the clicked window (mouse bindings only).
    ResizeWindow,
    Spawn(String),
    Restart {
        resume: bool,
    },
    Exit,
}
