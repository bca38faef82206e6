//! Objects (such as the workspace zipper) used to develop zipwm.
mod geometry;
mod manager;
mod mode;
mod screen;
mod stack;
mod window_id;
mod window_set;
mod workspace;

pub use geometry::Gutter;
pub use geometry::RationalRect;
pub use geometry::Rect;
pub use manager::Manager;
pub use mode::Mode;
pub use screen::{Screen, ScreenDetail};
pub use stack::Stack;
pub use window_id::WindowId;
pub use window_set::WindowSet;
pub use workspace::Workspace;

pub type ScreenId = usize;
pub type WorkspaceTag = String;
