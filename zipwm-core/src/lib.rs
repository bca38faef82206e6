//! Core window management logic for zipwm.
// We deny clippy pedantic lints, primarily to keep code as correct as possible
// Remember, the goal of zipwm is to do one thing and to do that one thing
// well: arrange windows.
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access,
    clippy::module_name_repetitions
)]
mod command;
pub mod config;
mod display_action;
mod display_event;
pub mod display_servers;
pub mod errors;
mod event_loop;
mod handlers;
pub mod layouts;
pub mod models;
pub mod state;
pub mod utils;

use utils::modmask_lookup::Button;
use utils::modmask_lookup::ModMask;

pub use command::Command;
pub use config::{Config, ManageQuery, ManageTransform};
pub use display_action::DisplayAction;
pub use display_event::{ConfigureRequest, DisplayEvent};
pub use display_servers::DisplayServer;
pub use event_loop::ExitAction;
pub use layouts::{Layout, Message};
pub use models::Manager;
pub use models::Mode;
pub use models::{Rect, Screen, Stack, WindowId, WindowSet, Workspace};
pub use state::State;
pub use utils::child_process;
