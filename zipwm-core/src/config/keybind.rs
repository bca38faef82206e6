use crate::utils::modmask_lookup::Button;
use crate::Command;
use serde::{Deserialize, Serialize};

/// A key chord bound to a command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub command: Command,
    pub modifier: Vec<String>,
    pub key: String,
}

/// A mouse chord bound to a command, matched on managed windows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Mousebind {
    pub command: Command,
    pub modifier: Vec<String>,
    pub button: Button,
}
