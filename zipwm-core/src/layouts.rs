//! The layout capability interface and the built-in layouts.
//!
//! A layout is a strategy object owned by a workspace. It maps the
//! workspace's stack and a screen rectangle to per-window rectangles in
//! stacking order, and may update itself in response to [`Message`]s. Every
//! layout round-trips through a textual encoding so that the whole
//! arrangement survives a restart.
mod choose;
mod full;
mod mirror;
mod tall;

pub use choose::Choose;
pub use full::Full;
pub use mirror::Mirror;
pub use tall::Tall;

use crate::display_event::DisplayEvent;
use crate::errors::{Result, ZipwmError};
use crate::models::{Rect, Stack, WindowId};
use std::fmt;

/// Messages a layout may react to. Layouts match on the variants they
/// understand and ignore the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The workspace is no longer visible; release visual resources.
    Hide,
    /// The manager is shutting down or restarting.
    ReleaseResources,
    /// Change the number of windows in the master area.
    IncMasterN(i32),
    /// Shrink the master area.
    Shrink,
    /// Grow the master area.
    Expand,
    /// Cycle to the next layout variant.
    NextLayout,
    /// Jump back to the first layout variant.
    FirstLayout,
    /// A raw event from the display server.
    Event(DisplayEvent),
    /// Escape hatch for user extension messages: a type identifier plus an
    /// opaque payload.
    Custom { kind: String, payload: String },
}

/// The capability interface every layout implements.
pub trait Layout: fmt::Debug {
    /// Human-readable name identifying the layout in use.
    fn description(&self) -> String;

    /// Tile the given stack into `rect`. The returned rectangles are in
    /// desired stacking order, bottom first. Windows left out stay hidden.
    fn layout(&mut self, rect: Rect, stack: &Stack<WindowId>) -> Vec<(WindowId, Rect)>;

    /// React to a message. Returning `false` means the message was not
    /// handled and no refresh is needed.
    fn handle_message(&mut self, message: &Message) -> bool {
        let _ = message;
        false
    }

    /// A textual form that [`decode`] parses back into an equal layout.
    fn encode(&self) -> String;

    fn boxed_clone(&self) -> Box<dyn Layout>;
}

impl Clone for Box<dyn Layout> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Parse the textual form produced by [`Layout::encode`].
///
/// # Errors
///
/// Fails when the input names no known layout or its parameters do not
/// parse.
pub fn decode(input: &str) -> Result<Box<dyn Layout>> {
    let parts = split_top_level(input.trim())
        .ok_or_else(|| ZipwmError::LayoutDecode(input.to_string()))?;
    let bad = || ZipwmError::LayoutDecode(input.to_string());

    match parts.as_slice() {
        ["Full"] => Ok(Box::new(Full)),
        ["Tall", nmaster, delta, ratio] => {
            let nmaster = nmaster.parse().map_err(|_| bad())?;
            let delta = delta.parse().map_err(|_| bad())?;
            let ratio = ratio.parse().map_err(|_| bad())?;
            Ok(Box::new(Tall::new(nmaster, delta, ratio)))
        }
        ["Mirror", inner] => Ok(Box::new(Mirror::new(decode(strip_parens(inner))?))),
        ["Choose", active, left, right] => {
            let active: usize = active.parse().map_err(|_| bad())?;
            if active > 1 {
                return Err(bad());
            }
            let mut choose = Choose::new(
                decode(strip_parens(left))?,
                decode(strip_parens(right))?,
            );
            if active == 1 {
                choose.set_active(1);
            }
            Ok(Box::new(choose))
        }
        _ => Err(bad()),
    }
}

/// Split into top-level tokens, keeping parenthesised groups intact.
/// Returns `None` on unbalanced parentheses.
fn split_top_level(input: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => {
                if depth == 0 && start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    parts.push(&input[start?..=i]);
                    start = None;
                }
            }
            c if c.is_whitespace() => {
                if depth == 0 {
                    if let Some(s) = start.take() {
                        parts.push(&input[s..i]);
                    }
                }
            }
            _ => {
                if depth == 0 && start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if depth != 0 {
        return None;
    }
    if let Some(s) = start {
        parts.push(&input[s..]);
    }
    Some(parts)
}

fn strip_parens(token: &str) -> &str {
    token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(token)
}


#[cfg(test)]
mod quickcheck_tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn arbitrary_tall_parameters_roundtrip(nmaster: u32, delta: f64, ratio: f64) -> bool {
        let layout = Tall::new(nmaster.max(1), delta, ratio);
        let decoded = decode(&layout.encode()).expect("tall layouts decode");
        decoded.encode() == layout.encode()
    }
}
