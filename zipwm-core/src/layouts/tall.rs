use super::{Layout, Message};
use crate::models::{Rect, Stack, WindowId};

/// The classic master/stack split. The first `nmaster` windows share a left
/// pane of width `⌊w · ratio⌋`, the rest share the right pane; both panes
/// are divided into equal rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Tall {
    pub nmaster: u32,
    pub delta: f64,
    pub ratio: f64,
}

impl Tall {
    #[must_use]
    pub const fn new(nmaster: u32, delta: f64, ratio: f64) -> Self {
        Self {
            nmaster,
            delta,
            ratio,
        }
    }
}

impl Default for Tall {
    fn default() -> Self {
        Self::new(1, 0.03, 0.5)
    }
}

impl Layout for Tall {
    fn description(&self) -> String {
        "Tall".to_string()
    }

    fn layout(&mut self, rect: Rect, stack: &Stack<WindowId>) -> Vec<(WindowId, Rect)> {
        let windows: Vec<WindowId> = stack.iter().copied().collect();
        let nmaster = self.nmaster as usize;

        if windows.len() <= nmaster {
            // Everything fits in the master pane: one full-width column.
            return windows
                .iter()
                .copied()
                .zip(split_vertically(rect, windows.len()))
                .collect();
        }

        let master_width = (f64::from(rect.w) * self.ratio).floor() as u32;
        let master_pane = Rect::new(rect.x, rect.y, master_width, rect.h);
        let stack_pane = Rect::new(
            rect.x + master_width as i32,
            rect.y,
            rect.w - master_width,
            rect.h,
        );

        let rows = split_vertically(master_pane, nmaster)
            .into_iter()
            .chain(split_vertically(stack_pane, windows.len() - nmaster));
        windows.into_iter().zip(rows).collect()
    }

    fn handle_message(&mut self, message: &Message) -> bool {
        match message {
            Message::Shrink => {
                self.ratio = (self.ratio - self.delta).max(self.delta);
                true
            }
            Message::Expand => {
                self.ratio = (self.ratio + self.delta).min(1.0 - self.delta);
                true
            }
            Message::IncMasterN(delta) => {
                self.nmaster = (i64::from(self.nmaster) + i64::from(*delta)).max(1) as u32;
                true
            }
            _ => false,
        }
    }

    fn encode(&self) -> String {
        format!("Tall {} {} {}", self.nmaster, self.delta, self.ratio)
    }

    fn boxed_clone(&self) -> Box<dyn Layout> {
        Box::new(self.clone())
    }
}

/// Divide a rectangle into `count` rows of equal height, spreading any
/// remainder one pixel at a time over the topmost rows.
fn split_vertically(rect: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let base = rect.h / count as u32;
    let remainder = rect.h as usize % count;

    let mut rows = Vec::with_capacity(count);
    let mut y = rect.y;
    for i in 0..count {
        let h = base + u32::from(i < remainder);
        rows.push(Rect::new(rect.x, y, rect.w, h));
        y += h as i32;
    }
    rows
}
