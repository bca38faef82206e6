use super::{Layout, Message};
use crate::models::{Rect, Stack, WindowId};

/// Two layouts and a switch saying which one is live. `NextLayout` toggles
/// between them, sending `Hide` to the side being switched away from.
#[derive(Debug, Clone)]
pub struct Choose {
    active: usize,
    left: Box<dyn Layout>,
    right: Box<dyn Layout>,
}

impl Choose {
    #[must_use]
    pub fn new(left: Box<dyn Layout>, right: Box<dyn Layout>) -> Self {
        Self {
            active: 0,
            left,
            right,
        }
    }

    pub(crate) fn set_active(&mut self, active: usize) {
        self.active = active.min(1);
    }

    fn active_mut(&mut self) -> &mut Box<dyn Layout> {
        if self.active == 0 {
            &mut self.left
        } else {
            &mut self.right
        }
    }

    fn active_ref(&self) -> &dyn Layout {
        if self.active == 0 {
            self.left.as_ref()
        } else {
            self.right.as_ref()
        }
    }

    fn switch_to(&mut self, active: usize) {
        self.active_mut().handle_message(&Message::Hide);
        self.active = active;
    }
}

impl Layout for Choose {
    fn description(&self) -> String {
        self.active_ref().description()
    }

    fn layout(&mut self, rect: Rect, stack: &Stack<WindowId>) -> Vec<(WindowId, Rect)> {
        self.active_mut().layout(rect, stack)
    }

    fn handle_message(&mut self, message: &Message) -> bool {
        match message {
            Message::NextLayout => {
                self.switch_to(1 - self.active);
                true
            }
            Message::FirstLayout => {
                if self.active == 0 {
                    false
                } else {
                    self.switch_to(0);
                    true
                }
            }
            Message::Hide | Message::ReleaseResources => {
                let left = self.left.handle_message(message);
                let right = self.right.handle_message(message);
                left || right
            }
            other => self.active_mut().handle_message(other),
        }
    }

    fn encode(&self) -> String {
        format!(
            "Choose {} ({}) ({})",
            self.active,
            self.left.encode(),
            self.right.encode()
        )
    }

    fn boxed_clone(&self) -> Box<dyn Layout> {
        Box::new(self.clone())
    }
}
