use super::{Layout, Message};
use crate::models::{Rect, Stack, WindowId};

/// Run the inner layout against the transposed rectangle and transpose the
/// results back, turning a horizontal split into a vertical one.
#[derive(Debug, Clone)]
pub struct Mirror {
    inner: Box<dyn Layout>,
}

impl Mirror {
    #[must_use]
    pub fn new(inner: Box<dyn Layout>) -> Self {
        Self { inner }
    }
}

impl Layout for Mirror {
    fn description(&self) -> String {
        format!("Mirror {}", self.inner.description())
    }

    fn layout(&mut self, rect: Rect, stack: &Stack<WindowId>) -> Vec<(WindowId, Rect)> {
        self.inner
            .layout(rect.transposed(), stack)
            .into_iter()
            .map(|(window, r)| (window, r.transposed()))
            .collect()
    }

    fn handle_message(&mut self, message: &Message) -> bool {
        self.inner.handle_message(message)
    }

    fn encode(&self) -> String {
        format!("Mirror ({})", self.inner.encode())
    }

    fn boxed_clone(&self) -> Box<dyn Layout> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Tall;
    use super::*;
    use crate::stack;

    #[test]
    fn mirrored_tall_stacks_the_master_on_top() {
        let mut mirror = Mirror::new(Box::new(Tall::default()));
        let stack = stack!(WindowId(1), [WindowId(2), WindowId(3)]);

        let rects = mirror.layout(Rect::new(0, 0, 1920, 1080), &stack);

        assert_eq!(
            rects,
            vec![
                (WindowId(1), Rect::new(0, 0, 1920, 540)),
                (WindowId(2), Rect::new(0, 540, 960, 540)),
                (WindowId(3), Rect::new(960, 540, 960, 540)),
            ]
        );
    }

    #[test]
    fn messages_pass_through_to_the_inner_layout() {
        let mut mirror = Mirror::new(Box::new(Tall::default()));
        assert!(mirror.handle_message(&Message::Shrink));
        assert!(!mirror.handle_message(&Message::NextLayout));
    }
}
