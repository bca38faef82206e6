use super::{Stack, WindowId, WorkspaceTag};
use crate::layouts::{Layout, Message};
use std::mem::take;

/// A named virtual desktop holding a focus stack and the layout that tiles it.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub tag: WorkspaceTag,
    pub layout: Box<dyn Layout>,
    pub stack: Option<Stack<WindowId>>,
}

impl Workspace {
    pub fn new(
        tag: impl Into<WorkspaceTag>,
        layout: Box<dyn Layout>,
        stack: Option<Stack<WindowId>>,
    ) -> Self {
        Self {
            tag: tag.into(),
            layout,
            stack,
        }
    }

    pub fn len(&self) -> usize {
        self.stack.as_ref().map_or(0, Stack::len)
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.stack.as_ref().is_some_and(|s| s.contains(&window))
    }

    /// The focused window, if any.
    pub fn peek(&self) -> Option<WindowId> {
        self.stack.as_ref().map(|s| s.focus)
    }

    /// All windows in display order.
    pub fn windows(&self) -> Vec<WindowId> {
        self.stack
            .as_ref()
            .map_or_else(Vec::new, |s| s.iter().copied().collect())
    }

    /// Apply a function to the stack if the workspace is occupied.
    pub fn map<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Stack<WindowId>),
    {
        if let Some(stack) = self.stack.as_mut() {
            f(stack);
        }
    }

    /// Replace the stack with the result of a function over its current
    /// value, allowing the workspace to become empty or occupied.
    pub fn modify<F>(&mut self, f: F)
    where
        F: FnOnce(Option<Stack<WindowId>>) -> Option<Stack<WindowId>>,
    {
        self.stack = f(take(&mut self.stack));
    }

    /// Insert a window directly before the focus, making it the new focus.
    pub fn insert_up(&mut self, window: WindowId) {
        self.modify(|stack| match stack {
            Some(mut s) => {
                s.insert_up(window);
                Some(s)
            }
            None => Some(Stack::from_element(window)),
        });
    }

    /// Remove a window from the workspace, returning whether it was present.
    pub fn remove(&mut self, window: WindowId) -> bool {
        let mut removed = false;
        self.modify(|stack| {
            stack.and_then(|s| {
                if s.contains(&window) {
                    removed = true;
                }
                s.filter(|&w| w != window)
            })
        });
        removed
    }

    /// Deliver a message to this workspace's layout. Returns true when the
    /// layout handled it and a refresh is needed.
    pub fn send_layout_message(&mut self, message: &Message) -> bool {
        self.layout.handle_message(message)
    }
}

impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.stack == other.stack
            && self.layout.encode() == other.layout.encode()
    }
}
