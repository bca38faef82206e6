use super::{Config, DisplayAction, DisplayEvent, DisplayServer};
use crate::models::{Gutter, Rect, ScreenDetail};

/// An in-memory display server recording every action the reducer issues.
#[derive(Clone)]
pub struct MockDisplayServer {
    pub screens: Vec<ScreenDetail>,
    pub actions: Vec<DisplayAction>,
}

impl DisplayServer for MockDisplayServer {
    fn new(_: &impl Config) -> Self {
        Self {
            screens: vec![ScreenDetail::new(
                Rect::new(0, 0, 1920, 1080),
                Gutter::default(),
            )],
            actions: vec![],
        }
    }

    fn screens(&self) -> Vec<ScreenDetail> {
        self.screens.clone()
    }

    fn next_events(&mut self) -> Vec<DisplayEvent> {
        vec![]
    }

    fn execute_action(&mut self, act: DisplayAction) -> Option<DisplayEvent> {
        self.actions.push(act);
        None
    }
}
