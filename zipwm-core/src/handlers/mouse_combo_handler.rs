use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{Manager, Mode, WindowId};
use crate::utils::modmask_lookup::{ignored_mask, into_modmask, Button, ModMask};
use crate::Command;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// A grabbed button was pressed on a window. Bound chords run their
    /// command; a plain click on a managed window focuses it.
    pub fn mouse_combo_handler(
        &mut self,
        mask: ModMask,
        button: Button,
        window: WindowId,
        x: i32,
        y: i32,
    ) -> bool {
        let mask = mask.difference(ignored_mask());
        let binding = self
            .config
            .mousebinds()
            .into_iter()
            .find(|mb| mb.button == button && into_modmask(&mb.modifier) == mask);

        match binding {
            Some(binding) => match binding.command {
                Command::MoveWindow => self.begin_drag(window, x, y, false),
                Command::ResizeWindow => self.begin_drag(window, x, y, true),
                command => {
                    self.call_sandboxed("mouse binding", |manager| {
                        manager.command_handler(&command)
                    })
                }
            },
            None => {
                if self.state.windowset.contains(window)
                    && self.state.windowset.peek() != Some(window)
                {
                    self.state.windowset.focus_window(window);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Install a drag on the clicked window. A tiled window starts floating
    /// at its current footprint first; each following motion event steps the
    /// drag until the button is released.
    fn begin_drag(&mut self, window: WindowId, x: i32, y: i32, resize: bool) -> bool {
        if !self.state.windowset.contains(window) {
            return false;
        }
        let Some(start) = self.state.floating_fraction(window) else {
            return false;
        };
        if self.state.windowset.float(window, start).is_err() {
            return false;
        }
        self.state.windowset.focus_window(window);
        self.state.mode = if resize {
            Mode::Resizing {
                window,
                start,
                origin: (x, y),
            }
        } else {
            Mode::Moving {
                window,
                start,
                origin: (x, y),
            }
        };
        true
    }

    /// Step the in-flight drag, if any. Motion outside a drag is ignored.
    pub fn motion_handler(&mut self, x: i32, y: i32) -> bool {
        let (window, start, origin, resize) = match self.state.mode {
            Mode::Moving {
                window,
                start,
                origin,
            } => (window, start, origin, false),
            Mode::Resizing {
                window,
                start,
                origin,
            } => (window, start, origin, true),
            Mode::Normal => return false,
        };

        let Some(screen) = self
            .state
            .windowset
            .screens()
            .find(|s| s.workspace.contains(window))
        else {
            return false;
        };
        let rect = screen.detail.rect;
        let dx = f64::from(x - origin.0) / f64::from(rect.w.max(1));
        let dy = f64::from(y - origin.1) / f64::from(rect.h.max(1));

        let fraction = if resize {
            start.resized(dx, dy)
        } else {
            start.shifted(dx, dy)
        };
        self.state.windowset.floating.insert(window, fraction);
        true
    }

    /// Tear the drag down.
    pub fn button_release_handler(&mut self) -> bool {
        if self.state.mode.is_normal() {
            return false;
        }
        self.state.mode = Mode::Normal;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::config::{ManageQuery, Mousebind};
    use crate::display_servers::MockDisplayServer;
    use crate::models::Rect;
    use crate::DisplayEvent;

    type TestManager = Manager<TestConfig, MockDisplayServer>;

    fn drag_config() -> TestConfig {
        TestConfig {
            mousebinds: vec![
                Mousebind {
                    command: Command::MoveWindow,
                    modifier: vec!["Mod4".to_string()],
                    button: Button::Main,
                },
                Mousebind {
                    command: Command::ResizeWindow,
                    modifier: vec!["Mod4".to_string()],
                    button: Button::Secondary,
                },
            ],
            ..TestConfig::default()
        }
    }

    fn manager_with_one_window() -> TestManager {
        let mut manager = TestManager::new(drag_config()).unwrap();
        manager.window_created_handler(WindowId(1), &ManageQuery::default());
        manager.state.refresh();
        manager.state.actions.clear();
        manager
    }

    #[test]
    fn a_move_drag_floats_the_window_and_follows_the_pointer() {
        let mut manager = manager_with_one_window();

        let started = manager.mouse_combo_handler(
            ModMask::Super,
            Button::Main,
            WindowId(1),
            100,
            100,
        );
        assert!(started);
        assert!(manager.state.windowset.is_floating(WindowId(1)));
        assert!(!manager.state.mode.is_normal());

        // Drag 192 pixels right on a 1920 wide screen: a tenth of the width.
        manager.motion_handler(292, 100);
        manager.state.refresh();
        let rect = manager.state.known_geometry[&WindowId(1)];
        assert_eq!(rect, Rect::new(192, 0, 1920, 1080));

        manager.button_release_handler();
        assert!(manager.state.mode.is_normal());
    }

    #[test]
    fn a_resize_drag_grows_the_window() {
        let mut manager = manager_with_one_window();
        manager.command_handler(&Command::ToggleFloating);
        let before = manager.state.windowset.floating[&WindowId(1)];

        manager.mouse_combo_handler(ModMask::Super, Button::Secondary, WindowId(1), 0, 0);
        manager.motion_handler(-192, -108);

        let after = manager.state.windowset.floating[&WindowId(1)];
        assert!((after.w - (before.w - 0.1)).abs() < 1e-6);
        assert!((after.h - (before.h - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn motion_without_a_drag_is_ignored() {
        let mut manager = manager_with_one_window();
        assert!(!manager.motion_handler(10, 10));
        assert!(!manager.display_event_handler(DisplayEvent::ButtonRelease));
    }

    #[test]
    fn lock_modifiers_do_not_break_the_chord() {
        let mut manager = manager_with_one_window();
        let mask = ModMask::Super | ModMask::NumLock | ModMask::Lock;
        assert!(manager.mouse_combo_handler(mask, Button::Main, WindowId(1), 0, 0));
        assert!(!manager.state.mode.is_normal());
    }

    #[test]
    fn an_unbound_click_focuses_the_window() {
        let mut manager = TestManager::new(drag_config()).unwrap();
        for raw in [1, 2] {
            manager.window_created_handler(WindowId(raw), &ManageQuery::default());
        }
        assert_eq!(manager.state.windowset.peek(), Some(WindowId(2)));

        let changed =
            manager.mouse_combo_handler(ModMask::Zero, Button::Main, WindowId(1), 0, 0);
        assert!(changed);
        assert_eq!(manager.state.windowset.peek(), Some(WindowId(1)));
    }
}
