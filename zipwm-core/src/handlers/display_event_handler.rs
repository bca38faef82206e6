use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::layouts::Message;
use crate::models::{Manager, ScreenDetail, WindowId};
use crate::utils::modmask_lookup::{ignored_mask, into_modmask, ModMask};
use crate::utils::xkeysym_lookup;
use crate::DisplayEvent;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Apply one display event to the state. Returns true if the change
    /// needs to be rendered.
    pub fn display_event_handler(&mut self, event: DisplayEvent) -> bool {
        match event {
            DisplayEvent::MapRequest(window, query) => self.window_created_handler(window, &query),
            DisplayEvent::UnmapNotify(window, send_event) => {
                self.window_unmapped_handler(window, send_event)
            }
            DisplayEvent::WindowDestroy(window) => self.window_destroyed_handler(window),
            DisplayEvent::ConfigureRequest(request) => self.configure_request_handler(&request),
            DisplayEvent::ScreensChanged(details) => self.screens_changed_handler(&details),
            DisplayEvent::EnterNotify(window) => self.enter_notify_handler(window),
            DisplayEvent::KeyCombo(mask, keysym) => self.key_combo_handler(mask, keysym),
            DisplayEvent::MouseCombo(mask, button, window, x, y) => {
                self.mouse_combo_handler(mask, button, window, x, y)
            }
            DisplayEvent::Motion(x, y) => self.motion_handler(x, y),
            DisplayEvent::ButtonRelease => self.button_release_handler(),
            DisplayEvent::ClientMessage(window, protocol) => {
                // No action in the core: layouts may observe the raw event.
                self.call_sandboxed("layout message", |manager| {
                    manager
                        .state
                        .windowset
                        .send_layout_message(&Message::Event(DisplayEvent::ClientMessage(
                            window, protocol,
                        )))
                })
            }
        }
    }

    fn key_combo_handler(&mut self, mask: ModMask, keysym: u32) -> bool {
        let mask = mask.difference(ignored_mask());
        let binding = self.config.keybinds().into_iter().find(|kb| {
            xkeysym_lookup::into_keysym(&kb.key) == Some(keysym)
                && into_modmask(&kb.modifier) == mask
        });
        match binding {
            Some(binding) => self.call_sandboxed("key binding", |manager| {
                manager.command_handler(&binding.command)
            }),
            None => false,
        }
    }

    fn enter_notify_handler(&mut self, window: WindowId) -> bool {
        if !self.state.focus_follows_mouse
            || !self.state.windowset.contains(window)
            || self.state.windowset.peek() == Some(window)
        {
            return false;
        }
        self.state.windowset.focus_window(window);
        true
    }

    fn screens_changed_handler(&mut self, details: &[ScreenDetail]) -> bool {
        let gutter = self.config.gutter();
        let details: Vec<ScreenDetail> = details
            .iter()
            .map(|d| ScreenDetail::new(d.rect, gutter))
            .collect();
        self.state.windowset.rescreen(&details);
        true
    }
}
