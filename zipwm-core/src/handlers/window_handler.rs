use crate::config::{Config, ManageQuery};
use crate::display_action::DisplayAction;
use crate::display_event::ConfigureRequest;
use crate::display_servers::DisplayServer;
use crate::models::{Manager, WindowId};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// A window asked to be mapped. Unknown windows run through the manage
    /// pipeline: the default insert at the focus, composed with whatever
    /// transformation the user hook yields.
    pub fn window_created_handler(&mut self, window: WindowId, query: &ManageQuery) -> bool {
        if self.state.windowset.contains(window) {
            return false;
        }

        self.state.windowset.insert_up(window);
        self.call_sandboxed("manage hook", |manager| {
            if let Some(transform) = manager.config.manage_hook(window, query) {
                transform(&mut manager.state.windowset);
            }
            true
        });
        tracing::debug!(
            "managing {window} on workspace {:?}",
            self.state.windowset.tag_for_window(window)
        );
        true
    }

    /// A window was unmapped. Unmaps we caused ourselves are counted down
    /// and ignored; anything else means the client withdrew the window.
    pub fn window_unmapped_handler(&mut self, window: WindowId, _send_event: bool) -> bool {
        if let Some(count) = self.state.waiting_unmap.get_mut(&window) {
            *count -= 1;
            if *count == 0 {
                self.state.waiting_unmap.remove(&window);
            }
            return false;
        }
        self.state.unmanage(window)
    }

    pub fn window_destroyed_handler(&mut self, window: WindowId) -> bool {
        self.state.waiting_unmap.remove(&window);
        self.state.unmanage(window)
    }

    /// Tiled, mapped windows get their current geometry re-sent instead of
    /// what they asked for; everything else passes through verbatim.
    pub fn configure_request_handler(&mut self, request: &ConfigureRequest) -> bool {
        let window = request.window;
        let tiled =
            self.state.windowset.contains(window) && !self.state.windowset.is_floating(window);

        if tiled && self.state.mapped.contains(&window) {
            if let Some(rect) = self.state.known_geometry.get(&window) {
                self.state
                    .actions
                    .push_back(DisplayAction::ReplyConfigure(window, *rect));
            }
        } else {
            self.state
                .actions
                .push_back(DisplayAction::ForwardConfigure(*request));
        }
        false
    }
}
