use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::layouts::Message;
use crate::models::Manager;
use crate::utils::child_process;
use crate::Command;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Apply a bound command to the state. Returns true if the change needs
    /// to be rendered.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        match command {
            Command::FocusUp => {
                self.state.windowset.focus_up();
                true
            }
            Command::FocusDown => {
                self.state.windowset.focus_down();
                true
            }
            Command::SwapUp => {
                self.state.windowset.swap_up();
                true
            }
            Command::SwapDown => {
                self.state.windowset.swap_down();
                true
            }
            Command::SwapMaster => {
                self.state.windowset.swap_master();
                true
            }
            Command::View(tag) => {
                self.state.windowset.view(tag);
                true
            }
            Command::GreedyView(tag) => {
                self.state.windowset.greedy_view(tag);
                true
            }
            Command::ShiftTo(tag) => {
                self.state.windowset.shift(tag);
                true
            }
            Command::ToggleFloating => self.toggle_floating(),
            Command::IncMaster(delta) => self
                .state
                .windowset
                .send_layout_message(&Message::IncMasterN(*delta)),
            Command::ShrinkMaster => self.state.windowset.send_layout_message(&Message::Shrink),
            Command::ExpandMaster => self.state.windowset.send_layout_message(&Message::Expand),
            Command::NextLayout => self.state.windowset.send_layout_message(&Message::NextLayout),
            Command::FirstLayout => self
                .state
                .windowset
                .send_layout_message(&Message::FirstLayout),
            Command::CloseWindow => {
                if let Some(window) = self.state.windowset.peek() {
                    self.state
                        .actions
                        .push_back(DisplayAction::KillWindow(window));
                }
                false
            }
            // Drag commands only make sense from a mouse binding, where the
            // pointer handler starts them with the clicked window.
            Command::MoveWindow | Command::ResizeWindow => false,
            Command::Spawn(program) => {
                if let Err(err) = child_process::spawn(program) {
                    tracing::error!("{err}");
                }
                false
            }
            Command::Restart { resume } => {
                if self.config.recompile(false) {
                    self.pending_restart = Some(*resume);
                } else {
                    tracing::error!("recompile failed, staying on the running binary");
                }
                false
            }
            Command::Exit => {
                self.pending_exit = true;
                false
            }
        }
    }

    fn toggle_floating(&mut self) -> bool {
        let Some(window) = self.state.windowset.peek() else {
            return false;
        };
        if self.state.windowset.is_floating(window) {
            self.state.windowset.sink(window);
        } else {
            let fraction = self.state.floating_fraction(window).unwrap_or_default();
            let _ = self.state.windowset.float(window, fraction);
        }
        true
    }
}
