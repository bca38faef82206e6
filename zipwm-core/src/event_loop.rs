use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::layouts::Message;
use crate::models::Manager;

/// Why the event loop returned, and what the binary should do about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitAction {
    /// Terminate the process.
    Exit,
    /// Re-exec the (possibly recompiled) binary. `resume_state` carries the
    /// serialized arrangement when the user asked to keep it.
    Restart { resume_state: Option<String> },
}

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run the single-threaded event loop until the user exits or restarts.
    /// Blocking on the next batch of display events is the only wait point;
    /// every handler turn is a short, non-suspending state transition.
    pub fn event_loop(mut self) -> ExitAction {
        // Adopt windows that were mapped before we started (or while a
        // restart was in flight).
        for event in self.display_server.existing_windows() {
            self.display_event_handler(event);
        }
        self.display_server.load_config(&self.config);
        self.update_windows();
        self.perform_actions();

        loop {
            self.display_server.flush();

            let mut needs_update = false;
            for event in self.display_server.next_events() {
                needs_update = self.display_event_handler(event) || needs_update;
            }

            if needs_update {
                self.update_windows();
            }
            self.perform_actions();

            if self.pending_exit {
                return ExitAction::Exit;
            }
            if let Some(resume) = self.pending_restart.take() {
                return self.shutdown(resume);
            }
        }
    }

    /// Refresh the arrangement and give the user's log hook a look at the
    /// result. Both run inside the error boundary: a faulting layout leaves
    /// its workspace untiled instead of taking the loop down.
    fn update_windows(&mut self) {
        self.call_sandboxed("layout", |manager| {
            manager.state.refresh();
            true
        });
        self.call_sandboxed("log hook", |manager| {
            manager.config.log_hook(&manager.state);
            false
        });
    }

    /// Drain the pending side effects into the display server. Actions may
    /// answer with synthetic events; those run through the reducer straight
    /// away so nothing is left queued across the next blocking wait.
    fn perform_actions(&mut self) {
        while let Some(action) = self.state.actions.pop_front() {
            if let Some(event) = self.display_server.execute_action(action) {
                if self.display_event_handler(event) {
                    self.update_windows();
                }
            }
        }
    }

    /// Leave the loop for a re-exec. Clients stay untouched: the X server
    /// owns them and the next instance will pick them back up.
    fn shutdown(mut self, resume: bool) -> ExitAction {
        self.state
            .windowset
            .broadcast_layout_message(&Message::ReleaseResources);
        self.display_server.flush();

        let resume_state = if resume {
            match self.state.to_snapshot() {
                Ok(blob) => Some(blob),
                Err(err) => {
                    tracing::error!("could not serialize state for resume: {err}");
                    None
                }
            }
        } else {
            None
        };
        ExitAction::Restart { resume_state }
    }
}
