use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::display_event::DisplayEvent;
use crate::models::ScreenDetail;

#[cfg(test)]
mod mock_display_server;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The seam between the core and a concrete display protocol. All X calls
/// happen behind this trait; the core only exchanges [`DisplayEvent`]s and
/// [`DisplayAction`]s with it.
pub trait DisplayServer {
    fn new(config: &impl Config) -> Self;

    /// Install grabs and colors from the config. Called at startup and
    /// whenever the binding tables change.
    fn load_config(&mut self, _config: &impl Config) {}

    /// The currently attached screens.
    fn screens(&self) -> Vec<ScreenDetail>;

    /// Map requests for windows that already existed when the manager
    /// started, used for the startup scan and the resume reconciliation.
    fn existing_windows(&self) -> Vec<DisplayEvent> {
        Vec::new()
    }

    /// Block until at least one event arrives, then drain everything
    /// pending. This is the event loop's only wait point.
    fn next_events(&mut self) -> Vec<DisplayEvent>;

    fn execute_action(&mut self, _act: DisplayAction) -> Option<DisplayEvent> {
        None
    }

    fn flush(&self) {}
}
