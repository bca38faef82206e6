use crate::config::Config;
use crate::display_event::DisplayEvent;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::models::{ScreenDetail, WindowId};
use crate::state::State;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Maintains current program state.
pub struct Manager<C, SERVER> {
    pub state: State,
    pub config: C,
    pub display_server: SERVER,

    pub(crate) pending_restart: Option<bool>,
    pub(crate) pending_exit: bool,
}

impl<C, SERVER> Manager<C, SERVER>
where
    C: Config,
    SERVER: DisplayServer,
{
    /// Connect to the display and build the initial state over its screens.
    ///
    /// # Errors
    ///
    /// Fails when the configured workspaces cannot cover the attached
    /// screens.
    pub fn new(config: C) -> Result<Self> {
        let display_server = SERVER::new(&config);
        let gutter = config.gutter();
        let details: Vec<ScreenDetail> = display_server
            .screens()
            .into_iter()
            .map(|d| ScreenDetail::new(d.rect, gutter))
            .collect();
        let state = State::new(&config, details)?;
        Ok(Self {
            state,
            config,
            display_server,
            pending_restart: None,
            pending_exit: false,
        })
    }

    /// Adopt a serialized arrangement from a previous instance and reconcile
    /// it against the live window tree: windows that vanished in the gap are
    /// dropped, and the screens are re-read in case monitors changed.
    pub fn restore_state(&mut self, blob: &str) {
        let fallback = self.config.layout();
        if let Err(err) = self.state.restore_snapshot(blob, fallback.as_ref()) {
            tracing::error!("ignoring unreadable resume state: {err}");
            return;
        }

        let live: Vec<WindowId> = self
            .display_server
            .existing_windows()
            .iter()
            .filter_map(|event| match event {
                DisplayEvent::MapRequest(window, _) => Some(*window),
                _ => None,
            })
            .collect();
        self.state.reconcile(&live);

        let gutter = self.config.gutter();
        let details: Vec<ScreenDetail> = self
            .display_server
            .screens()
            .into_iter()
            .map(|d| ScreenDetail::new(d.rect, gutter))
            .collect();
        self.state.windowset.rescreen(&details);
    }

    /// Run a user-supplied callback inside the error boundary: a fault is
    /// logged, the state snapshot taken before the call is restored, and the
    /// event loop carries on.
    pub(crate) fn call_sandboxed<F>(&mut self, context: &str, f: F) -> bool
    where
        F: FnOnce(&mut Self) -> bool,
    {
        let snapshot = self.state.clone();
        match catch_unwind(AssertUnwindSafe(|| f(&mut *self))) {
            Ok(needs_refresh) => needs_refresh,
            Err(err) => {
                let hint = err
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| err.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                tracing::error!("{context} failed: {hint}; state restored");
                eprintln!("zipwm: {context} failed: {hint}");
                self.state = snapshot;
                false
            }
        }
    }
}

#[cfg(test)]
impl Manager<crate::config::tests::TestConfig, crate::display_servers::MockDisplayServer> {
    pub fn new_test(tags: Vec<String>) -> Self {
        use crate::config::tests::TestConfig;
        let mut config = TestConfig::default();
        if !tags.is_empty() {
            config.tags = tags;
        }
        Self::new(config).expect("test manager builds")
    }

    pub fn new_test_with_layout(layout: &str) -> Self {
        use crate::config::tests::TestConfig;
        let config = TestConfig {
            layout: layout.to_string(),
            ..TestConfig::default()
        };
        Self::new(config).expect("test manager builds")
    }
}
