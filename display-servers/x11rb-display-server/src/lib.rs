//! x11rb backend for zipwm.
use zipwm_core::{Config, DisplayAction, DisplayEvent, DisplayServer};
use zipwm_core::models::ScreenDetail;

use crate::xwrap::XWrap;
use error::Result;

mod error;
mod event_translate;
mod xatom;
mod xwrap;

pub struct X11rbDisplayServer {
    xw: XWrap,
}

impl DisplayServer for X11rbDisplayServer {
    fn new(config: &impl Config) -> Self {
        let mut xw = XWrap::new().expect("could not connect to the X server");
        xw.init()
            .expect("another window manager is already running");
        if let Err(e) = xw.load_config(config) {
            tracing::error!(error = ?e, "error when loading the config");
        }
        Self { xw }
    }

    fn load_config(&mut self, config: &impl Config) {
        if let Err(e) = self.xw.load_config(config) {
            tracing::error!(error = ?e, "error when loading the config");
        }
    }

    fn screens(&self) -> Vec<ScreenDetail> {
        match self.xw.get_screens() {
            Ok(screens) => screens,
            Err(e) => {
                tracing::error!(error = ?e, "error when querying the screens");
                vec![ScreenDetail::default()]
            }
        }
    }

    fn existing_windows(&self) -> Vec<DisplayEvent> {
        let mut events = Vec::new();
        match self.xw.get_all_windows() {
            Ok(windows) => {
                for window in windows {
                    match self.xw.setup_window(window) {
                        Ok(Some(event)) => events.push(event),
                        Ok(None) => {}
                        Err(e) => {
                            tracing::error!(window, error = ?e, "error when scanning a window");
                        }
                    }
                }
            }
            Err(e) => tracing::error!(error = ?e, "error when querying the window tree"),
        }
        events
    }

    fn next_events(&mut self) -> Vec<DisplayEvent> {
        let mut events = Vec::new();

        match self.xw.wait_for_event() {
            Ok(event) => {
                if let Some(ev) = event_translate::translate(&event, &mut self.xw) {
                    events.push(ev);
                }
            }
            Err(e) => {
                tracing::error!(error = ?e, "lost the connection to the X server");
                std::process::exit(1);
            }
        }
        // Drain everything that queued up behind the blocking read.
        loop {
            match self.xw.poll_for_event() {
                Ok(Some(event)) => {
                    if let Some(ev) = event_translate::translate(&event, &mut self.xw) {
                        events.push(ev);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = ?e, "an error occurred when polling for events");
                    break;
                }
            }
        }
        events
    }

    fn execute_action(&mut self, act: DisplayAction) -> Option<DisplayEvent> {
        tracing::trace!("DisplayAction: {:?}", act);
        let xw = &mut self.xw;
        let result: Result<()> = match &act {
            DisplayAction::MoveResizeWindow(w, rect) => xw.move_resize_window(w.0, *rect),
            DisplayAction::MapWindow(w) => xw.map_window(w.0),
            DisplayAction::UnmapWindow(w) => xw.unmap_window(w.0),
            DisplayAction::FocusWindow(w) => xw.focus_window(w.map(|w| w.0)),
            DisplayAction::Restack(order) => {
                let raw: Vec<u32> = order.iter().map(|w| w.0).collect();
                xw.restack(&raw)
            }
            DisplayAction::SetWindowBorder(w, focused) => {
                xw.set_window_border_color(w.0, *focused)
            }
            DisplayAction::ReplyConfigure(w, rect) => xw.reply_configure(w.0, *rect),
            DisplayAction::ForwardConfigure(request) => xw.forward_configure(request),
            DisplayAction::KillWindow(w) => xw.kill_window(w.0),
        };
        if let Err(e) = result {
            tracing::error!(action = ?act, error = ?e, "error when processing a display action");
        }
        None
    }

    fn flush(&self) {
        if let Err(e) = self.xw.flush() {
            tracing::error!(error = ?e, "error when flushing the connection");
        }
    }
}
