//! Calls acting on a single client window.
use x11rb::protocol::xproto::{self, ChangeWindowAttributesAux, ConfigureWindowAux};
use zipwm_core::models::{Rect, WindowId};
use zipwm_core::{ConfigureRequest, DisplayEvent};

use crate::error::Result;
use crate::xatom::WmWindowState;

use super::XWrap;

impl XWrap {
    /// Build the manage-pipeline event for a window that asked to be
    /// mapped. Override-redirect windows are never managed.
    pub fn setup_window(&self, window: xproto::Window) -> Result<Option<DisplayEvent>> {
        let attrs = self.get_window_attrs(window)?;
        if attrs.override_redirect {
            return Ok(None);
        }
        let query = self.get_window_query(window);
        Ok(Some(DisplayEvent::MapRequest(WindowId(window), query)))
    }

    /// First contact with a window the manager decided to keep: subscribe
    /// to its events, install the button grabs and mark it as managed.
    pub fn setup_managed_window(&mut self, window: xproto::Window) -> Result<()> {
        if self.managed_windows.contains(&window) {
            return Ok(());
        }
        self.managed_windows.push(window);
        let attrs = ChangeWindowAttributesAux::new()
            .event_mask(xproto::EventMask::ENTER_WINDOW | xproto::EventMask::PROPERTY_CHANGE);
        xproto::change_window_attributes(&self.conn, window, &attrs)?;
        self.grab_buttons_on(window)?;
        self.set_wm_state(window, WmWindowState::Normal)?;
        Ok(())
    }

    pub fn teardown_managed_window(&mut self, window: xproto::Window) {
        self.managed_windows.retain(|w| *w != window);
    }

    /// Place a window at its computed geometry. The border eats into the
    /// rectangle so tiles stay flush.
    pub fn move_resize_window(&self, window: xproto::Window, rect: Rect) -> Result<()> {
        let bw = self.border_width;
        let attrs = ConfigureWindowAux {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.w.saturating_sub(2 * bw).max(1)),
            height: Some(rect.h.saturating_sub(2 * bw).max(1)),
            border_width: Some(bw),
            ..Default::default()
        };
        xproto::configure_window(&self.conn, window, &attrs)?;
        Ok(())
    }

    pub fn map_window(&mut self, window: xproto::Window) -> Result<()> {
        self.setup_managed_window(window)?;
        xproto::map_window(&self.conn, window)?;
        Ok(())
    }

    pub fn unmap_window(&self, window: xproto::Window) -> Result<()> {
        xproto::unmap_window(&self.conn, window)?;
        self.set_wm_state(window, WmWindowState::Iconic)?;
        Ok(())
    }

    /// Give the input focus to a window, or to the root when there is
    /// nothing to focus.
    pub fn focus_window(&self, window: Option<xproto::Window>) -> Result<()> {
        xproto::set_input_focus(
            &self.conn,
            xproto::InputFocus::POINTER_ROOT,
            window.unwrap_or(self.root),
            x11rb::CURRENT_TIME,
        )?;
        Ok(())
    }

    /// Stack the windows into the given order, lowest first.
    pub fn restack(&self, order: &[xproto::Window]) -> Result<()> {
        for pair in order.windows(2) {
            let attrs = ConfigureWindowAux {
                sibling: Some(pair[0]),
                stack_mode: Some(xproto::StackMode::ABOVE),
                ..Default::default()
            };
            xproto::configure_window(&self.conn, pair[1], &attrs)?;
        }
        Ok(())
    }

    /// Answer a configure request of a tiled window with a synthetic
    /// `ConfigureNotify` carrying the geometry it actually has.
    pub fn reply_configure(&self, window: xproto::Window, rect: Rect) -> Result<()> {
        let bw = self.border_width;
        let event = xproto::ConfigureNotifyEvent {
            response_type: x11rb::protocol::xproto::CONFIGURE_NOTIFY_EVENT,
            sequence: 0,
            event: window,
            window,
            above_sibling: x11rb::NONE,
            x: rect.x as i16,
            y: rect.y as i16,
            width: rect.w.saturating_sub(2 * bw).max(1) as u16,
            height: rect.h.saturating_sub(2 * bw).max(1) as u16,
            border_width: bw as u16,
            override_redirect: false,
        };
        xproto::send_event(
            &self.conn,
            false,
            window,
            xproto::EventMask::STRUCTURE_NOTIFY,
            event,
        )?;
        Ok(())
    }

    /// Pass a configure request of an unmanaged window through untouched.
    pub fn forward_configure(&self, request: &ConfigureRequest) -> Result<()> {
        let attrs = ConfigureWindowAux {
            x: Some(request.x),
            y: Some(request.y),
            width: Some(request.w),
            height: Some(request.h),
            border_width: Some(request.border_width),
            sibling: request.sibling.map(|s| s.0),
            stack_mode: Some(xproto::StackMode::from(request.stack_mode)),
            ..Default::default()
        };
        xproto::configure_window(&self.conn, request.window.0, &attrs)?;
        Ok(())
    }

    /// Ask a window to close through `WM_DELETE_WINDOW` when it understands
    /// the protocol, kill the client otherwise.
    pub fn kill_window(&self, window: xproto::Window) -> Result<()> {
        if self.get_wm_protocols(window)?.contains(&self.atoms.WMDelete) {
            let data = [self.atoms.WMDelete, x11rb::CURRENT_TIME, 0, 0, 0];
            let event = xproto::ClientMessageEvent::new(32, window, self.atoms.WMProtocols, data);
            xproto::send_event(
                &self.conn,
                false,
                window,
                xproto::EventMask::NO_EVENT,
                event,
            )?;
        } else {
            xproto::kill_client(&self.conn, window)?;
        }
        Ok(())
    }
}
