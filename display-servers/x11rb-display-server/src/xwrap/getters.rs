use x11rb::{
    connection::Connection,
    properties::WmClass,
    protocol::{randr, xproto},
};
use zipwm_core::config::ManageQuery;
use zipwm_core::models::{Gutter, Rect, ScreenDetail};

use crate::error::{BackendError, Result};

use super::XWrap;

impl XWrap {
    /// Allocate a pixel for a `#rrggbb` color specification.
    pub fn get_color(&self, color: &str) -> Result<u32> {
        let screen = &self.conn.setup().roots[self.display];
        let (red, green, blue) = parse_color_string(color)?;
        let reply =
            xproto::alloc_color(&self.conn, screen.default_colormap, red, green, blue)?.reply()?;
        Ok(reply.pixel)
    }

    /// Returns all the screens of the display, one per active crtc. Falls
    /// back to the root geometry when randr reports nothing usable.
    pub fn get_screens(&self) -> Result<Vec<ScreenDetail>> {
        let resources = randr::get_screen_resources(&self.conn, self.root)?.reply()?;
        let mut screens: Vec<ScreenDetail> = resources
            .crtcs
            .iter()
            .filter_map(|&crtc| {
                randr::get_crtc_info(&self.conn, crtc, resources.config_timestamp).ok()
            })
            .filter_map(|cookie| cookie.reply().ok())
            .filter(|info| info.width > 0 && info.height > 0)
            .map(|info| {
                ScreenDetail::new(
                    Rect::new(
                        i32::from(info.x),
                        i32::from(info.y),
                        u32::from(info.width),
                        u32::from(info.height),
                    ),
                    Gutter::default(),
                )
            })
            .collect();
        screens.sort_by_key(|detail| (detail.rect.x, detail.rect.y));

        if screens.is_empty() {
            let root = &self.conn.setup().roots[self.display];
            screens.push(ScreenDetail::new(
                Rect::new(
                    0,
                    0,
                    u32::from(root.width_in_pixels),
                    u32::from(root.height_in_pixels),
                ),
                Gutter::default(),
            ));
        }
        Ok(screens)
    }

    /// Returns the child windows of the root.
    pub fn get_all_windows(&self) -> Result<Vec<xproto::Window>> {
        Ok(xproto::query_tree(&self.conn, self.root)?.reply()?.children)
    }

    pub fn get_window_attrs(
        &self,
        window: xproto::Window,
    ) -> Result<xproto::GetWindowAttributesReply> {
        Ok(xproto::get_window_attributes(&self.conn, window)?.reply()?)
    }

    /// What the manage pipeline wants to know about a window.
    pub fn get_window_query(&self, window: xproto::Window) -> ManageQuery {
        let mut query = ManageQuery::default();
        if let Ok(cookie) = WmClass::get(&self.conn, window) {
            if let Ok(Some(class)) = cookie.reply() {
                query.instance = String::from_utf8(class.instance().to_vec()).ok();
                query.class = String::from_utf8(class.class().to_vec()).ok();
            }
        }
        query.title = self.get_window_name(window).ok();
        query
    }

    /// Returns a window's `WM_NAME`.
    pub fn get_window_name(&self, window: xproto::Window) -> Result<String> {
        let reply = xproto::get_property(
            &self.conn,
            false,
            window,
            xproto::AtomEnum::WM_NAME,
            xproto::AtomEnum::STRING,
            0,
            1024,
        )?
        .reply()?;
        Ok(String::from_utf8(reply.value)?)
    }

    /// The protocols a window advertises in `WM_PROTOCOLS`.
    pub fn get_wm_protocols(&self, window: xproto::Window) -> Result<Vec<xproto::Atom>> {
        let reply = xproto::get_property(
            &self.conn,
            false,
            window,
            self.atoms.WMProtocols,
            xproto::AtomEnum::ATOM,
            0,
            32,
        )?
        .reply()?;
        Ok(reply.value32().map_or_else(Vec::new, |values| values.collect()))
    }

    /// Converts a keycode to the keysym in its first column.
    #[must_use]
    pub fn keycode_to_keysym(&self, keycode: u8) -> u32 {
        let index = usize::from(keycode.saturating_sub(self.min_keycode))
            * usize::from(self.keysyms_per_keycode);
        self.keysyms.get(index).copied().unwrap_or(0)
    }

    /// Every keycode currently producing the given keysym.
    #[must_use]
    pub fn keysym_to_keycodes(&self, keysym: u32) -> Vec<u8> {
        let per = usize::from(self.keysyms_per_keycode.max(1));
        self.keysyms
            .chunks(per)
            .enumerate()
            .filter(|(_, syms)| syms.first() == Some(&keysym))
            .map(|(i, _)| self.min_keycode + i as u8)
            .collect()
    }
}

fn parse_color_string(color: &str) -> Result<(u16, u16, u16)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 {
        return Err(BackendError::InvalidColor(color.to_string()));
    }
    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map(|v| u16::from(v) * 257)
            .map_err(|_| BackendError::InvalidColor(color.to_string()))
    };
    Ok((component(0..2)?, component(2..4)?, component(4..6)?))
}
