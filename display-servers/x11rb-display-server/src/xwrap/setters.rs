use x11rb::protocol::xproto::{self, ChangeWindowAttributesAux, PropMode};
use zipwm_core::utils::modmask_lookup::ModMask;

use crate::error::Result;
use crate::xatom::WmWindowState;

use super::{button_event_mask, XWrap};

impl XWrap {
    pub fn set_window_border_color(&self, window: xproto::Window, focused: bool) -> Result<()> {
        let pixel = if focused {
            self.colors.focused
        } else {
            self.colors.normal
        };
        let attrs = ChangeWindowAttributesAux::new().border_pixel(pixel);
        xproto::change_window_attributes(&self.conn, window, &attrs)?;
        Ok(())
    }

    /// Set the ICCCM `WM_STATE` property of a window.
    pub fn set_wm_state(&self, window: xproto::Window, state: WmWindowState) -> Result<()> {
        let data: [u32; 2] = [state.into(), x11rb::NONE];
        let raw: Vec<u8> = data.iter().flat_map(|v| v.to_ne_bytes()).collect();
        xproto::change_property(
            &self.conn,
            PropMode::REPLACE,
            window,
            self.atoms.WMState,
            self.atoms.WMState,
            32,
            data.len() as u32,
            &raw,
        )?;
        Ok(())
    }

    /// Drop every grab and re-install the key table on the root window and
    /// the button table on each managed window.
    pub fn reset_grabs(&self) -> Result<()> {
        xproto::ungrab_key(
            &self.conn,
            xproto::Grab::ANY,
            self.root,
            xproto::ModMask::ANY,
        )?;
        for (keysym, mask) in &self.keybinds {
            self.grab_keys(*keysym, *mask)?;
        }
        for window in &self.managed_windows {
            self.grab_buttons_on(*window)?;
        }
        Ok(())
    }

    /// Grab a key chord on the root, once per combination of the lock
    /// modifiers so numlock and capslock never shadow a binding.
    pub fn grab_keys(&self, keysym: u32, mask: ModMask) -> Result<()> {
        let modifiers = xproto::ModMask::from(mask.bits());
        for code in self.keysym_to_keycodes(keysym) {
            for combo in lock_combinations(modifiers) {
                xproto::grab_key(
                    &self.conn,
                    false,
                    self.root,
                    combo,
                    code,
                    xproto::GrabMode::ASYNC,
                    xproto::GrabMode::ASYNC,
                )?;
            }
        }
        Ok(())
    }

    /// Install the mouse binding table on a managed window.
    pub fn grab_buttons_on(&self, window: xproto::Window) -> Result<()> {
        xproto::ungrab_button(
            &self.conn,
            xproto::ButtonIndex::ANY,
            window,
            xproto::ModMask::ANY,
        )?;
        for (button, mask) in &self.mousebinds {
            let modifiers = xproto::ModMask::from(mask.bits());
            for combo in lock_combinations(modifiers) {
                xproto::grab_button(
                    &self.conn,
                    false,
                    window,
                    button_event_mask(),
                    xproto::GrabMode::ASYNC,
                    xproto::GrabMode::ASYNC,
                    x11rb::NONE,
                    x11rb::NONE,
                    xproto::ButtonIndex::from(*button),
                    combo,
                )?;
            }
        }
        Ok(())
    }
}

/// Every combination of the requested mask with numlock (Mod2) and capslock.
fn lock_combinations(mask: xproto::ModMask) -> [xproto::ModMask; 4] {
    [
        mask,
        mask | xproto::ModMask::M2,
        mask | xproto::ModMask::LOCK,
        mask | xproto::ModMask::M2 | xproto::ModMask::LOCK,
    ]
}
