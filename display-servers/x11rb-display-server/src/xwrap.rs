use x11rb::{
    connection::Connection,
    protocol::xproto::{self, ChangeWindowAttributesAux},
    protocol::Event,
    rust_connection::RustConnection,
};
use zipwm_core::config::Config;
use zipwm_core::utils::modmask_lookup::{self, ModMask};
use zipwm_core::utils::xkeysym_lookup;

use crate::error::Result;
use crate::xatom::AtomCollection;

mod getters;
mod setters;
mod window;

#[inline]
pub fn root_event_mask() -> xproto::EventMask {
    xproto::EventMask::SUBSTRUCTURE_REDIRECT
        | xproto::EventMask::SUBSTRUCTURE_NOTIFY
        | xproto::EventMask::BUTTON_PRESS
        | xproto::EventMask::ENTER_WINDOW
        | xproto::EventMask::LEAVE_WINDOW
        | xproto::EventMask::STRUCTURE_NOTIFY
        | xproto::EventMask::PROPERTY_CHANGE
}

#[inline]
pub fn button_event_mask() -> xproto::EventMask {
    xproto::EventMask::BUTTON_PRESS
        | xproto::EventMask::BUTTON_RELEASE
        | xproto::EventMask::BUTTON_MOTION
        | xproto::EventMask::POINTER_MOTION
}

pub struct Colors {
    pub normal: u32,
    pub focused: u32,
}

/// Contains the X server connection and everything the backend needs to
/// talk to it.
pub(crate) struct XWrap {
    conn: RustConnection,
    display: usize,
    root: xproto::Window,
    pub atoms: AtomCollection,

    colors: Colors,
    border_width: u32,
    pub managed_windows: Vec<xproto::Window>,

    // Bindings resolved at load_config time, kept for re-grabbing after a
    // keyboard mapping change.
    keybinds: Vec<(u32, ModMask)>,
    mousebinds: Vec<(u8, ModMask)>,

    min_keycode: u8,
    keysyms_per_keycode: u8,
    keysyms: Vec<u32>,
}

impl XWrap {
    pub fn new() -> Result<Self> {
        let (conn, display) = x11rb::connect(None)?;
        let atoms = AtomCollection::new(&conn)?.reply()?;

        let setup = conn.setup();
        let root = setup.roots[display].root;
        let min_keycode = setup.min_keycode;
        let count = setup.max_keycode - min_keycode + 1;
        let mapping = xproto::get_keyboard_mapping(&conn, min_keycode, count)?.reply()?;

        Ok(Self {
            conn,
            display,
            root,
            atoms,
            colors: Colors {
                normal: 0,
                focused: 0,
            },
            border_width: 0,
            managed_windows: Vec::new(),
            keybinds: Vec::new(),
            mousebinds: Vec::new(),
            min_keycode,
            keysyms_per_keycode: mapping.keysyms_per_keycode,
            keysyms: mapping.keysyms,
        })
    }

    /// Select the redirection mask on the root window, becoming the window
    /// manager of this display. Only one client may hold this mask.
    pub fn init(&self) -> Result<()> {
        let attrs = ChangeWindowAttributesAux::new().event_mask(root_event_mask());
        xproto::change_window_attributes(&self.conn, self.root, &attrs)?.check()?;
        self.sync()?;
        Ok(())
    }

    /// Resolve colors and binding tables from the config and install the
    /// matching grabs.
    pub fn load_config(&mut self, config: &impl Config) -> Result<()> {
        self.colors = Colors {
            normal: self.get_color(&config.normal_border_color())?,
            focused: self.get_color(&config.focused_border_color())?,
        };
        self.border_width = config.border_width();

        self.keybinds = config
            .keybinds()
            .iter()
            .filter_map(|kb| {
                let keysym = xkeysym_lookup::into_keysym(&kb.key)?;
                Some((keysym, modmask_lookup::into_modmask(&kb.modifier)))
            })
            .collect();
        self.mousebinds = config
            .mousebinds()
            .iter()
            .map(|mb| (mb.button.into(), modmask_lookup::into_modmask(&mb.modifier)))
            .collect();

        self.reset_grabs()?;
        Ok(())
    }

    /// Re-read the keyboard mapping after a `MappingNotify` and re-install
    /// the key grabs against the new keycodes.
    pub fn refresh_keyboard(&mut self) -> Result<()> {
        let setup = self.conn.setup();
        let min_keycode = setup.min_keycode;
        let count = setup.max_keycode - min_keycode + 1;
        let mapping = xproto::get_keyboard_mapping(&self.conn, min_keycode, count)?.reply()?;
        self.min_keycode = min_keycode;
        self.keysyms_per_keycode = mapping.keysyms_per_keycode;
        self.keysyms = mapping.keysyms;
        self.reset_grabs()
    }

    pub fn root(&self) -> xproto::Window {
        self.root
    }

    /// Block until the next event arrives.
    pub fn wait_for_event(&self) -> Result<Event> {
        Ok(self.conn.wait_for_event()?)
    }

    /// Drain one queued event without blocking.
    pub fn poll_for_event(&self) -> Result<Option<Event>> {
        Ok(self.conn.poll_for_event()?)
    }

    pub fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }

    /// Round-trip to the server, draining every outstanding request.
    pub fn sync(&self) -> Result<()> {
        xproto::get_input_focus(&self.conn)?.reply()?;
        Ok(())
    }
}
