//! The compiled-in configuration: default key and mouse binding tables,
//! colors and workspace names.
use zipwm_core::config::{Keybind, ManageQuery, ManageTransform, Mousebind};
use zipwm_core::layouts::{Choose, Full, Layout, Tall};
use zipwm_core::models::{Gutter, WindowId};
use zipwm_core::utils::modmask_lookup::Button;
use zipwm_core::{Command, State};

use crate::recompile;

#[derive(Debug, Clone)]
pub struct Config {
    pub modkey: String,
    pub tags: Vec<String>,
    pub border_width: u32,
    pub focused_border_color: String,
    pub normal_border_color: String,
    pub gutter: Gutter,
    pub focus_follows_mouse: bool,
    pub terminal: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modkey: "Mod4".to_string(),
            tags: (1..=9).map(|n| n.to_string()).collect(),
            border_width: 1,
            focused_border_color: "#cd8b00".to_string(),
            normal_border_color: "#dddddd".to_string(),
            gutter: Gutter::default(),
            focus_follows_mouse: true,
            terminal: "xterm".to_string(),
        }
    }
}

pub fn load() -> Config {
    Config::default()
}

impl Config {
    fn bind(&self, extra: &[&str], key: &str, command: Command) -> Keybind {
        let mut modifier = vec![self.modkey.clone()];
        modifier.extend(extra.iter().map(ToString::to_string));
        Keybind {
            command,
            modifier,
            key: key.to_string(),
        }
    }
}

impl zipwm_core::Config for Config {
    fn workspace_tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn layout(&self) -> Box<dyn Layout> {
        Box::new(Choose::new(Box::new(Tall::default()), Box::new(Full)))
    }

    fn keybinds(&self) -> Vec<Keybind> {
        let mut binds = vec![
            self.bind(&[], "j", Command::FocusDown),
            self.bind(&[], "k", Command::FocusUp),
            self.bind(&["Shift"], "j", Command::SwapDown),
            self.bind(&["Shift"], "k", Command::SwapUp),
            self.bind(&[], "Return", Command::SwapMaster),
            self.bind(&[], "h", Command::ShrinkMaster),
            self.bind(&[], "l", Command::ExpandMaster),
            self.bind(&[], "comma", Command::IncMaster(1)),
            self.bind(&[], "period", Command::IncMaster(-1)),
            self.bind(&[], "space", Command::NextLayout),
            self.bind(&["Shift"], "space", Command::FirstLayout),
            self.bind(&[], "t", Command::ToggleFloating),
            self.bind(&["Shift"], "c", Command::CloseWindow),
            self.bind(
                &["Shift"],
                "Return",
                Command::Spawn(self.terminal.clone()),
            ),
            self.bind(&[], "p", Command::Spawn("dmenu_run".to_string())),
            self.bind(&[], "q", Command::Restart { resume: true }),
            self.bind(&["Shift"], "q", Command::Exit),
        ];
        for tag in &self.tags {
            binds.push(self.bind(&[], tag, Command::View(tag.clone())));
            binds.push(self.bind(&["Control"], tag, Command::GreedyView(tag.clone())));
            binds.push(self.bind(&["Shift"], tag, Command::ShiftTo(tag.clone())));
        }
        binds
    }

    fn mousebinds(&self) -> Vec<Mousebind> {
        vec![
            Mousebind {
                command: Command::MoveWindow,
                modifier: vec![self.modkey.clone()],
                button: Button::Main,
            },
            Mousebind {
                command: Command::ResizeWindow,
                modifier: vec![self.modkey.clone()],
                button: Button::Secondary,
            },
        ]
    }

    fn border_width(&self) -> u32 {
        self.border_width
    }

    fn focused_border_color(&self) -> String {
        self.focused_border_color.clone()
    }

    fn normal_border_color(&self) -> String {
        self.normal_border_color.clone()
    }

    fn gutter(&self) -> Gutter {
        self.gutter
    }

    fn focus_follows_mouse(&self) -> bool {
        self.focus_follows_mouse
    }

    fn manage_hook(&self, _window: WindowId, query: &ManageQuery) -> Option<ManageTransform> {
        if let Some(class) = &query.class {
            tracing::debug!("managing a window of class {class:?}");
        }
        None
    }

    fn log_hook(&self, state: &State) {
        tracing::debug!(
            "workspace {:?}, focus {:?}",
            state.windowset.current_tag(),
            state.windowset.peek()
        );
    }

    fn recompile(&self, force: bool) -> bool {
        recompile::recompile(force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use zipwm_core::utils::modmask_lookup::into_modmask;
    use zipwm_core::utils::xkeysym_lookup::into_keysym;
    use zipwm_core::Config as _;

    #[test]
    fn every_default_key_resolves_to_a_keysym() {
        let config = Config::default();
        for bind in config.keybinds() {
            assert!(
                into_keysym(&bind.key).is_some(),
                "unresolvable key {:?}",
                bind.key
            );
        }
    }

    #[test]
    fn default_chords_are_unique() {
        let config = Config::default();
        let mut seen = HashSet::new();
        for bind in config.keybinds() {
            let chord = (into_modmask(&bind.modifier).bits(), bind.key.clone());
            assert!(seen.insert(chord), "duplicate chord on {:?}", bind.key);
        }
    }

    #[test]
    fn workspace_bindings_cover_every_tag() {
        let config = Config::default();
        let binds = config.keybinds();
        let views = binds
            .iter()
            .filter(|b| matches!(b.command, Command::View(_)))
            .count();
        assert_eq!(views, config.workspace_tags().len());
    }
}
