mod keybind;

pub use keybind::{Keybind, Mousebind};

use crate::layouts::Layout;
use crate::models::{Gutter, WindowId, WindowSet};
use crate::state::State;

/// What the backend could find out about a window that asked to be managed.
/// The manage pipeline hands this to the user hook for classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManageQuery {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: Option<String>,
}

/// A stack transformation produced by the manage pipeline. The default
/// transformation inserts the window at the focus; a hook's transform is
/// composed after it and may float or shift the window.
pub type ManageTransform = Box<dyn FnOnce(&mut WindowSet)>;

/// The seam between the core and the user's configuration.
pub trait Config {
    fn workspace_tags(&self) -> Vec<String>;

    /// The layout given to every fresh workspace.
    fn layout(&self) -> Box<dyn Layout>;

    fn keybinds(&self) -> Vec<Keybind>;

    fn mousebinds(&self) -> Vec<Mousebind>;

    fn border_width(&self) -> u32;

    fn focused_border_color(&self) -> String;

    fn normal_border_color(&self) -> String;

    fn gutter(&self) -> Gutter {
        Gutter::default()
    }

    fn focus_follows_mouse(&self) -> bool {
        true
    }

    /// Classify a freshly mapped window. Runs after the default insert;
    /// returning `None` keeps the default placement.
    fn manage_hook(&self, window: WindowId, query: &ManageQuery) -> Option<ManageTransform> {
        let _ = (window, query);
        None
    }

    /// Invoked after every refresh with the freshly synchronised state.
    fn log_hook(&self, state: &State) {
        let _ = state;
    }

    /// Rebuild the user configuration binary if it is stale. Returning
    /// `false` aborts a pending restart; the running instance continues.
    fn recompile(&self, force: bool) -> bool {
        let _ = force;
        true
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::layouts;
    use crate::models::RationalRect;

    /// A minimal config driving the reducer tests.
    pub struct TestConfig {
        pub tags: Vec<String>,
        pub layout: String,
        pub keybinds: Vec<Keybind>,
        pub mousebinds: Vec<Mousebind>,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                tags: (1..=9).map(|n| n.to_string()).collect(),
                layout: "Tall 1 0.03 0.5".to_string(),
                keybinds: Vec::new(),
                mousebinds: Vec::new(),
            }
        }
    }

    impl Config for TestConfig {
        fn workspace_tags(&self) -> Vec<String> {
            self.tags.clone()
        }

        fn layout(&self) -> Box<dyn Layout> {
            layouts::decode(&self.layout).expect("test layout decodes")
        }

        fn keybinds(&self) -> Vec<Keybind> {
            self.keybinds.clone()
        }

        fn mousebinds(&self) -> Vec<Mousebind> {
            self.mousebinds.clone()
        }

        fn border_width(&self) -> u32 {
            0
        }

        fn focused_border_color(&self) -> String {
            "#ff0000".to_string()
        }

        fn normal_border_color(&self) -> String {
            "#444444".to_string()
        }

        fn manage_hook(&self, window: WindowId, query: &ManageQuery) -> Option<ManageTransform> {
            match query.class.as_deref() {
                Some("floater") => Some(Box::new(move |ws: &mut WindowSet| {
                    let _ = ws.float(window, RationalRect::default());
                })),
                Some("panicker") => panic!("misbehaving manage hook"),
                Some(tag) if tag.starts_with("on-tag-") => {
                    let tag = tag.trim_start_matches("on-tag-").to_string();
                    Some(Box::new(move |ws: &mut WindowSet| {
                        ws.shift_window(&tag, window);
                    }))
                }
                _ => None,
            }
        }
    }
}
