//! The window-manager state and the refresh that projects it onto X.
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::errors::Result;
use crate::layouts::Layout;
use crate::models::{
    Mode, RationalRect, Rect, Screen, ScreenDetail, Stack, WindowId, WindowSet, Workspace,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone)]
pub struct State {
    /// The workspace zipper every pure operation acts on.
    pub windowset: WindowSet,
    /// Windows currently in mapped X state.
    pub mapped: HashSet<WindowId>,
    /// Expected `UnmapNotify` counts for unmaps we caused ourselves.
    pub waiting_unmap: HashMap<WindowId, usize>,
    /// The in-flight pointer drag, if any.
    pub mode: Mode,
    /// Side effects for the display server, drained every loop turn.
    pub actions: VecDeque<DisplayAction>,
    /// The geometry each visible window was last given.
    pub known_geometry: HashMap<WindowId, Rect>,
    pub focus_follows_mouse: bool,
}

impl State {
    /// Build the initial state over the attached screens.
    ///
    /// # Errors
    ///
    /// Fails when the configured workspaces cannot cover the screens.
    pub fn new(config: &impl Config, details: Vec<ScreenDetail>) -> Result<Self> {
        let layout = config.layout();
        let windowset = WindowSet::try_new(layout.as_ref(), &config.workspace_tags(), details)?;
        Ok(Self {
            windowset,
            mapped: HashSet::new(),
            waiting_unmap: HashMap::new(),
            mode: Mode::Normal,
            actions: VecDeque::new(),
            known_geometry: HashMap::new(),
            focus_follows_mouse: config.focus_follows_mouse(),
        })
    }

    /// Recompute every visible workspace's layout and emit the X side
    /// effects needed to make the display match: geometry, map state,
    /// focus, stacking order and borders.
    pub fn refresh(&mut self) {
        let focused = self.windowset.peek();
        let floating = self.windowset.floating.clone();
        let mut placements: Vec<(WindowId, Rect)> = Vec::new();

        for screen in self.windowset.screens_mut() {
            let rect = screen.detail.effective_rect();
            let screen_rect = screen.detail.rect;
            let Some(stack) = screen.workspace.stack.clone() else {
                continue;
            };

            // The layout only sees the tiled members of the stack.
            let tiled = stack.clone().filter(|w| !floating.contains_key(w));
            if let Some(tiled) = tiled {
                placements.extend(screen.workspace.layout.layout(rect, &tiled));
            }

            // Floating windows overlay the tiled set, scaled into the screen.
            for window in stack.iter() {
                if let Some(fraction) = floating.get(window) {
                    placements.push((*window, fraction.to_rect(&screen_rect)));
                }
            }
        }

        // The globally focused window ends up on top of everything.
        if let Some(focused) = focused {
            if let Some(position) = placements.iter().position(|(w, _)| *w == focused) {
                let raised = placements.remove(position);
                placements.push(raised);
            }
        }

        let now_visible: HashSet<WindowId> = placements.iter().map(|(w, _)| *w).collect();

        for (window, rect) in &placements {
            self.actions
                .push_back(DisplayAction::MoveResizeWindow(*window, *rect));
            self.actions.push_back(DisplayAction::MapWindow(*window));
            self.known_geometry.insert(*window, *rect);
        }

        // Windows that just left the visible set are hidden with an unmap we
        // must recognise later as our own.
        let mut to_hide: Vec<WindowId> = self
            .mapped
            .iter()
            .filter(|w| !now_visible.contains(w))
            .copied()
            .collect();
        to_hide.sort_unstable();
        for window in to_hide {
            *self.waiting_unmap.entry(window).or_insert(0) += 1;
            self.actions.push_back(DisplayAction::UnmapWindow(window));
        }
        self.mapped = now_visible;

        self.actions.push_back(DisplayAction::FocusWindow(focused));
        self.actions.push_back(DisplayAction::Restack(
            placements.iter().map(|(w, _)| *w).collect(),
        ));
        for (window, _) in &placements {
            self.actions.push_back(DisplayAction::SetWindowBorder(
                *window,
                Some(*window) == focused,
            ));
        }

        let managed: HashSet<WindowId> = self.windowset.all_windows().into_iter().collect();
        self.known_geometry.retain(|w, _| managed.contains(w));
    }

    /// Forget a window entirely: every stack, the floating overlay and the
    /// bookkeeping tables.
    pub fn unmanage(&mut self, window: WindowId) -> bool {
        if !self.windowset.contains(window) {
            return false;
        }
        self.windowset.delete(window);
        self.mapped.remove(&window);
        self.waiting_unmap.remove(&window);
        self.known_geometry.remove(&window);
        true
    }

    /// The last geometry of a window as a fraction of its screen, used when
    /// a tiled window starts floating.
    pub fn floating_fraction(&self, window: WindowId) -> Option<RationalRect> {
        if let Some(fraction) = self.windowset.floating.get(&window) {
            return Some(*fraction);
        }
        let rect = self.known_geometry.get(&window)?;
        let screen = self
            .windowset
            .screens()
            .find(|s| s.workspace.contains(window))?;
        Some(rect.to_rational(&screen.detail.rect))
    }

    // -- restart snapshot ------------------------------------------------

    /// Serialize the window arrangement for the `--resume` handover. Layout
    /// state travels as each layout's textual encoding.
    ///
    /// # Errors
    ///
    /// Fails when the snapshot cannot be rendered as JSON.
    pub fn to_snapshot(&self) -> Result<String> {
        let snapshot = WindowSetSnapshot::from(&self.windowset);
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Replace the window arrangement with a deserialized snapshot. Layouts
    /// that no longer decode fall back to the configured default.
    ///
    /// # Errors
    ///
    /// Fails when the blob is not a snapshot at all.
    pub fn restore_snapshot(&mut self, blob: &str, fallback: &dyn Layout) -> Result<()> {
        let snapshot: WindowSetSnapshot = serde_json::from_str(blob)?;
        self.windowset = snapshot.into_window_set(fallback);
        self.mapped.clear();
        self.waiting_unmap.clear();
        self.known_geometry.clear();
        self.mode = Mode::Normal;
        Ok(())
    }

    /// Drop every window of a restored arrangement that no longer exists in
    /// the live window tree.
    pub fn reconcile(&mut self, live: &[WindowId]) {
        for window in self.windowset.all_windows() {
            if !live.contains(&window) {
                tracing::debug!("window {window} vanished while the manager was away");
                self.windowset.delete(window);
            }
        }
    }
}

// The serialized tree mirrors the zipper but carries layouts as text.

#[derive(Serialize, Deserialize)]
struct WorkspaceSnapshot {
    tag: String,
    layout: String,
    stack: Option<Stack<WindowId>>,
}

#[derive(Serialize, Deserialize)]
struct ScreenSnapshot {
    workspace: WorkspaceSnapshot,
    id: usize,
    detail: ScreenDetail,
}

#[derive(Serialize, Deserialize)]
struct WindowSetSnapshot {
    current: ScreenSnapshot,
    visible: Vec<ScreenSnapshot>,
    hidden: Vec<WorkspaceSnapshot>,
    floating: HashMap<WindowId, RationalRect>,
}

impl From<&Workspace> for WorkspaceSnapshot {
    fn from(workspace: &Workspace) -> Self {
        Self {
            tag: workspace.tag.clone(),
            layout: workspace.layout.encode(),
            stack: workspace.stack.clone(),
        }
    }
}

impl From<&Screen> for ScreenSnapshot {
    fn from(screen: &Screen) -> Self {
        Self {
            workspace: (&screen.workspace).into(),
            id: screen.id,
            detail: screen.detail,
        }
    }
}

impl From<&WindowSet> for WindowSetSnapshot {
    fn from(set: &WindowSet) -> Self {
        Self {
            current: (&set.current).into(),
            visible: set.visible.iter().map(Into::into).collect(),
            hidden: set.hidden.iter().map(Into::into).collect(),
            floating: set.floating.clone(),
        }
    }
}

impl WorkspaceSnapshot {
    fn into_workspace(self, fallback: &dyn Layout) -> Workspace {
        let layout = crate::layouts::decode(&self.layout).unwrap_or_else(|err| {
            tracing::warn!("discarding undecodable layout: {err}");
            fallback.boxed_clone()
        });
        Workspace::new(self.tag, layout, self.stack)
    }
}

impl ScreenSnapshot {
    fn into_screen(self, fallback: &dyn Layout) -> Screen {
        Screen::new(self.workspace.into_workspace(fallback), self.id, self.detail)
    }
}

impl WindowSetSnapshot {
    fn into_window_set(self, fallback: &dyn Layout) -> WindowSet {
        let mut set = WindowSet {
            current: self.current.into_screen(fallback),
            visible: self
                .visible
                .into_iter()
                .map(|s| s.into_screen(fallback))
                .collect(),
            hidden: self
                .hidden
                .into_iter()
                .map(|w| w.into_workspace(fallback))
                .collect(),
            floating: self.floating,
        };
        // Floating entries must overlay a member window.
        let members: HashSet<WindowId> = set.all_windows().into_iter().collect();
        set.floating.retain(|w, _| members.contains(w));
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::layouts::Tall;
    use crate::models::Gutter;

    fn test_state() -> State {
        let config = TestConfig::default();
        let details = vec![ScreenDetail::new(
            Rect::new(0, 0, 1920, 1080),
            Gutter::default(),
        )];
        State::new(&config, details).expect("state builds")
    }

    fn drain(state: &mut State) -> Vec<DisplayAction> {
        state.actions.drain(..).collect()
    }

    #[test]
    fn refresh_tiles_the_current_workspace() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        state.windowset.insert_up(WindowId(2));
        state.refresh();

        let actions = drain(&mut state);
        assert!(actions.contains(&DisplayAction::MoveResizeWindow(
            WindowId(2),
            Rect::new(0, 0, 960, 1080)
        )));
        assert!(actions.contains(&DisplayAction::MoveResizeWindow(
            WindowId(1),
            Rect::new(960, 0, 960, 1080)
        )));
        assert!(actions.contains(&DisplayAction::FocusWindow(Some(WindowId(2)))));
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        state.windowset.insert_up(WindowId(2));
        state
            .windowset
            .float(WindowId(1), RationalRect::default())
            .unwrap();

        state.refresh();
        let first = drain(&mut state);
        state.refresh();
        let second = drain(&mut state);

        assert_eq!(first, second);
    }

    #[test]
    fn refresh_respects_the_gutter() {
        let config = TestConfig::default();
        let details = vec![ScreenDetail::new(
            Rect::new(0, 0, 1920, 1080),
            Gutter::new(30, 0, 0, 0),
        )];
        let mut state = State::new(&config, details).unwrap();
        state.windowset.insert_up(WindowId(1));
        state.refresh();

        let actions = drain(&mut state);
        assert!(actions.contains(&DisplayAction::MoveResizeWindow(
            WindowId(1),
            Rect::new(0, 30, 1920, 1050)
        )));
    }

    #[test]
    fn hiding_a_workspace_counts_the_unmaps_it_causes() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        state.refresh();
        drain(&mut state);
        assert!(state.mapped.contains(&WindowId(1)));

        state.windowset.view("2");
        state.refresh();
        let actions = drain(&mut state);

        assert!(actions.contains(&DisplayAction::UnmapWindow(WindowId(1))));
        assert_eq!(state.waiting_unmap.get(&WindowId(1)), Some(&1));
        assert!(!state.mapped.contains(&WindowId(1)));
    }

    #[test]
    fn floating_windows_stack_above_tiled_ones() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        state.windowset.insert_up(WindowId(2));
        state.windowset.insert_up(WindowId(3));
        // Focus 1 so the raised window is not also the floating one.
        state.windowset.focus_window(WindowId(1));
        state
            .windowset
            .float(WindowId(2), RationalRect::new(0.25, 0.25, 0.5, 0.5))
            .unwrap();
        state.refresh();

        let restack = drain(&mut state)
            .into_iter()
            .find_map(|a| match a {
                DisplayAction::Restack(order) => Some(order),
                _ => None,
            })
            .expect("refresh restacks");

        let pos = |w: u32| restack.iter().position(|x| *x == WindowId(w)).unwrap();
        // Tiled below floating, focused window on top of everything.
        assert!(pos(3) < pos(2));
        assert_eq!(*restack.last().unwrap(), WindowId(1));
    }

    #[test]
    fn floating_geometry_scales_into_the_screen() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        state
            .windowset
            .float(WindowId(1), RationalRect::new(0.25, 0.25, 0.5, 0.5))
            .unwrap();
        state.refresh();

        let actions = drain(&mut state);
        assert!(actions.contains(&DisplayAction::MoveResizeWindow(
            WindowId(1),
            Rect::new(480, 270, 960, 540)
        )));
    }

    #[test]
    fn snapshot_roundtrips_the_arrangement() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        state.windowset.insert_up(WindowId(2));
        state
            .windowset
            .float(WindowId(1), RationalRect::new(0.1, 0.1, 0.3, 0.3))
            .unwrap();
        state.windowset.view("3");
        state.windowset.insert_up(WindowId(7));

        let blob = state.to_snapshot().unwrap();
        let mut restored = test_state();
        restored.restore_snapshot(&blob, &Tall::default()).unwrap();

        assert_eq!(restored.windowset, state.windowset);
    }

    #[test]
    fn restore_rejects_garbage() {
        let mut state = test_state();
        assert!(state.restore_snapshot("not json", &Tall::default()).is_err());
    }

    #[test]
    fn restore_drops_floating_entries_without_a_member_window() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        let mut snapshot = WindowSetSnapshot::from(&state.windowset);
        snapshot
            .floating
            .insert(WindowId(99), RationalRect::default());
        let blob = serde_json::to_string(&snapshot).unwrap();

        state.restore_snapshot(&blob, &Tall::default()).unwrap();
        assert!(!state.windowset.floating.contains_key(&WindowId(99)));
    }

    #[test]
    fn reconcile_removes_windows_that_vanished() {
        let mut state = test_state();
        state.windowset.insert_up(WindowId(1));
        state.windowset.insert_up(WindowId(2));

        state.reconcile(&[WindowId(2)]);

        assert!(!state.windowset.contains(WindowId(1)));
        assert!(state.windowset.contains(WindowId(2)));
    }
}
