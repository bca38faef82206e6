use super::{RationalRect, Screen, ScreenDetail, Stack, WindowId, Workspace, WorkspaceTag};
use crate::errors::{Result, ZipwmError};
use crate::layouts::{Layout, Message};
use std::collections::HashMap;
use std::mem::swap;

/// The whole window arrangement: one focused screen, the other visible
/// screens, the hidden workspaces and the floating overlay.
///
/// Every operation is a plain transformation of this value; X side effects
/// are derived from it afterwards by a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSet {
    pub current: Screen,
    pub visible: Vec<Screen>,
    pub hidden: Vec<Workspace>,
    pub floating: HashMap<WindowId, RationalRect>,
}

impl WindowSet {
    /// Build a fresh set of empty workspaces over the attached screens. The
    /// first workspaces are assigned to physical screens in order, the rest
    /// start hidden.
    ///
    /// # Errors
    ///
    /// Fails when no screen is attached, when there are fewer workspaces
    /// than screens, or when a tag appears twice.
    pub fn try_new(
        layout: &dyn Layout,
        tags: &[WorkspaceTag],
        screen_details: Vec<ScreenDetail>,
    ) -> Result<Self> {
        if screen_details.is_empty() {
            return Err(ZipwmError::NoScreens);
        }
        if tags.len() < screen_details.len() {
            return Err(ZipwmError::InsufficientWorkspaces {
                n_ws: tags.len(),
                n_screens: screen_details.len(),
            });
        }
        if let Some(duplicate) = tags
            .iter()
            .enumerate()
            .find(|&(i, tag)| tags[..i].contains(tag))
            .map(|(_, tag)| tag.clone())
        {
            return Err(ZipwmError::DuplicateTag(duplicate));
        }

        let mut workspaces: Vec<Workspace> = tags
            .iter()
            .map(|tag| Workspace::new(tag.clone(), layout.boxed_clone(), None))
            .collect();
        let hidden = workspaces.split_off(screen_details.len());

        let mut screens: Vec<Screen> = workspaces
            .into_iter()
            .zip(screen_details)
            .enumerate()
            .map(|(id, (workspace, detail))| Screen::new(workspace, id, detail))
            .collect();
        let current = screens.remove(0);

        Ok(Self {
            current,
            visible: screens,
            hidden,
            floating: HashMap::new(),
        })
    }

    // -- queries ---------------------------------------------------------

    /// The tag of the currently focused workspace.
    pub fn current_tag(&self) -> &str {
        &self.current.workspace.tag
    }

    /// The focused window of the current workspace, if any.
    pub fn peek(&self) -> Option<WindowId> {
        self.current.workspace.peek()
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.workspaces().any(|w| w.contains(window))
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.workspaces().any(|w| w.tag == tag)
    }

    /// The tag of the workspace holding the given window.
    pub fn tag_for_window(&self, window: WindowId) -> Option<WorkspaceTag> {
        self.workspaces()
            .find(|w| w.contains(window))
            .map(|w| w.tag.clone())
    }

    /// Iterate over every workspace: current first, then the other visible
    /// ones, then the hidden ones.
    pub fn workspaces(&self) -> impl Iterator<Item = &Workspace> {
        std::iter::once(&self.current.workspace)
            .chain(self.visible.iter().map(|s| &s.workspace))
            .chain(self.hidden.iter())
    }

    pub fn workspaces_mut(&mut self) -> impl Iterator<Item = &mut Workspace> {
        std::iter::once(&mut self.current.workspace)
            .chain(self.visible.iter_mut().map(|s| &mut s.workspace))
            .chain(self.hidden.iter_mut())
    }

    /// Iterate over every screen, the focused one first.
    pub fn screens(&self) -> impl Iterator<Item = &Screen> {
        std::iter::once(&self.current).chain(self.visible.iter())
    }

    pub fn screens_mut(&mut self) -> impl Iterator<Item = &mut Screen> {
        std::iter::once(&mut self.current).chain(self.visible.iter_mut())
    }

    /// Windows of all visible workspaces, in per-screen display order.
    pub fn visible_windows(&self) -> Vec<WindowId> {
        self.screens()
            .flat_map(|s| s.workspace.windows())
            .collect()
    }

    /// Every window managed by this set, including hidden ones.
    pub fn all_windows(&self) -> Vec<WindowId> {
        self.workspaces().flat_map(Workspace::windows).collect()
    }

    pub fn is_floating(&self, window: WindowId) -> bool {
        self.floating.contains_key(&window)
    }

    /// Apply a function to the current stack or return a default when the
    /// current workspace is empty.
    pub fn with<T, F>(&self, default: T, f: F) -> T
    where
        F: Fn(&Stack<WindowId>) -> T,
    {
        self.current
            .workspace
            .stack
            .as_ref()
            .map_or(default, f)
    }

    // -- navigation ------------------------------------------------------

    pub fn focus_up(&mut self) {
        self.current.workspace.map(Stack::focus_up);
    }

    pub fn focus_down(&mut self) {
        self.current.workspace.map(Stack::focus_down);
    }

    pub fn swap_up(&mut self) {
        self.current.workspace.map(Stack::swap_up);
    }

    pub fn swap_down(&mut self) {
        self.current.workspace.map(Stack::swap_down);
    }

    pub fn swap_master(&mut self) {
        self.current.workspace.map(Stack::swap_master);
    }

    /// Focus the workspace holding the given window, then move the focus to
    /// the window itself. Unknown windows leave the set untouched.
    pub fn focus_window(&mut self, window: WindowId) {
        if self.peek() == Some(window) {
            return;
        }
        let Some(tag) = self.tag_for_window(window) else {
            return;
        };
        self.view(&tag);
        let len = self.current.workspace.len();
        for _ in 0..len {
            if self.peek() == Some(window) {
                break;
            }
            self.focus_up();
        }
    }

    // -- view / shift ----------------------------------------------------

    /// Bring the workspace with the given tag to the current screen.
    ///
    /// A workspace visible on another screen changes places with the current
    /// workspace, so both screens stay occupied. A hidden workspace swaps
    /// with the current workspace, which becomes hidden.
    pub fn view(&mut self, tag: &str) {
        if self.current.workspace.tag == tag {
            return;
        }

        if let Some(screen) = self.visible.iter_mut().find(|s| s.workspace.tag == tag) {
            swap(&mut self.current.workspace, &mut screen.workspace);
            return;
        }

        if let Some(workspace) = self.hidden.iter_mut().find(|w| w.tag == tag) {
            swap(&mut self.current.workspace, workspace);
        }
    }

    /// Like [`view`](Self::view), but never moves a workspace across
    /// screens: when the tag is visible elsewhere, focus jumps to that
    /// screen instead.
    pub fn greedy_view(&mut self, tag: &str) {
        if self.current.workspace.tag == tag {
            return;
        }

        if let Some(screen) = self.visible.iter_mut().find(|s| s.workspace.tag == tag) {
            swap(&mut self.current, screen);
            return;
        }

        self.view(tag);
    }

    /// Move the focused window to the workspace with the given tag, where it
    /// becomes the focus. The view does not change.
    pub fn shift(&mut self, tag: &str) {
        if let Some(window) = self.peek() {
            self.shift_window(tag, window);
        }
    }

    /// Move the given window to the workspace with the given tag. Floating
    /// status travels with the window.
    pub fn shift_window(&mut self, tag: &str, window: WindowId) {
        if !self.contains_tag(tag) || self.tag_for_window(window).as_deref() == Some(tag) {
            return;
        }
        if !self.contains(window) {
            return;
        }
        for workspace in self.workspaces_mut() {
            workspace.remove(window);
        }
        if let Some(workspace) = self.workspaces_mut().find(|w| w.tag == tag) {
            workspace.insert_up(window);
        }
    }

    // -- insertion / removal ---------------------------------------------

    /// Insert a window directly before the current focus; it becomes the new
    /// focus. Windows already present anywhere are left where they are.
    pub fn insert_up(&mut self, window: WindowId) {
        if self.contains(window) {
            return;
        }
        self.current.workspace.insert_up(window);
    }

    /// Remove a window from wherever it is, clearing any floating state.
    pub fn delete(&mut self, window: WindowId) {
        self.sink(window);
        for workspace in self.workspaces_mut() {
            workspace.remove(window);
        }
    }

    /// Record a managed window as floating with the given fractional
    /// geometry.
    ///
    /// # Errors
    ///
    /// Fails with [`ZipwmError::UnknownClient`] when the window is not in
    /// any stack; floating always overlays a member window.
    pub fn float(&mut self, window: WindowId, rect: RationalRect) -> Result<()> {
        if !self.contains(window) {
            return Err(ZipwmError::UnknownClient(window));
        }
        self.floating.insert(window, rect);
        Ok(())
    }

    /// Return a floating window to the tiled layer, yielding its previous
    /// fractional geometry when it was floating.
    pub fn sink(&mut self, window: WindowId) -> Option<RationalRect> {
        self.floating.remove(&window)
    }

    // -- screens ---------------------------------------------------------

    /// Adopt a changed set of physical screens, keeping as many visible
    /// workspaces as possible. Extra workspaces become hidden; new screens
    /// take the first hidden workspaces.
    pub fn rescreen(&mut self, details: &[ScreenDetail]) {
        if details.is_empty() {
            return;
        }

        self.current.detail = details[0];
        self.current.id = 0;

        while self.visible.len() > details.len() - 1 {
            let displaced = self.visible.pop().expect("visible is non-empty");
            self.hidden.push(displaced.workspace);
        }
        for (i, screen) in self.visible.iter_mut().enumerate() {
            screen.detail = details[i + 1];
            screen.id = i + 1;
        }
        while self.visible.len() < details.len() - 1 && !self.hidden.is_empty() {
            let workspace = self.hidden.remove(0);
            let id = self.visible.len() + 1;
            self.visible.push(Screen::new(workspace, id, details[id]));
        }
    }

    // -- layout messages -------------------------------------------------

    /// Deliver a message to the current workspace's layout. Returns true
    /// when the layout handled it.
    pub fn send_layout_message(&mut self, message: &Message) -> bool {
        self.current.workspace.send_layout_message(message)
    }

    /// Deliver a message to every workspace's layout, e.g. on shutdown.
    pub fn broadcast_layout_message(&mut self, message: &Message) {
        for workspace in self.workspaces_mut() {
            workspace.send_layout_message(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::Full;
    use crate::models::Rect;
    use crate::stack;

    pub fn test_set(n_tags: usize, n_screens: usize) -> WindowSet {
        let tags: Vec<String> = (1..=n_tags).map(|n| n.to_string()).collect();
        let details = vec![ScreenDetail::default(); n_screens];
        WindowSet::try_new(&Full, &tags, details).expect("valid test set")
    }

    pub fn test_set_with_stacks(
        stacks: Vec<Option<Stack<WindowId>>>,
        n_screens: usize,
    ) -> WindowSet {
        let mut set = test_set(stacks.len(), n_screens);
        for (workspace, stack) in set.workspaces_mut().zip(stacks) {
            workspace.stack = stack;
        }
        set
    }

    fn w(raw: u32) -> WindowId {
        WindowId(raw)
    }

    #[test]
    fn try_new_requires_a_screen() {
        let err = WindowSet::try_new(&Full, &["1".to_string()], vec![]);
        assert!(matches!(err, Err(ZipwmError::NoScreens)));
    }

    #[test]
    fn try_new_requires_enough_workspaces() {
        let err = WindowSet::try_new(
            &Full,
            &["1".to_string()],
            vec![ScreenDetail::default(); 2],
        );
        assert!(matches!(
            err,
            Err(ZipwmError::InsufficientWorkspaces {
                n_ws: 1,
                n_screens: 2
            })
        ));
    }

    #[test]
    fn try_new_rejects_duplicate_tags() {
        let tags = vec!["1".to_string(), "1".to_string()];
        let err = WindowSet::try_new(&Full, &tags, vec![ScreenDetail::default()]);
        assert!(matches!(err, Err(ZipwmError::DuplicateTag(_))));
    }

    #[test]
    fn insert_up_focuses_the_new_window() {
        let mut set = test_set(3, 1);
        set.insert_up(w(1));
        set.insert_up(w(2));
        assert_eq!(set.peek(), Some(w(2)));
        assert_eq!(set.current.workspace.windows(), vec![w(2), w(1)]);
    }

    #[test]
    fn insert_up_ignores_known_windows() {
        let mut set = test_set(3, 1);
        set.insert_up(w(1));
        set.view("2");
        set.insert_up(w(1));
        assert!(set.current.workspace.is_empty());
    }

    #[test]
    fn delete_focus_falls_to_the_head_of_down() {
        let mut set = test_set_with_stacks(vec![Some(stack!([w(1)], w(2), [w(3)]))], 1);
        set.delete(w(2));
        assert_eq!(set.peek(), Some(w(3)));
        assert_eq!(set.current.workspace.windows(), vec![w(1), w(3)]);
    }

    #[test]
    fn delete_clears_floating_state() {
        let mut set = test_set_with_stacks(vec![Some(stack!(w(1)))], 1);
        set.float(w(1), RationalRect::default()).unwrap();
        set.delete(w(1));
        assert!(set.floating.is_empty());
        assert!(set.current.workspace.is_empty());
    }

    #[test]
    fn float_requires_a_member_window() {
        let mut set = test_set(2, 1);
        let err = set.float(w(9), RationalRect::default());
        assert!(matches!(err, Err(ZipwmError::UnknownClient(_))));
    }

    #[test]
    fn view_swaps_with_a_hidden_workspace() {
        let mut set = test_set(3, 1);
        set.insert_up(w(1));
        set.view("2");
        assert_eq!(set.current_tag(), "2");
        assert!(set.current.workspace.is_empty());
        assert!(set.hidden.iter().any(|ws| ws.tag == "1" && ws.contains(w(1))));

        set.view("1");
        assert_eq!(set.peek(), Some(w(1)));
    }

    #[test]
    fn view_swaps_workspaces_across_screens() {
        let mut set = test_set(3, 2);
        let current_id = set.current.id;
        set.view("2");
        // The workspace moved to the focused screen; the screen itself stayed.
        assert_eq!(set.current_tag(), "2");
        assert_eq!(set.current.id, current_id);
        assert_eq!(set.visible[0].workspace.tag, "1");
    }

    #[test]
    fn greedy_view_follows_the_other_screen() {
        let mut set = test_set(3, 2);
        let other_id = set.visible[0].id;
        set.greedy_view("2");
        assert_eq!(set.current_tag(), "2");
        assert_eq!(set.current.id, other_id);
        assert_eq!(set.visible[0].workspace.tag, "1");
    }

    #[test]
    fn view_unknown_tag_is_a_no_op() {
        let mut set = test_set(2, 1);
        set.insert_up(w(1));
        let before = set.clone();
        set.view("42");
        assert_eq!(set, before);
    }

    #[test]
    fn shift_moves_the_focus_to_the_target_workspace() {
        let mut set = test_set_with_stacks(vec![Some(stack!([w(1)], w(2))), None], 1);
        set.shift("2");
        assert_eq!(set.peek(), Some(w(1)));
        assert_eq!(set.current.workspace.windows(), vec![w(1)]);
        assert!(set.hidden.iter().any(|ws| ws.peek() == Some(w(2))));
    }

    #[test]
    fn shift_into_an_occupied_workspace_takes_the_focus() {
        let mut set = test_set_with_stacks(
            vec![Some(stack!(w(1))), Some(stack!([w(2)], w(3)))],
            1,
        );
        set.shift("2");
        assert!(set.current.workspace.is_empty());
        let target = set.workspaces().find(|ws| ws.tag == "2").unwrap();
        assert_eq!(target.peek(), Some(w(1)));
        assert_eq!(target.windows(), vec![w(2), w(1), w(3)]);
    }

    #[test]
    fn focus_window_switches_workspace_and_focus() {
        let mut set = test_set_with_stacks(
            vec![Some(stack!(w(1))), Some(stack!([w(2)], w(3), [w(4)]))],
            1,
        );
        set.focus_window(w(4));
        assert_eq!(set.current_tag(), "2");
        assert_eq!(set.peek(), Some(w(4)));
    }

    #[test]
    fn focus_window_on_the_focus_is_identity() {
        let mut set = test_set_with_stacks(vec![Some(stack!([w(1)], w(2), [w(3)]))], 1);
        let before = set.clone();
        set.focus_window(w(2));
        assert_eq!(set, before);
    }

    #[test]
    fn focus_window_on_an_unknown_window_is_identity() {
        let mut set = test_set_with_stacks(vec![Some(stack!(w(1)))], 1);
        let before = set.clone();
        set.focus_window(w(9));
        assert_eq!(set, before);
    }

    #[test]
    fn rescreen_displaces_extra_workspaces_to_hidden() {
        let mut set = test_set(4, 2);
        set.rescreen(&[ScreenDetail::default()]);
        assert!(set.visible.is_empty());
        assert_eq!(set.hidden.len(), 3);
        assert_eq!(set.workspaces().count(), 4);
    }

    #[test]
    fn rescreen_populates_new_screens_from_hidden() {
        let mut set = test_set(4, 1);
        let wide = ScreenDetail::new(Rect::new(1920, 0, 1280, 1024), Default::default());
        set.rescreen(&[ScreenDetail::default(), wide]);
        assert_eq!(set.visible.len(), 1);
        assert_eq!(set.visible[0].detail, wide);
        assert_eq!(set.hidden.len(), 2);
    }
}

#[cfg(test)]
mod quickcheck_tests {
    use super::tests::test_set_with_stacks;
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;
    use std::collections::HashSet;

    impl Arbitrary for WindowSet {
        fn arbitrary(g: &mut Gen) -> Self {
            let n_stacks = usize::arbitrary(g) % 5 + 1;
            let clients: Vec<WindowId> = HashSet::<u32>::arbitrary(g)
                .into_iter()
                .map(WindowId)
                .collect();
            let mut remaining = clients;
            let mut stacks: Vec<Option<Stack<WindowId>>> = Vec::with_capacity(n_stacks);

            for _ in 0..n_stacks {
                if remaining.is_empty() {
                    stacks.push(None);
                    continue;
                }
                let split_at = usize::arbitrary(g) % remaining.len();
                let mut chunk = remaining.split_off(split_at);
                match chunk.len() {
                    0 => stacks.push(None),
                    _ => {
                        let focus = chunk.remove(0);
                        let split = if chunk.is_empty() {
                            0
                        } else {
                            usize::arbitrary(g) % chunk.len()
                        };
                        let down = chunk.split_off(split);
                        stacks.push(Some(Stack::new(chunk, focus, down)));
                    }
                }
            }

            let n_screens = usize::arbitrary(g) % n_stacks + 1;
            let mut set = test_set_with_stacks(stacks, n_screens);
            for window in set.all_windows() {
                if bool::arbitrary(g) {
                    set.float(window, RationalRect::default())
                        .expect("window is managed");
                }
            }
            set
        }
    }

    fn window_positions_are_unique(set: &WindowSet) -> bool {
        let all = set.all_windows();
        let unique: HashSet<WindowId> = all.iter().copied().collect();
        all.len() == unique.len()
    }

    fn tags_of(set: &WindowSet) -> HashSet<WorkspaceTag> {
        set.workspaces().map(|w| w.tag.clone()).collect()
    }

    fn an_existing_tag(set: &WindowSet, seed: usize) -> WorkspaceTag {
        let tags: Vec<WorkspaceTag> = set.workspaces().map(|w| w.tag.clone()).collect();
        tags[seed % tags.len()].clone()
    }

    #[quickcheck]
    fn every_window_appears_at_most_once(set: WindowSet, seed: usize) -> bool {
        let tag = an_existing_tag(&set, seed);
        let mut set = set;
        set.focus_up();
        set.swap_master();
        set.view(&tag);
        set.shift(&tag);
        set.focus_down();
        window_positions_are_unique(&set)
    }

    #[quickcheck]
    fn navigation_preserves_the_tag_set(set: WindowSet, seed: usize) -> bool {
        let expected = tags_of(&set);
        let tag = an_existing_tag(&set, seed);
        let mut set = set;
        set.view(&tag);
        set.greedy_view(&tag);
        set.focus_up();
        tags_of(&set) == expected
    }

    #[quickcheck]
    fn the_focus_exists_whenever_windows_do(set: WindowSet) -> bool {
        let mut set = set;
        set.focus_down();
        match set.current.workspace.stack.as_ref() {
            Some(stack) => stack.contains(&stack.focus.clone()),
            None => set.current.workspace.windows().is_empty(),
        }
    }

    #[quickcheck]
    fn focusing_the_focused_window_changes_nothing(set: WindowSet) -> bool {
        let Some(focused) = set.peek() else {
            return true;
        };
        let mut moved = set.clone();
        moved.focus_window(focused);
        moved == set
    }

    #[quickcheck]
    fn view_is_involutive_on_the_current_workspace(set: WindowSet, a: usize, b: usize) -> bool {
        let tag_a = an_existing_tag(&set, a);
        let tag_b = an_existing_tag(&set, b);

        let mut once = set.clone();
        once.view(&tag_a);

        let mut thrice = set;
        thrice.view(&tag_a);
        thrice.view(&tag_b);
        thrice.view(&tag_a);

        thrice.current.workspace == once.current.workspace
    }

    #[quickcheck]
    fn shift_conserves_windows(set: WindowSet, seed: usize) -> bool {
        let tag = an_existing_tag(&set, seed);
        if tag == set.current_tag() {
            return true;
        }
        let Some(focused) = set.peek() else {
            return true;
        };

        let before = set.current.workspace.len();
        let mut set = set;
        set.shift(&tag);

        let target = set.workspaces().find(|w| w.tag == tag).expect("tag exists");
        set.current.workspace.len() == before - 1
            && target.peek() == Some(focused)
            && window_positions_are_unique(&set)
    }

    #[quickcheck]
    fn delete_undoes_insert_up(set: WindowSet) -> bool {
        let mut fresh = WindowId(0);
        while set.contains(fresh) {
            fresh = WindowId(fresh.0 + 1);
        }
        let mut moved = set.clone();
        moved.insert_up(fresh);
        moved.delete(fresh);
        moved == set
    }
}
