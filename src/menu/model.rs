//! Pie menu state machine: show/hide lifecycle, per-frame wedge resolution,
//! mouse-up handling and in-place submenu descent.

use super::geometry;
use super::slice::{CommitFn, Entry, EntryRef, Slice, SliceList, Submenu};
use super::{OUTER_RADIUS, POPUP_FACTOR, POPUP_TIME, WEDGE_COUNT};
use crate::host::{HostWindow, Painter, Point, Scale, NoSound, SoundPlayer, UiSound};
use crate::theme::PieColors;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Wall-clock timer for the popup shrink effect. The caller supplies `now`,
/// so tests can drive time.
#[derive(Debug, Default)]
struct PopupTimer {
    started_at: Option<Instant>,
}

impl PopupTimer {
    fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    fn stop(&mut self) {
        self.started_at = None;
    }

    fn started(&self) -> bool {
        self.started_at.is_some()
    }

    fn elapsed_secs(&self, now: Instant) -> f32 {
        self.started_at
            .map(|t| now.saturating_duration_since(t).as_secs_f32())
            .unwrap_or(0.0)
    }
}

/// What one wedge slot shows this frame.
#[derive(Debug, Clone, Default)]
pub struct WedgePlan {
    pub label: String,
    /// Label drawn faded because the entry is disabled.
    pub dimmed: bool,
}

/// Result of a per-frame compose pass, ready to hand to the view.
#[derive(Debug)]
pub struct FramePlan {
    /// Current popup size multiplier, 1.0 once settled.
    pub factor: f32,
    pub first_click: bool,
    pub hot_wedge: Option<usize>,
    pub wedges: [WedgePlan; WEDGE_COUNT],
}

/// A radial, at most 8-way context menu.
///
/// The menu owns its entry list and tracks which list is currently active:
/// its own, or a descended-into submenu's. Clicking a submenu swaps the
/// active list in place, so the on-screen geometry never moves during
/// traversal. At most 8 slot-consuming entries per level are meaningful;
/// anything beyond the eighth wedge is never drawn or selectable.
pub struct PieMenu {
    label: String,
    /// This menu's own entries.
    my_slices: SliceList,
    /// The active list: `my_slices`, or a submenu's after descent.
    slices: SliceList,
    center: Point,
    first_click: bool,
    visible: bool,
    /// Entry under the pointer, recomputed by every compose pass.
    hot_slice: Option<EntryRef>,
    /// Last hot entry, compared by identity to replay the hover sound once.
    old_slice: Option<EntryRef>,
    popup: PopupTimer,
    sounds: Rc<dyn SoundPlayer>,
}

impl fmt::Debug for PieMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PieMenu").field(&self.label).finish()
    }
}

impl PieMenu {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_sounds(label, Rc::new(NoSound))
    }

    pub fn with_sounds(label: impl Into<String>, sounds: Rc<dyn SoundPlayer>) -> Self {
        let my_slices: SliceList = Rc::new(RefCell::new(Vec::new()));
        Self {
            label: label.into(),
            slices: Rc::clone(&my_slices),
            my_slices,
            center: Point::default(),
            first_click: true,
            visible: false,
            hot_slice: None,
            old_slice: None,
            popup: PopupTimer::default(),
            sounds,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn first_click(&self) -> bool {
        self.first_click
    }

    /// Handle to this menu's own entry list, shared with any parent that
    /// appended this menu as a submenu.
    pub fn entries(&self) -> SliceList {
        Rc::clone(&self.my_slices)
    }

    /// True while a submenu's entries are displayed instead of our own.
    pub fn descended(&self) -> bool {
        !Rc::ptr_eq(&self.slices, &self.my_slices)
    }

    /// Number of entries in the currently active list.
    pub fn len(&self) -> usize {
        self.slices.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.borrow().is_empty()
    }

    /// Appends an entry to the active list. Rejects absent entries and
    /// reports the failure instead of changing state.
    pub fn add_child(&mut self, entry: Option<EntryRef>) -> bool {
        let Some(entry) = entry else {
            return false;
        };
        self.slices.borrow_mut().push(entry);
        true
    }

    /// Removes an entry by identity from the active list.
    pub fn remove_child(&mut self, entry: &EntryRef) -> bool {
        let mut slices = self.slices.borrow_mut();
        match slices.iter().position(|e| Rc::ptr_eq(e, entry)) {
            Some(pos) => {
                slices.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Appends another pie menu as a submenu entry, sharing its entry list.
    /// Rejects an absent menu.
    pub fn append_context_submenu(&mut self, submenu: Option<&PieMenu>) -> bool {
        let Some(menu) = submenu else {
            return false;
        };
        log::debug!("appending submenu '{}' to '{}'", menu.label, self.label);
        self.slices
            .borrow_mut()
            .push(Entry::submenu(Submenu::new(menu.label.clone(), menu.entries())));
        true
    }

    /// Opens the menu around a screen point: clamps the center so the full
    /// outer radius fits the host's menu rectangle, warps the pointer to the
    /// clamped center, captures the mouse and resets all per-session state.
    pub fn show(&mut self, x: f32, y: f32, host: &mut dyn HostWindow) {
        if self.visible {
            return;
        }
        self.sounds.play(UiSound::MenuAppear);
        log::debug!("showing pie menu '{}' at {x},{y}", self.label);

        let screen = host.menu_rect();
        let mut cx = x;
        let mut cy = y;
        if cx - OUTER_RADIUS < screen.left {
            cx = screen.left + OUTER_RADIUS;
        } else if cx + OUTER_RADIUS > screen.right() {
            cx = screen.right() - OUTER_RADIUS;
        }
        if cy - OUTER_RADIUS < screen.bottom {
            cy = screen.bottom + OUTER_RADIUS;
        } else if cy + OUTER_RADIUS > screen.top() {
            cy = screen.top() - OUTER_RADIUS;
        }
        self.center = Point::new(cx, cy);

        host.warp_pointer(self.center);
        host.set_mouse_capture(true);

        self.first_click = true;
        self.slices = Rc::clone(&self.my_slices);
        Self::reset_enable_checks(&self.slices);
        self.hot_slice = None;
        self.old_slice = None;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.sounds.play(UiSound::MenuHide);
        log::debug!("hiding pie menu '{}'", self.label);

        self.slices = Rc::clone(&self.my_slices);
        self.popup.stop();
        self.visible = false;
    }

    /// Hiding through here additionally triggers the host's menu sweep;
    /// showing is only done through `show`, so `true` is ignored.
    pub fn set_visible(&mut self, visible: bool, host: &mut dyn HostWindow) {
        if !visible {
            self.hide();
            host.hide_all_menus();
        }
    }

    /// Hover events are accepted and ignored; hot tracking happens once per
    /// frame in `compose`.
    pub fn handle_hover(&mut self, _x: f32, _y: f32) -> bool {
        true
    }

    pub fn handle_right_mouse_up(&mut self, now: Instant, host: &mut dyn HostWindow) -> bool {
        // both buttons behave the same
        self.handle_mouse_up(now, host)
    }

    /// Button release: the first no-hit release keeps the menu open and
    /// starts the shrink animation; a slice commits and closes; a submenu
    /// swaps the active list in place; a settled no-hit release closes.
    pub fn handle_mouse_up(&mut self, now: Instant, host: &mut dyn HostWindow) -> bool {
        if self.first_click && self.hot_slice.is_none() {
            self.first_click = false;
            self.popup.start(now);
        } else {
            let mut stay_visible = false;

            enum Action {
                Commit(Option<CommitFn>),
                Descend(SliceList),
                None,
            }

            let action = match &self.hot_slice {
                Some(hot) => match &*hot.borrow() {
                    Entry::Slice(slice) => Action::Commit(slice.click_callback()),
                    Entry::Submenu(sub) => Action::Descend(Rc::clone(&sub.entries)),
                    Entry::Separator => Action::None,
                },
                None => Action::None,
            };

            match action {
                Action::Commit(callback) => {
                    self.sounds.play(UiSound::ClickRelease);
                    if let Some(callback) = callback {
                        callback();
                    }
                }
                Action::Descend(entries) => {
                    self.first_click = false;
                    self.slices = entries;
                    Self::reset_enable_checks(&self.slices);
                    self.hot_slice = None;
                    self.old_slice = None;
                    self.popup.start(now);
                    stay_visible = true;
                    self.sounds.play(UiSound::MenuAppear);
                }
                Action::None => {}
            }

            self.set_visible(stay_visible, host);
        }

        // capture is only needed up to the first release
        if host.has_mouse_capture() {
            host.set_mouse_capture(false);
        }
        true
    }

    /// Convenience draw entry point: compose the frame, then emit it.
    pub fn draw(
        &mut self,
        pointer: Point,
        scale: Scale,
        now: Instant,
        colors: &PieColors,
        painter: &mut dyn Painter,
    ) {
        let plan = self.compose(pointer, scale, now);
        super::view::draw(&plan, colors, painter);
    }

    /// The per-frame pass: resolves the popup factor, walks the active list
    /// through the autohide chains, hit-tests the pointer and picks the hot
    /// entry, playing the per-wedge highlight sound on change.
    pub fn compose(&mut self, pointer: Point, scale: Scale, now: Instant) -> FramePlan {
        let factor = self.popup_factor(now);
        let rel = Point::new(
            (pointer.x - self.center.x) / scale.x,
            (pointer.y - self.center.y) / scale.y,
        );
        let current_segment = geometry::wedge_at(rel, factor, self.first_click);

        let items: Vec<EntryRef> = self.slices.borrow().clone();
        self.hot_slice = None;

        let mut wedges: [WedgePlan; WEDGE_COUNT] = Default::default();
        let mut hot_wedge = None;
        let mut was_autohide = false;
        let mut idx = 0;
        let mut num = 0;

        while num < WEDGE_COUNT {
            let mut wedge = WedgePlan::default();

            if idx < items.len() {
                let item = Rc::clone(&items[idx]);
                let next = items.get(idx + 1).cloned();
                idx += 1;

                let skip = {
                    let mut entry = item.borrow_mut();
                    match &mut *entry {
                        Entry::Slice(slice) => {
                            Self::resolve_slice(slice, next.as_ref(), &mut was_autohide, &mut wedge)
                        }
                        Entry::Separator => false,
                        Entry::Submenu(sub) => {
                            wedge.label = sub.label.clone();
                            false
                        }
                    }
                };
                if skip {
                    continue; // chain member lost; its wedge slot is not consumed
                }

                let interactive = item.borrow().is_interactive();
                if current_segment == Some(num) && interactive {
                    let changed = match &self.old_slice {
                        Some(old) => !Rc::ptr_eq(old, &item),
                        None => true,
                    };
                    if changed {
                        self.sounds.play(UiSound::SliceHighlight(num as u8));
                        self.old_slice = Some(Rc::clone(&item));
                    }
                    self.hot_slice = Some(item);
                    hot_wedge = Some(num);
                }
            }

            wedges[num] = wedge;
            num += 1;
        }

        FramePlan {
            factor,
            first_click: self.first_click,
            hot_wedge,
            wedges,
        }
    }

    /// Runs one slice through visibility, the autohide chain and enablement.
    /// Returns true when the slice loses its chain and must be skipped
    /// without consuming a wedge slot.
    ///
    /// The lookahead peek at the next chain member evaluates that member's
    /// predicates eagerly, before its own turn comes around; predicates with
    /// side effects observe this double evaluation and some callers depend
    /// on it, so it is not memoized.
    fn resolve_slice(
        slice: &mut Slice,
        next: Option<&EntryRef>,
        was_autohide: &mut bool,
        wedge: &mut WedgePlan,
    ) -> bool {
        wedge.label = slice.label().to_string();
        slice.update_visible();
        // slices never really disappear; invisible just means disabled
        if !slice.visible() {
            slice.set_enabled(false);
        }

        // a chain starter cuts any previous chain short
        if slice.start_autohide() {
            *was_autohide = false;
        }

        if slice.autohide_chained() {
            // a previous chain member already won; skip without looking
            if *was_autohide {
                return true;
            }

            let next_eligible = Self::peek_chain_member(next);
            slice.update_enabled();

            if slice.visible() && slice.enabled() {
                // first visible and enabled chain member wins
                *was_autohide = true;
            } else if next_eligible == Some(true) {
                return true;
            } else {
                // no later candidate; this member shows, possibly dimmed
                *was_autohide = true;
            }
        } else {
            *was_autohide = false;
            slice.update_enabled();
        }

        if !slice.enabled() {
            wedge.dimmed = true;
        }
        false
    }

    /// Evaluates the next entry's predicates if it continues the current
    /// autohide chain; `Some(eligible)` when it does, `None` otherwise.
    fn peek_chain_member(next: Option<&EntryRef>) -> Option<bool> {
        let next = next?;
        let mut entry = next.try_borrow_mut().ok()?;
        let look = entry.as_slice_mut()?;
        if !look.autohide_chained() || look.start_autohide() {
            return None;
        }
        look.update_enabled();
        look.update_visible();
        Some(look.visible() && look.enabled())
    }

    fn popup_factor(&mut self, now: Instant) -> f32 {
        if self.first_click {
            return POPUP_FACTOR;
        }
        if self.popup.started() {
            let elapsed = self.popup.elapsed_secs(now);
            let total = POPUP_TIME.as_secs_f32();
            if elapsed > total {
                self.popup.stop();
                1.0
            } else {
                POPUP_FACTOR - (POPUP_FACTOR - 1.0) * elapsed / total
            }
        } else {
            1.0
        }
    }

    fn reset_enable_checks(slices: &SliceList) {
        for entry in slices.borrow().iter() {
            if let Some(slice) = entry.borrow_mut().as_slice_mut() {
                slice.reset_update_enabled_check();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Rect;
    use std::cell::Cell;

    #[derive(Default)]
    struct TestHost {
        captured: bool,
        capture_changes: Vec<bool>,
        warped_to: Option<Point>,
        swept: u32,
    }

    impl HostWindow for TestHost {
        fn menu_rect(&self) -> Rect {
            Rect::new(0.0, 0.0, 800.0, 600.0)
        }

        fn warp_pointer(&mut self, pos: Point) {
            self.warped_to = Some(pos);
        }

        fn set_mouse_capture(&mut self, captured: bool) {
            self.captured = captured;
            self.capture_changes.push(captured);
        }

        fn has_mouse_capture(&self) -> bool {
            self.captured
        }

        fn hide_all_menus(&mut self) {
            self.swept += 1;
        }
    }

    #[derive(Default)]
    struct Recorder {
        played: RefCell<Vec<UiSound>>,
    }

    impl SoundPlayer for Recorder {
        fn play(&self, sound: UiSound) {
            self.played.borrow_mut().push(sound);
        }
    }

    fn slice(label: &str) -> EntryRef {
        Entry::slice(Slice::new(label))
    }

    /// Pointer position at an angle/radius relative to the menu center.
    fn pointer_at(menu: &PieMenu, degrees: f32, radius: f32) -> Point {
        let rad = degrees.to_radians();
        Point::new(
            menu.center().x + radius * rad.cos(),
            menu.center().y + radius * rad.sin(),
        )
    }

    fn hot_label(menu: &PieMenu) -> Option<String> {
        menu.hot_slice
            .as_ref()
            .map(|e| e.borrow().label().to_string())
    }

    #[test]
    fn show_keeps_center_when_menu_fits() {
        let mut menu = PieMenu::new("Object");
        let mut host = TestHost::default();
        menu.show(500.0, 500.0, &mut host);

        assert!(menu.is_visible());
        assert!(menu.first_click());
        assert_eq!(menu.center(), Point::new(500.0, 500.0));
        assert_eq!(host.warped_to, Some(Point::new(500.0, 500.0)));
        assert!(host.captured);
    }

    #[test]
    fn show_clamps_center_to_fit_outer_radius() {
        let mut menu = PieMenu::new("Object");
        let mut host = TestHost::default();
        menu.show(50.0, 500.0, &mut host);

        assert_eq!(menu.center(), Point::new(96.0, 500.0));
        // the pointer warps to the clamped center, not the requested point
        assert_eq!(host.warped_to, Some(Point::new(96.0, 500.0)));

        let mut menu = PieMenu::new("Object");
        let mut host = TestHost::default();
        menu.show(780.0, 580.0, &mut host);
        assert_eq!(menu.center(), Point::new(704.0, 504.0));
    }

    #[test]
    fn show_while_visible_is_ignored() {
        let sounds = Rc::new(Recorder::default());
        let mut menu = PieMenu::with_sounds("Object", sounds.clone());
        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        menu.show(100.0, 100.0, &mut host);

        assert_eq!(menu.center(), Point::new(400.0, 300.0));
        assert_eq!(*sounds.played.borrow(), vec![UiSound::MenuAppear]);
    }

    #[test]
    fn slice_commit_closes_and_fires_once() {
        let sounds = Rc::new(Recorder::default());
        let mut menu = PieMenu::with_sounds("Object", sounds.clone());
        for label in ["Touch", "Sit", "Pay"] {
            menu.add_child(Some(slice(label)));
        }
        let fired = Rc::new(Cell::new(0u32));
        let fired_cb = fired.clone();
        menu.add_child(Some(Entry::slice(
            Slice::new("Stand Up").with_click(move || fired_cb.set(fired_cb.get() + 1)),
        )));

        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let now = Instant::now();

        // the fourth entry sits in the northwest wedge
        let plan = menu.compose(pointer_at(&menu, 135.0, 60.0), Scale::default(), now);
        assert_eq!(plan.hot_wedge, Some(3));
        assert_eq!(hot_label(&menu).as_deref(), Some("Stand Up"));

        assert!(menu.handle_mouse_up(now, &mut host));
        assert_eq!(fired.get(), 1);
        assert!(!menu.is_visible());
        assert_eq!(host.swept, 1);
        assert_eq!(
            *sounds.played.borrow(),
            vec![
                UiSound::MenuAppear,
                UiSound::SliceHighlight(3),
                UiSound::ClickRelease,
                UiSound::MenuHide,
            ]
        );
    }

    #[test]
    fn first_release_without_hit_starts_shrink() {
        let mut menu = PieMenu::new("Object");
        menu.add_child(Some(slice("Touch")));
        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let t0 = Instant::now();

        let plan = menu.compose(menu.center(), Scale::default(), t0);
        assert_eq!(plan.factor, POPUP_FACTOR);
        assert!(plan.first_click);

        menu.handle_mouse_up(t0, &mut host);
        assert!(menu.is_visible());
        assert!(!menu.first_click());
        assert_eq!(host.capture_changes, vec![true, false]);

        // halfway through the shrink the factor is halfway down
        let plan = menu.compose(menu.center(), Scale::default(), t0 + POPUP_TIME / 2);
        assert!((plan.factor - (POPUP_FACTOR + 1.0) / 2.0).abs() < 1e-3);

        let plan = menu.compose(menu.center(), Scale::default(), t0 + POPUP_TIME * 2);
        assert_eq!(plan.factor, 1.0);
    }

    #[test]
    fn settled_release_without_hit_closes() {
        let sounds = Rc::new(Recorder::default());
        let mut menu = PieMenu::with_sounds("Object", sounds.clone());
        menu.add_child(Some(slice("Touch")));
        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let now = Instant::now();

        menu.compose(menu.center(), Scale::default(), now);
        menu.handle_mouse_up(now, &mut host);
        assert!(menu.is_visible());

        // capture is dropped again on every release while held
        host.set_mouse_capture(true);
        menu.compose(menu.center(), Scale::default(), now);
        menu.handle_mouse_up(now, &mut host);
        assert!(!menu.is_visible());
        assert!(!host.captured);
        assert_eq!(host.swept, 1);
        assert_eq!(
            *sounds.played.borrow(),
            vec![UiSound::MenuAppear, UiSound::MenuHide]
        );
    }

    #[test]
    fn distant_pointer_selects_only_before_first_release() {
        let mut menu = PieMenu::new("Object");
        menu.add_child(Some(slice("Touch")));
        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let t0 = Instant::now();

        let far = pointer_at(&menu, 0.0, 500.0);
        let plan = menu.compose(far, Scale::default(), t0);
        assert_eq!(plan.hot_wedge, Some(0));

        menu.compose(menu.center(), Scale::default(), t0);
        menu.handle_mouse_up(t0, &mut host);

        let plan = menu.compose(far, Scale::default(), t0 + POPUP_TIME * 2);
        assert_eq!(plan.hot_wedge, None);
    }

    #[test]
    fn submenu_click_descends_in_place() {
        let sounds = Rc::new(Recorder::default());
        let mut child = PieMenu::new("More");
        child.add_child(Some(slice("Eject")));

        let mut menu = PieMenu::with_sounds("Avatar", sounds.clone());
        menu.add_child(Some(slice("Profile")));
        menu.append_context_submenu(Some(&child));

        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let now = Instant::now();

        let plan = menu.compose(pointer_at(&menu, 45.0, 60.0), Scale::default(), now);
        assert_eq!(plan.hot_wedge, Some(1));
        menu.handle_mouse_up(now, &mut host);

        assert!(menu.is_visible());
        assert!(menu.descended());
        assert!(!menu.first_click());
        assert_eq!(host.swept, 0);
        // descent swaps the entry list only; the menu stays where it opened
        assert_eq!(menu.center(), Point::new(400.0, 300.0));
        assert_eq!(host.warped_to, Some(Point::new(400.0, 300.0)));

        // popup restarts from full size at the moment of descent
        let plan = menu.compose(pointer_at(&menu, 0.0, 60.0), Scale::default(), now);
        assert_eq!(plan.factor, POPUP_FACTOR);
        assert_eq!(plan.wedges[0].label, "Eject");
        assert_eq!(hot_label(&menu).as_deref(), Some("Eject"));

        menu.handle_mouse_up(now, &mut host);
        assert!(!menu.is_visible());
        assert!(!menu.descended());
        assert_eq!(
            *sounds.played.borrow(),
            vec![
                UiSound::MenuAppear,
                UiSound::SliceHighlight(1),
                UiSound::MenuAppear,
                UiSound::SliceHighlight(0),
                UiSound::ClickRelease,
                UiSound::MenuHide,
            ]
        );
    }

    #[test]
    fn first_eligible_chain_member_wins() {
        let b_calls = Rc::new(Cell::new(0u32));
        let c_calls = Rc::new(Cell::new(0u32));
        let b_cb = b_calls.clone();
        let c_cb = c_calls.clone();

        let mut menu = PieMenu::new("Object");
        menu.add_child(Some(Entry::slice(
            Slice::new("Sit Down")
                .with_autohide(true, false)
                .with_enable(|| false),
        )));
        menu.add_child(Some(Entry::slice(
            Slice::new("Stand Up").with_autohide(false, true).with_enable(move || {
                b_cb.set(b_cb.get() + 1);
                true
            }),
        )));
        menu.add_child(Some(Entry::slice(
            Slice::new("Sit Here").with_autohide(false, true).with_enable(move || {
                c_cb.set(c_cb.get() + 1);
                true
            }),
        )));
        menu.add_child(Some(slice("Touch")));

        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let plan = menu.compose(menu.center(), Scale::default(), Instant::now());

        // the winner takes wedge 0; skipped members consume no slot
        assert_eq!(plan.wedges[0].label, "Stand Up");
        assert!(!plan.wedges[0].dimmed);
        assert_eq!(plan.wedges[1].label, "Touch");
        assert_eq!(plan.wedges[2].label, "");

        // the winner is probed by its predecessor and again on its own turn;
        // the member after the winner only by the winner's lookahead
        assert_eq!(b_calls.get(), 2);
        assert_eq!(c_calls.get(), 1);
    }

    #[test]
    fn fully_disabled_chain_shows_its_starter_dimmed() {
        let mut menu = PieMenu::new("Object");
        menu.add_child(Some(Entry::slice(
            Slice::new("Sit Down")
                .with_autohide(true, false)
                .with_enable(|| false),
        )));
        menu.add_child(Some(Entry::slice(
            Slice::new("Stand Up")
                .with_autohide(false, true)
                .with_enable(|| false),
        )));
        menu.add_child(Some(slice("Touch")));

        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let plan = menu.compose(pointer_at(&menu, 0.0, 60.0), Scale::default(), Instant::now());

        assert_eq!(plan.wedges[0].label, "Sit Down");
        assert!(plan.wedges[0].dimmed);
        assert_eq!(plan.wedges[1].label, "Touch");
        // a dimmed wedge is never hot
        assert_eq!(plan.hot_wedge, None);
    }

    #[test]
    fn invisible_slice_is_shown_disabled() {
        let mut menu = PieMenu::new("Object");
        menu.add_child(Some(Entry::slice(
            Slice::new("Pay").with_visible(|| false),
        )));
        // an enable predicate may still override the visibility cut
        menu.add_child(Some(Entry::slice(
            Slice::new("Touch").with_visible(|| false).with_enable(|| true),
        )));

        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let plan = menu.compose(pointer_at(&menu, 0.0, 60.0), Scale::default(), Instant::now());

        assert_eq!(plan.wedges[0].label, "Pay");
        assert!(plan.wedges[0].dimmed);
        assert_eq!(plan.hot_wedge, None);
        assert!(!plan.wedges[1].dimmed);
    }

    #[test]
    fn entries_beyond_the_eighth_wedge_are_inert() {
        let mut menu = PieMenu::new("Object");
        for i in 0..10 {
            menu.add_child(Some(slice(&format!("S{i}"))));
        }
        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let now = Instant::now();

        let plan = menu.compose(menu.center(), Scale::default(), now);
        for i in 0..WEDGE_COUNT {
            assert_eq!(plan.wedges[i].label, format!("S{i}"));
        }

        for deg in (0..360).step_by(45) {
            menu.compose(pointer_at(&menu, deg as f32, 60.0), Scale::default(), now);
            let hot = hot_label(&menu).unwrap();
            assert_ne!(hot, "S8");
            assert_ne!(hot, "S9");
        }
    }

    #[test]
    fn highlight_sound_plays_once_per_entry() {
        let sounds = Rc::new(Recorder::default());
        let mut menu = PieMenu::with_sounds("Object", sounds.clone());
        menu.add_child(Some(slice("Touch")));
        menu.add_child(Some(slice("Sit")));
        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let now = Instant::now();

        menu.compose(pointer_at(&menu, 0.0, 60.0), Scale::default(), now);
        menu.compose(pointer_at(&menu, 10.0, 60.0), Scale::default(), now);
        menu.compose(pointer_at(&menu, 45.0, 60.0), Scale::default(), now);
        menu.compose(pointer_at(&menu, 0.0, 60.0), Scale::default(), now);

        assert_eq!(
            *sounds.played.borrow(),
            vec![
                UiSound::MenuAppear,
                UiSound::SliceHighlight(0),
                UiSound::SliceHighlight(1),
                UiSound::SliceHighlight(0),
            ]
        );
    }

    #[test]
    fn enable_checks_rearm_on_open() {
        let calls = Rc::new(Cell::new(0u32));
        let calls_cb = calls.clone();
        let mut menu = PieMenu::new("Object");
        menu.add_child(Some(Entry::slice(
            Slice::new("Pay")
                .with_enable(move || {
                    calls_cb.set(calls_cb.get() + 1);
                    true
                })
                .with_check_enable_once(true),
        )));
        let mut host = TestHost::default();
        let now = Instant::now();

        menu.show(400.0, 300.0, &mut host);
        menu.compose(menu.center(), Scale::default(), now);
        menu.compose(menu.center(), Scale::default(), now);
        assert_eq!(calls.get(), 1);

        menu.hide();
        menu.show(400.0, 300.0, &mut host);
        menu.compose(menu.center(), Scale::default(), now);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn display_scale_divides_pointer_deltas() {
        let mut menu = PieMenu::new("Object");
        menu.add_child(Some(slice("Touch")));
        let mut host = TestHost::default();
        menu.show(400.0, 300.0, &mut host);
        let now = Instant::now();
        menu.compose(menu.center(), Scale::default(), now);
        menu.handle_mouse_up(now, &mut host);
        let settled = now + POPUP_TIME * 2;

        let scale = Scale::new(2.0, 2.0);
        let plan = menu.compose(pointer_at(&menu, 0.0, 80.0), scale, settled);
        assert_eq!(plan.hot_wedge, Some(0)); // 80px is 40 units, inside
        let plan = menu.compose(pointer_at(&menu, 0.0, 250.0), scale, settled);
        assert_eq!(plan.hot_wedge, None); // 125 units, outside
    }

    #[test]
    fn children_are_tracked_by_identity() {
        let a = slice("Touch");
        let twin = slice("Touch");
        let mut menu = PieMenu::new("Object");

        assert!(menu.add_child(Some(Rc::clone(&a))));
        assert!(!menu.add_child(None));
        assert_eq!(menu.len(), 1);

        assert!(!menu.remove_child(&twin));
        assert!(menu.remove_child(&a));
        assert!(menu.is_empty());
    }

    #[test]
    fn appended_submenu_shares_the_child_list() {
        let mut child = PieMenu::new("More");
        child.add_child(Some(slice("Eject")));

        let mut parent = PieMenu::new("Avatar");
        assert!(parent.append_context_submenu(Some(&child)));
        assert!(!parent.append_context_submenu(None));

        // entries added to the child later show through the parent's entry
        child.add_child(Some(slice("Freeze")));
        let entries = parent.entries();
        let list = entries.borrow();
        match &*list[0].borrow() {
            Entry::Submenu(sub) => {
                assert_eq!(sub.label, "More");
                assert_eq!(sub.entries.borrow().len(), 2);
            }
            other => panic!("expected submenu, got {other:?}"),
        }
    }
}
