//! Menu entries: clickable slices, separators and submenu references.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Shared handle to a single entry. Identity (`Rc::ptr_eq`) is what
/// `remove_child` and hot-entry tracking compare.
pub type EntryRef = Rc<RefCell<Entry>>;

/// Shared, ordered entry list. A menu's own list and a descended-into
/// submenu's list are both of this type, so swapping the active list is a
/// handle reassignment.
pub type SliceList = Rc<RefCell<Vec<EntryRef>>>;

pub type CommitFn = Rc<dyn Fn()>;
pub type PredicateFn = Rc<dyn Fn() -> bool>;

/// One of the up to eight ordered children of a pie menu.
pub enum Entry {
    Slice(Slice),
    /// Non-interactive spacer; consumes a wedge slot but is never hot.
    Separator,
    Submenu(Submenu),
}

impl Entry {
    pub fn slice(slice: Slice) -> EntryRef {
        Rc::new(RefCell::new(Entry::Slice(slice)))
    }

    pub fn separator() -> EntryRef {
        Rc::new(RefCell::new(Entry::Separator))
    }

    pub fn submenu(submenu: Submenu) -> EntryRef {
        Rc::new(RefCell::new(Entry::Submenu(submenu)))
    }

    pub fn as_slice(&self) -> Option<&Slice> {
        match self {
            Entry::Slice(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_slice_mut(&mut self) -> Option<&mut Slice> {
        match self {
            Entry::Slice(s) => Some(s),
            _ => None,
        }
    }

    /// Separators are never interactive; submenus always are; slices follow
    /// their enabled state.
    pub fn is_interactive(&self) -> bool {
        match self {
            Entry::Slice(s) => s.enabled(),
            Entry::Separator => false,
            Entry::Submenu(_) => true,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Entry::Slice(s) => s.label(),
            Entry::Separator => "",
            Entry::Submenu(m) => &m.label,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Slice(s) => f.debug_tuple("Slice").field(&s.label()).finish(),
            Entry::Separator => f.write_str("Separator"),
            Entry::Submenu(m) => f.debug_tuple("Submenu").field(&m.label).finish(),
        }
    }
}

/// Reference to another pie menu's entries, displayed in place when the user
/// clicks into it. The list is shared, so one submenu can sit under several
/// parent menus.
#[derive(Clone)]
pub struct Submenu {
    pub label: String,
    pub entries: SliceList,
}

impl Submenu {
    pub fn new(label: impl Into<String>, entries: SliceList) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }
}

/// A clickable wedge. Stores the action and the enable/visible predicates to
/// run when the user interacts with it; does no drawing or sound itself.
pub struct Slice {
    label: String,
    on_click: Option<CommitFn>,
    on_enable: Option<PredicateFn>,
    on_visible: Option<PredicateFn>,
    /// Host-side boolean setting bound to the enable state; forced false
    /// whenever the enable predicate says false.
    enabled_control: Option<Rc<Cell<bool>>>,
    start_autohide: bool,
    autohide: bool,
    check_enable_once: bool,
    do_update_enabled: bool,
    enabled: bool,
    visible: bool,
}

impl Slice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
            on_enable: None,
            on_visible: None,
            enabled_control: None,
            start_autohide: false,
            autohide: false,
            check_enable_once: false,
            do_update_enabled: true,
            enabled: true,
            visible: true,
        }
    }

    pub fn with_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn with_enable(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.on_enable = Some(Rc::new(f));
        self
    }

    pub fn with_visible(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.on_visible = Some(Rc::new(f));
        self
    }

    pub fn with_enabled_control(mut self, control: Rc<Cell<bool>>) -> Self {
        self.enabled_control = Some(control);
        self
    }

    pub fn with_autohide(mut self, start: bool, chained: bool) -> Self {
        self.start_autohide = start;
        self.autohide = chained;
        self
    }

    pub fn with_check_enable_once(mut self, once: bool) -> Self {
        self.check_enable_once = once;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn start_autohide(&self) -> bool {
        self.start_autohide
    }

    /// Whether this slice participates in an autohide chain; a chain starter
    /// counts as chained for the skip test.
    pub fn autohide_chained(&self) -> bool {
        self.start_autohide || self.autohide
    }

    /// Runs the enable predicate, if any, and stores the result. With
    /// `check_enable_once` set the predicate runs once per open session and
    /// the result is latched until `reset_update_enabled_check`. A bound
    /// control variable is forced false when the predicate says false;
    /// otherwise only the local flag changes.
    pub fn update_enabled(&mut self) {
        let Some(on_enable) = &self.on_enable else {
            return;
        };
        if !self.do_update_enabled {
            return;
        }

        let enabled = on_enable();
        match (&self.enabled_control, enabled) {
            (Some(control), false) => {
                control.set(false);
                self.enabled = false;
            }
            _ => self.enabled = enabled,
        }

        self.do_update_enabled = !self.check_enable_once;
    }

    /// Runs the visibility predicate, if any, and applies the result.
    pub fn update_visible(&mut self) {
        if let Some(on_visible) = &self.on_visible {
            self.visible = on_visible();
        }
    }

    /// Re-arms the enable check; called for every slice of a list when the
    /// menu opens or descends into it.
    pub fn reset_update_enabled_check(&mut self) {
        self.do_update_enabled = true;
    }

    pub fn on_commit(&self) {
        if let Some(on_click) = &self.on_click {
            on_click();
        }
    }

    pub(crate) fn click_callback(&self) -> Option<CommitFn> {
        self.on_click.clone()
    }
}
