//! Host-side handler registration and the factory that turns menu
//! declarations into live pie menus.

use crate::config::{CallbackDef, CallbackName, ControlName, EntryDef, MenuDef, MenuName, SliceDef};
use crate::host::SoundPlayer;
use crate::menu::{Entry, EntryRef, PieMenu, Slice, Submenu};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

pub type CommitHandler = Rc<dyn Fn(&str)>;
pub type PredicateHandler = Rc<dyn Fn(&str) -> bool>;

/// Named handlers the configuration can bind slices to. Commit handlers and
/// predicates live in separate namespaces.
#[derive(Default)]
pub struct CallbackRegistry {
    commit: HashMap<CallbackName, CommitHandler>,
    predicate: HashMap<CallbackName, PredicateHandler>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_commit(&mut self, name: impl Into<String>, f: impl Fn(&str) + 'static) {
        self.commit.insert(CallbackName::new(name), Rc::new(f));
    }

    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&str) -> bool + 'static,
    ) {
        self.predicate.insert(CallbackName::new(name), Rc::new(f));
    }

    pub fn commit(&self, name: &CallbackName) -> Option<CommitHandler> {
        self.commit.get(name).cloned()
    }

    pub fn predicate(&self, name: &CallbackName) -> Option<PredicateHandler> {
        self.predicate.get(name).cloned()
    }
}

/// Shared boolean settings the host can observe; an enable predicate bound
/// to one forces it false whenever the predicate fails.
#[derive(Default)]
pub struct ControlVariables {
    vars: HashMap<ControlName, Rc<Cell<bool>>>,
}

impl ControlVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>) -> Rc<Cell<bool>> {
        Rc::clone(
            self.vars
                .entry(ControlName::new(name))
                .or_insert_with(|| Rc::new(Cell::new(true))),
        )
    }

    pub fn get(&self, name: &ControlName) -> Option<Rc<Cell<bool>>> {
        self.vars.get(name).cloned()
    }
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("menu '{0}' is declared more than once")]
    DuplicateMenu(MenuName),
    #[error("submenu entry refers to undeclared menu '{0}'")]
    UnknownMenu(MenuName),
    #[error("unknown click handler '{0}'")]
    UnknownCommitHandler(CallbackName),
    #[error("unknown predicate handler '{0}'")]
    UnknownPredicateHandler(CallbackName),
}

/// Builds every declared menu and wires up handlers and control variables.
///
/// Two passes: all menus are created first so submenu entries can refer to
/// menus declared in any order, including mutually. A submenu entry shares
/// the target menu's entry list rather than copying it.
pub fn build_menus(
    defs: &[MenuDef],
    callbacks: &CallbackRegistry,
    controls: &ControlVariables,
    sounds: Rc<dyn SoundPlayer>,
) -> Result<HashMap<MenuName, PieMenu>, BuildError> {
    let mut menus: HashMap<MenuName, PieMenu> = HashMap::new();
    for def in defs {
        if menus.contains_key(&def.name) {
            return Err(BuildError::DuplicateMenu(def.name.clone()));
        }
        menus.insert(
            def.name.clone(),
            PieMenu::with_sounds(def.label.clone(), Rc::clone(&sounds)),
        );
    }

    for def in defs {
        let list = menus[&def.name].entries();
        for entry in &def.entries {
            let built: EntryRef = match entry {
                EntryDef::PieSlice(slice) => Entry::slice(build_slice(slice, callbacks, controls)?),
                EntryDef::PieSeparator => Entry::separator(),
                EntryDef::PieMenu(sub) => {
                    let target = menus
                        .get(&sub.name)
                        .ok_or_else(|| BuildError::UnknownMenu(sub.name.clone()))?;
                    let label = sub
                        .label
                        .clone()
                        .unwrap_or_else(|| target.label().to_string());
                    Entry::submenu(Submenu::new(label, target.entries()))
                }
            };
            list.borrow_mut().push(built);
        }
    }

    Ok(menus)
}

fn build_slice(
    def: &SliceDef,
    callbacks: &CallbackRegistry,
    controls: &ControlVariables,
) -> Result<Slice, BuildError> {
    let mut slice = Slice::new(def.label.clone())
        .with_autohide(def.start_autohide, def.autohide)
        .with_check_enable_once(def.check_enable_once);

    if let Some(cb) = &def.on_click {
        let f = callbacks
            .commit(&cb.function)
            .ok_or_else(|| BuildError::UnknownCommitHandler(cb.function.clone()))?;
        slice = slice.with_click(bind(f, cb));
    }
    if let Some(cb) = &def.on_enable {
        let f = lookup_predicate(callbacks, cb)?;
        slice = slice.with_enable(bind_predicate(f, cb));
        if let Some(name) = &cb.control {
            match controls.get(name) {
                Some(control) => slice = slice.with_enabled_control(control),
                None => log::warn!(
                    "slice '{}' refers to undeclared control variable '{name}'",
                    def.label
                ),
            }
        }
    }
    if let Some(cb) = &def.on_visible {
        let f = lookup_predicate(callbacks, cb)?;
        slice = slice.with_visible(bind_predicate(f, cb));
    }

    Ok(slice)
}

fn lookup_predicate(
    callbacks: &CallbackRegistry,
    cb: &CallbackDef,
) -> Result<PredicateHandler, BuildError> {
    callbacks
        .predicate(&cb.function)
        .ok_or_else(|| BuildError::UnknownPredicateHandler(cb.function.clone()))
}

fn bind(f: CommitHandler, cb: &CallbackDef) -> impl Fn() + 'static {
    let parameter = cb.parameter.clone();
    move || f(&parameter)
}

fn bind_predicate(f: PredicateHandler, cb: &CallbackDef) -> impl Fn() -> bool + 'static {
    let parameter = cb.parameter.clone();
    move || f(&parameter)
}
