//! Radial context menu core: an eight-wedge pie menu with autohide entry
//! chains, in-place submenus and a popup open animation.
//!
//! The crate is toolkit-agnostic. It owns the menu state machine, hit
//! testing and the per-frame draw plan; windowing, rasterization and audio
//! stay behind the [`host`] ports so any renderer can drive it:
//!
//! ```no_run
//! use piemenu::config;
//! use piemenu::registry::{build_menus, CallbackRegistry, ControlVariables};
//! use std::rc::Rc;
//!
//! let mut callbacks = CallbackRegistry::new();
//! callbacks.register_commit("object.touch", |param| println!("touch {param}"));
//! callbacks.register_predicate("object.touchable", |_| true);
//!
//! let cfg = config::load_or_default();
//! let menus = build_menus(
//!     &cfg.menus,
//!     &callbacks,
//!     &ControlVariables::new(),
//!     Rc::new(piemenu::NoSound),
//! )?;
//! # Ok::<(), piemenu::registry::BuildError>(())
//! ```

mod macros;

pub mod config;
pub mod host;
pub mod menu;
pub mod registry;
pub mod theme;

pub use host::{HostWindow, NoSound, Painter, Point, Rect, Scale, SoundPlayer, UiSound};
pub use menu::{Direction, Entry, EntryRef, FramePlan, PieMenu, Slice, SliceList, Submenu};
pub use theme::PieColors;
