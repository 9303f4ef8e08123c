use std::time::Duration;

pub mod geometry;
pub mod model;
pub mod slice;
pub mod view;

pub use geometry::Direction;
pub use model::{FramePlan, PieMenu, WedgePlan};
pub use slice::{Entry, EntryRef, SliceList, Slice, Submenu};
pub use view::draw;

pub const WEDGE_COUNT: usize = 8;
pub const INNER_RADIUS: f32 = 20.0; // dead zone around the click point
pub const OUTER_RADIUS: f32 = 96.0; // selection distance
pub const POPUP_FACTOR: f32 = 1.7; // size multiplier right after opening
pub const POPUP_TIME: Duration = Duration::from_millis(250); // shrink back to 1.0
pub const SEGMENT_GAP: f32 = 0.02; // angular inset keeping divider lines visible
pub const DISABLED_ALPHA: f32 = 0.3; // label fade for disabled entries
