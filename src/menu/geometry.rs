//! Wedge math: pointer-angle to wedge-index mapping and label anchors.

use super::{INNER_RADIUS, OUTER_RADIUS, WEDGE_COUNT};
use crate::host::Point;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f32::consts::{PI, TAU};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// The eight wedge directions in hit-test order: wedge 0 points east and the
/// index grows counterclockwise (y axis up).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(serialize = "East", serialize = "e", serialize = "0")]
    East,
    #[strum(serialize = "NorthEast", serialize = "ne", serialize = "1")]
    NorthEast,
    #[strum(serialize = "North", serialize = "n", serialize = "2")]
    North,
    #[strum(serialize = "NorthWest", serialize = "nw", serialize = "3")]
    NorthWest,
    #[strum(serialize = "West", serialize = "w", serialize = "4")]
    West,
    #[strum(serialize = "SouthWest", serialize = "sw", serialize = "5")]
    SouthWest,
    #[strum(serialize = "South", serialize = "s", serialize = "6")]
    South,
    #[strum(serialize = "SouthEast", serialize = "se", serialize = "7")]
    SouthEast,
}

// label text positions around the ring, one per wedge index
const ANCHOR_X: [f32; WEDGE_COUNT] = [64.0, 45.0, 0.0, -45.0, -63.0, -45.0, 0.0, 45.0];
const ANCHOR_Y: [f32; WEDGE_COUNT] = [0.0, 44.0, 73.0, 44.0, 0.0, -44.0, -73.0, -44.0];

impl Direction {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx % WEDGE_COUNT)
    }

    /// Label anchor relative to the menu center.
    pub fn anchor(&self) -> Point {
        let i = self.as_index();
        Point::new(ANCHOR_X[i], ANCHOR_Y[i])
    }
}

/// Starting angle of a wedge's arc; the wedge spans one eighth of the circle
/// from here, centered on `index * 45°`.
pub fn wedge_start_angle(index: usize) -> f32 {
    PI / 4.0 * index as f32 - PI / 8.0
}

/// Maps a pointer position (relative to the menu center, scale-corrected)
/// onto a wedge index.
///
/// Inside the inner dead zone nothing is hit. Outside the popup-scaled outer
/// radius nothing is hit either, unless the menu is still in its borderless
/// first-click state, where any distance resolves to a wedge. The half-wedge
/// rotation aligns wedge centers, not boundaries, with the raw angle formula.
pub fn wedge_at(rel: Point, factor: f32, first_click: bool) -> Option<usize> {
    let distance = rel.x.hypot(rel.y);
    if distance <= INNER_RADIUS {
        return None;
    }
    if distance >= OUTER_RADIUS * factor && !first_click {
        return None;
    }

    let mut angle = (rel.x / distance).acos();
    if rel.y < 0.0 {
        angle = TAU - angle;
    }
    angle += PI / 8.0;

    Some((WEDGE_COUNT as f32 * angle / TAU) as usize % WEDGE_COUNT)
}
