//! Collaborator ports the menu core calls into.
//!
//! The surrounding toolkit owns windowing, rasterization and audio; the core
//! only decides *what* to draw, *which* sound event fires and *where* the
//! pointer should be. Everything it needs from the outside is behind the
//! traits in this module, so tests can substitute recording stubs.

use derive_more::Display;
use palette::Srgba;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Per-axis display scale, physical pixels per UI unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// Screen-space rectangle available for menus, y axis pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn top(&self) -> f32 {
        self.bottom + self.height
    }
}

/// Named UI sound events the menu can trigger.
///
/// The display form is the event name the host's sound system resolves; the
/// eight highlight sounds are distinct per wedge index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UiSound {
    #[display("UISndPieMenuAppear")]
    MenuAppear,
    #[display("UISndPieMenuHide")]
    MenuHide,
    #[display("UISndClickRelease")]
    ClickRelease,
    #[display("UISndPieMenuSliceHighlight{_0}")]
    SliceHighlight(u8),
}

/// Sound playback port, injected into the menu at construction time.
pub trait SoundPlayer {
    fn play(&self, sound: UiSound);
}

/// Silent default for hosts without audio and for tests that don't care.
pub struct NoSound;

impl SoundPlayer for NoSound {
    fn play(&self, _sound: UiSound) {}
}

/// Windowing services the menu needs while showing, hiding and handling
/// clicks. Implemented by the host toolkit's menu container.
pub trait HostWindow {
    /// Rectangle menus may occupy, in screen coordinates.
    fn menu_rect(&self) -> Rect;

    fn display_scale(&self) -> Scale {
        Scale::default()
    }

    /// Move the pointer to a screen position.
    fn warp_pointer(&mut self, pos: Point);

    /// Acquire or release exclusive mouse input.
    fn set_mouse_capture(&mut self, captured: bool);

    fn has_mouse_capture(&self) -> bool;

    /// Host-side sweep that dismisses every open menu.
    fn hide_all_menus(&mut self) {}
}

/// Immediate-mode 2D drawing port. All coordinates are relative to the menu
/// center with the y axis pointing up; angles are radians, counterclockwise
/// from the positive x axis.
pub trait Painter {
    /// Filled annulus between `inner` and `outer` radius.
    fn washer(&mut self, outer: f32, inner: f32, steps: u32, fill: Srgba, border: Srgba);

    /// Filled annulus sector between two angles.
    fn washer_segment(
        &mut self,
        outer: f32,
        inner: f32,
        start_angle: f32,
        end_angle: f32,
        steps: u32,
        fill: Srgba,
        border: Srgba,
    );

    /// Text centered on `at`, drawn with a soft drop shadow.
    fn label(&mut self, text: &str, at: Point, color: Srgba);
}
