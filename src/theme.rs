//! Menu color set and the settings-driven override math.

use crate::config::ColorSettings;
use palette::Srgba;

/// Colors the view draws with, already resolved against user settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PieColors {
    pub background: Srgba,
    pub border: Srgba,
    pub highlight: Srgba,
    pub line: Srgba,
    pub text: Srgba,
}

impl Default for PieColors {
    fn default() -> Self {
        let background = Srgba::new(0.0, 0.0, 0.0, 0.5);
        Self {
            border: scale_alpha(background, 0.3),
            background,
            highlight: Srgba::new(0.72, 0.61, 0.46, 0.5),
            line: Srgba::new(0.8, 0.8, 0.8, 0.5),
            text: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl PieColors {
    /// Applies user color settings on top of the defaults. Without the
    /// override flag the border keeps 30% of the background's alpha; with it,
    /// opacity scales the background and fade controls how much of that
    /// alpha the border keeps.
    pub fn resolve(settings: &ColorSettings) -> Self {
        let mut colors = Self::default();
        if !settings.override_colors {
            return colors;
        }
        if let Some(background) = &settings.background {
            colors.background = background.0;
        }
        if let Some(highlight) = &settings.highlight {
            colors.highlight = highlight.0;
        }
        colors.background = scale_alpha(colors.background, settings.opacity);
        colors.border = scale_alpha(colors.background, 1.0 - settings.fade);
        colors
    }
}

pub(crate) fn scale_alpha(c: Srgba, factor: f32) -> Srgba {
    Srgba::new(c.red, c.green, c.blue, c.alpha * factor)
}
