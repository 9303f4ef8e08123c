//! Turns a composed frame into painter calls.
//!
//! Draw order matters for the translucent fills: background ring first, then
//! per wedge the highlight, divider and label, then the outer border ring
//! (absent while the menu is in its borderless first-click state) and the
//! small ring around the dead zone.

use super::geometry::{self, Direction};
use super::model::FramePlan;
use super::{DISABLED_ALPHA, INNER_RADIUS, OUTER_RADIUS, SEGMENT_GAP};
use crate::host::Painter;
use crate::theme::{self, PieColors};
use std::f32::consts::PI;

pub fn draw(plan: &FramePlan, colors: &PieColors, painter: &mut dyn Painter) {
    let outer = OUTER_RADIUS * plan.factor;
    let border = if plan.first_click {
        theme::scale_alpha(colors.border, 0.0)
    } else {
        colors.border
    };

    painter.washer(outer, INNER_RADIUS, 32, colors.background, border);

    for (num, wedge) in plan.wedges.iter().enumerate() {
        let start = geometry::wedge_start_angle(num);

        if plan.hot_wedge == Some(num) {
            painter.washer_segment(
                outer,
                INNER_RADIUS,
                start + SEGMENT_GAP,
                start + PI / 4.0 - SEGMENT_GAP,
                4,
                colors.highlight,
                border,
            );
        }

        painter.washer_segment(
            outer,
            INNER_RADIUS,
            start - SEGMENT_GAP,
            start + SEGMENT_GAP,
            4,
            colors.line,
            border,
        );

        let mut text = colors.text;
        if wedge.dimmed {
            text.alpha *= DISABLED_ALPHA;
        }
        if let Some(dir) = Direction::from_index(num) {
            painter.label(&wedge.label, dir.anchor(), text);
        }
    }

    if !plan.first_click {
        painter.washer(outer, outer - 2.0, 32, colors.line, border);
    }
    painter.washer(INNER_RADIUS + 1.0, INNER_RADIUS - 1.0, 16, border, colors.line);
}
