use eframe::egui::Color32;
use palette::{Srgb, Srgba, WithAlpha};

use crate::engine::highlight::Highlight;
use crate::i18n::Translations;

// ---------------------------------------------------------------------------
// Bar colours per highlight class
// ---------------------------------------------------------------------------

const ORANGE: Srgb<u8> = Srgb::new(255, 165, 0);
const GREEN: Srgb<u8> = Srgb::new(46, 204, 113);
const RED: Srgb<u8> = Srgb::new(231, 76, 60);
const BLUE: Srgb<u8> = Srgb::new(54, 162, 235);
const PURPLE: Srgb<u8> = Srgb::new(153, 50, 204);

fn to_color32(c: Srgba<u8>) -> Color32 {
    let (r, g, b, a) = c.into_components();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn base(h: Highlight) -> Srgb<u8> {
    match h {
        Highlight::Selected => ORANGE,
        Highlight::Max => GREEN,
        Highlight::Min => RED,
        Highlight::Default => BLUE,
    }
}

/// Bar fill: 60% opaque for highlighted bars, 20% for the rest.
pub fn fill(h: Highlight) -> Color32 {
    let alpha = match h {
        Highlight::Default => 51,
        _ => 153,
    };
    to_color32(base(h).with_alpha(alpha))
}

/// Bar outline, always opaque.
pub fn stroke(h: Highlight) -> Color32 {
    to_color32(base(h).with_alpha(255))
}

/// Colour of the full-average reference line.
pub fn average_line() -> Color32 {
    to_color32(PURPLE.with_alpha(255))
}

/// Legend entries (label → fill, stroke) in precedence order.
pub fn legend_entries(tr: &Translations) -> Vec<(&'static str, Color32, Color32)> {
    [
        (tr.legend_selected, Highlight::Selected),
        (tr.legend_max, Highlight::Max),
        (tr.legend_min, Highlight::Min),
        (tr.legend_default, Highlight::Default),
    ]
    .into_iter()
    .map(|(label, h)| (label, fill(h), stroke(h)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_is_opaque_base_colour() {
        assert_eq!(stroke(Highlight::Selected), Color32::from_rgb(255, 165, 0));
        assert_eq!(stroke(Highlight::Max), Color32::from_rgb(46, 204, 113));
        assert_eq!(stroke(Highlight::Min), Color32::from_rgb(231, 76, 60));
        assert_eq!(stroke(Highlight::Default), Color32::from_rgb(54, 162, 235));
    }

    #[test]
    fn default_bars_are_more_transparent() {
        assert_eq!(fill(Highlight::Default).a(), 51);
        assert_eq!(fill(Highlight::Max).a(), 153);
        assert!(fill(Highlight::Default).a() < fill(Highlight::Selected).a());
    }

    #[test]
    fn legend_has_one_entry_per_class() {
        let entries = legend_entries(&crate::i18n::EN);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].0, "Selected year");
    }
}
