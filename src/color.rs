use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Colour names → Color32
// ---------------------------------------------------------------------------

/// Resolve a CSS/SVG colour name (`"blue"`, `"red"`, `"steelblue"`, …).
///
/// Unknown names fall back to grey so a typo never hides a series.
pub fn named_color(name: &str) -> Color32 {
    palette::named::from_str(&name.trim().to_ascii_lowercase())
        .map(|c| Color32::from_rgb(c.red, c.green, c.blue))
        .unwrap_or(Color32::GRAY)
}

/// A lighter variant of `color` for the hover/legend text on dark themes.
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let rgb = Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    );
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
    let out: Srgb = hsl.into_color();
    Color32::from_rgb(
        (out.red * 255.0).round() as u8,
        (out.green * 255.0).round() as u8,
        (out.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_series_colours() {
        assert_eq!(named_color("blue"), Color32::from_rgb(0, 0, 255));
        assert_eq!(named_color(" Red "), Color32::from_rgb(255, 0, 0));
        assert_eq!(named_color("not-a-colour"), Color32::GRAY);
    }

    #[test]
    fn lighten_raises_lightness() {
        let light = lighten(Color32::from_rgb(0, 0, 255), 0.2);
        assert_eq!(light.b(), 255);
        assert!(light.r() > 0 && light.g() > 0);
        assert_eq!(lighten(Color32::WHITE, 0.3), Color32::WHITE);
    }
}
