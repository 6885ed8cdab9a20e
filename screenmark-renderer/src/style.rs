use serde::{Deserialize, Serialize};

/// Stroke and label sizing for the overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayStyle {
    pub text_scale: f32,
    pub text_thickness: u32,
    pub text_padding: u32,
    pub thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            text_scale: 0.8,
            text_thickness: 2,
            text_padding: 3,
            thickness: 3,
        }
    }
}

impl OverlayStyle {
    /// Style proportional to the image, so marks stay legible on large
    /// screenshots and do not swallow small ones. Sizing is anchored to a
    /// 3200 px reference dimension.
    pub fn scaled_to(width: u32, height: u32) -> Self {
        let ratio = width.max(height) as f32 / 3200.0;
        Self {
            text_scale: 0.8 * ratio,
            text_thickness: ((2.0 * ratio) as u32).max(1),
            text_padding: ((3.0 * ratio) as u32).max(1),
            thickness: ((3.0 * ratio) as u32).max(1),
        }
    }

    /// Label glyph size in pixels.
    pub(crate) fn font_size(&self) -> f32 {
        (self.text_scale * 24.0).max(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_style_never_degenerates() {
        let style = OverlayStyle::scaled_to(320, 200);
        assert_eq!(style.thickness, 1);
        assert_eq!(style.text_padding, 1);
        assert!(style.font_size() >= 10.0);
    }

    #[test]
    fn scaled_style_grows_with_image() {
        let small = OverlayStyle::scaled_to(800, 600);
        let large = OverlayStyle::scaled_to(6400, 3600);
        assert!(large.thickness > small.thickness);
        assert!(large.text_scale > small.text_scale);
    }
}
