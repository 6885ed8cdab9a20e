use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::{drawing, rect::Rect};
use screenmark_types::DetectionSet;
use tracing::instrument;

use crate::OverlayStyle;

/// Box colors, cycled by element index.
const PALETTE: [[u8; 3]; 12] = [
    [230, 25, 75],
    [60, 180, 75],
    [255, 225, 25],
    [0, 130, 200],
    [245, 130, 48],
    [145, 30, 180],
    [70, 240, 240],
    [240, 50, 230],
    [210, 245, 60],
    [250, 190, 190],
    [0, 128, 128],
    [170, 110, 40],
];

/// Rasterizes indexed overlay marks onto a screenshot.
///
/// Labels use the first sans-serif system font found; when none is
/// available the renderer still draws boxes and label tabs, just without
/// glyphs.
pub struct OverlayRenderer {
    font: Option<fontdue::Font>,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayRenderer {
    pub fn new() -> Self {
        let font = load_system_font();
        if font.is_none() {
            tracing::warn!("no system font found, overlay labels will have no digits");
        }
        Self { font }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draws every detection as an indexed, color-coded rectangle.
    ///
    /// Ratio-space boxes are mapped through the image dimensions; boxes
    /// are clamped to the canvas before drawing.
    #[instrument(level = "debug", skip_all, fields(detections = detections.len()))]
    pub fn annotate(
        &self,
        image: &DynamicImage,
        detections: &DetectionSet,
        style: &OverlayStyle,
    ) -> RgbaImage {
        let mut canvas = image.to_rgba8();
        let (width, height) = (canvas.width(), canvas.height());

        for (index, detection) in detections.iter().enumerate() {
            let Some((x, y, w, h)) = detection.bbox.pixel_rect(width, height) else {
                tracing::warn!(bbox = ?detection.bbox, "skipping zero-area box");
                continue;
            };

            let color = Rgba([
                PALETTE[index % PALETTE.len()][0],
                PALETTE[index % PALETTE.len()][1],
                PALETTE[index % PALETTE.len()][2],
                255,
            ]);

            self.draw_box(&mut canvas, x, y, w, h, style.thickness, color);
            self.draw_label(&mut canvas, &index.to_string(), x, y, style, color);
        }

        canvas
    }

    fn draw_box(
        &self,
        canvas: &mut RgbaImage,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        thickness: u32,
        color: Rgba<u8>,
    ) {
        for inset in 0..thickness {
            if w <= 2 * inset || h <= 2 * inset {
                break;
            }
            let rect = Rect::at((x + inset) as i32, (y + inset) as i32)
                .of_size(w - 2 * inset, h - 2 * inset);
            drawing::draw_hollow_rect_mut(canvas, rect, color);
        }
    }

    /// Filled tab with the element index, placed above the box top-left
    /// corner when it fits, inside it otherwise.
    fn draw_label(
        &self,
        canvas: &mut RgbaImage,
        label: &str,
        x: u32,
        y: u32,
        style: &OverlayStyle,
        color: Rgba<u8>,
    ) {
        let font_size = style.font_size();
        let padding = style.text_padding;

        let (text_width, ascent) = self.measure(label, font_size);
        let tab_w = (text_width.ceil() as u32 + 2 * padding).max(1);
        let tab_h = (font_size.ceil() as u32 + 2 * padding).max(1);

        let tab_x = x.min(canvas.width().saturating_sub(tab_w));
        let tab_y = if y >= tab_h { y - tab_h } else { y };

        let tab = Rect::at(tab_x as i32, tab_y as i32).of_size(
            tab_w.min(canvas.width() - tab_x),
            tab_h.min(canvas.height() - tab_y),
        );
        drawing::draw_filled_rect_mut(canvas, tab, color);

        if let Some(font) = &self.font {
            let baseline = tab_y as i32 + padding as i32 + ascent.ceil() as i32;
            let mut pen_x = tab_x as f32 + padding as f32;
            for ch in label.chars() {
                let (metrics, coverage) = font.rasterize(ch, font_size);
                let glyph_x = pen_x as i32 + metrics.xmin;
                let glyph_y = baseline - metrics.height as i32 - metrics.ymin;
                blend_glyph(canvas, &coverage, metrics.width, glyph_x, glyph_y);
                pen_x += metrics.advance_width;
            }
        }
    }

    /// Label width and baseline ascent; falls back to a fixed-advance
    /// estimate when no font is loaded.
    fn measure(&self, label: &str, font_size: f32) -> (f32, f32) {
        match &self.font {
            Some(font) => {
                let width = label
                    .chars()
                    .map(|ch| font.metrics(ch, font_size).advance_width)
                    .sum();
                let ascent = font
                    .horizontal_line_metrics(font_size)
                    .map_or(font_size * 0.8, |m| m.ascent);
                (width, ascent)
            }
            None => (label.len() as f32 * font_size * 0.6, font_size * 0.8),
        }
    }
}

/// Alpha-blends a glyph coverage bitmap in white over the label tab.
fn blend_glyph(canvas: &mut RgbaImage, coverage: &[u8], glyph_width: usize, x: i32, y: i32) {
    if glyph_width == 0 {
        return;
    }
    for (i, &alpha) in coverage.iter().enumerate() {
        if alpha == 0 {
            continue;
        }
        let px = x + (i % glyph_width) as i32;
        let py = y + (i / glyph_width) as i32;
        if px < 0 || py < 0 || px >= canvas.width() as i32 || py >= canvas.height() as i32 {
            continue;
        }
        let pixel = canvas.get_pixel_mut(px as u32, py as u32);
        let a = alpha as u32;
        for channel in 0..3 {
            let bg = pixel.0[channel] as u32;
            pixel.0[channel] = ((bg * (255 - a) + 255 * a) / 255) as u8;
        }
    }
}

fn load_system_font() -> Option<fontdue::Font> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..Default::default()
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;

    db.with_face_data(id, |data, index| {
        let settings = fontdue::FontSettings {
            collection_index: index,
            ..Default::default()
        };
        fontdue::Font::from_bytes(data.to_vec(), settings).ok()
    })?
}
