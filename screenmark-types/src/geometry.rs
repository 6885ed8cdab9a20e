use serde::{Deserialize, Serialize};

/// Coordinate space a box is expressed in.
///
/// `Pixel` is `xyxy` in image pixels, `Ratio` is normalized to `[0, 1]`
/// over the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CoordSpace {
    Pixel,
    Ratio,
}

/// Axis-aligned rectangle with an explicit coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub space: CoordSpace,
}

impl BoundingBox {
    pub fn pixel(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            space: CoordSpace::Pixel,
        }
    }

    pub fn ratio(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            space: CoordSpace::Ratio,
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Finite coordinates and non-inverted edges.
    pub fn is_well_formed(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite())
            && self.x2 >= self.x1
            && self.y2 >= self.y1
    }

    /// Clamps all coordinates into `[0, width] x [0, height]`.
    ///
    /// Ratio-space boxes clamp against `(1.0, 1.0)`.
    pub fn clamped(&self, width: f32, height: f32) -> Self {
        Self {
            x1: self.x1.clamp(0.0, width),
            y1: self.y1.clamp(0.0, height),
            x2: self.x2.clamp(0.0, width),
            y2: self.y2.clamp(0.0, height),
            space: self.space,
        }
    }

    /// Area of the intersection, zero when the boxes do not overlap or
    /// live in different coordinate spaces.
    pub fn intersection(&self, other: &Self) -> f32 {
        if self.space != other.space {
            return 0.0;
        }
        let w = self.x2.min(other.x2) - self.x1.max(other.x1);
        let h = self.y2.min(other.y2) - self.y1.max(other.y1);
        w.max(0.0) * h.max(0.0)
    }

    /// Intersection-over-union of two same-space boxes.
    pub fn iou(&self, other: &Self) -> f32 {
        let intersection = self.intersection(other);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }

    pub fn to_ratio(&self, width: u32, height: u32) -> Self {
        match self.space {
            CoordSpace::Ratio => *self,
            CoordSpace::Pixel => Self {
                x1: self.x1 / width as f32,
                y1: self.y1 / height as f32,
                x2: self.x2 / width as f32,
                y2: self.y2 / height as f32,
                space: CoordSpace::Ratio,
            },
        }
    }

    pub fn to_pixel(&self, width: u32, height: u32) -> Self {
        match self.space {
            CoordSpace::Pixel => *self,
            CoordSpace::Ratio => Self {
                x1: self.x1 * width as f32,
                y1: self.y1 * height as f32,
                x2: self.x2 * width as f32,
                y2: self.y2 * height as f32,
                space: CoordSpace::Pixel,
            },
        }
    }

    /// Integer `(x, y, w, h)` crop rect clamped to the image, `None` when
    /// the clamped box has no area.
    pub fn pixel_rect(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let px = self.to_pixel(width, height).clamped(width as f32, height as f32);
        let x = px.x1.floor() as u32;
        let y = px.y1.floor() as u32;
        let w = (px.x2.ceil() as u32).min(width).saturating_sub(x);
        let h = (px.y2.ceil() as u32).min(height).saturating_sub(y);
        (w > 0 && h > 0).then_some((x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let a = BoundingBox::pixel(10.0, 10.0, 50.0, 50.0);
        assert_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = BoundingBox::pixel(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::pixel(100.0, 100.0, 110.0, 110.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn iou_across_spaces_is_zero() {
        let a = BoundingBox::pixel(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::ratio(0.0, 0.0, 1.0, 1.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn nested_boxes_overlap_strongly() {
        let outer = BoundingBox::pixel(10.0, 10.0, 50.0, 50.0);
        let inner = BoundingBox::pixel(12.0, 12.0, 48.0, 48.0);
        let iou = outer.iou(&inner);
        assert!(iou > 0.7, "expected strong overlap, got {iou}");
    }

    #[test]
    fn inverted_box_is_malformed() {
        let b = BoundingBox::pixel(50.0, 50.0, 10.0, 10.0);
        assert!(!b.is_well_formed());
        assert_eq!(b.area(), 0.0);
    }

    #[test]
    fn nan_box_is_malformed() {
        let b = BoundingBox::pixel(f32::NAN, 0.0, 10.0, 10.0);
        assert!(!b.is_well_formed());
    }

    #[test]
    fn clamp_keeps_box_in_bounds() {
        let b = BoundingBox::pixel(-5.0, -5.0, 2000.0, 30.0).clamped(100.0, 100.0);
        assert_eq!((b.x1, b.y1, b.x2, b.y2), (0.0, 0.0, 100.0, 30.0));
    }

    #[test]
    fn ratio_round_trip() {
        let b = BoundingBox::pixel(10.0, 20.0, 30.0, 40.0);
        let back = b.to_ratio(100, 200).to_pixel(100, 200);
        assert!((back.x1 - 10.0).abs() < 1e-4);
        assert!((back.y2 - 40.0).abs() < 1e-4);
    }

    #[test]
    fn pixel_rect_clamps_and_rejects_degenerate() {
        let b = BoundingBox::pixel(90.0, 90.0, 200.0, 200.0);
        assert_eq!(b.pixel_rect(100, 100), Some((90, 90, 10, 10)));

        let empty = BoundingBox::pixel(150.0, 150.0, 200.0, 200.0);
        assert_eq!(empty.pixel_rect(100, 100), None);
    }
}
