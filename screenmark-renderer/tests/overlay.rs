use image::{DynamicImage, Rgba, RgbaImage};
use screenmark_renderer::{OverlayRenderer, OverlayStyle};
use screenmark_types::{BoundingBox, Detection, DetectionSet};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn black_screen(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, BLACK))
}

#[test]
fn draws_box_borders_and_leaves_interior() {
    let image = black_screen(100, 100);
    let detections: DetectionSet =
        vec![Detection::icon(BoundingBox::pixel(10.0, 10.0, 50.0, 50.0), 0.9)].into();

    let style = OverlayStyle {
        thickness: 2,
        ..Default::default()
    };
    let canvas = OverlayRenderer::new().annotate(&image, &detections, &style);

    assert_eq!((canvas.width(), canvas.height()), (100, 100));
    // Left border stroke is painted, the interior is not.
    assert_ne!(*canvas.get_pixel(10, 30), BLACK);
    assert_ne!(*canvas.get_pixel(11, 30), BLACK);
    assert_eq!(*canvas.get_pixel(45, 45), BLACK);
}

#[test]
fn ratio_boxes_map_through_image_dimensions() {
    let image = black_screen(200, 100);
    let detections: DetectionSet =
        vec![Detection::icon(BoundingBox::ratio(0.25, 0.3, 0.75, 0.9), 0.9)].into();

    let canvas = OverlayRenderer::new().annotate(&image, &detections, &OverlayStyle::default());

    // x1 = 0.25 * 200, y spans 30..90.
    assert_ne!(*canvas.get_pixel(50, 60), BLACK);
    assert_eq!(*canvas.get_pixel(120, 60), BLACK);
}

#[test]
fn empty_set_returns_image_unchanged() {
    let image = black_screen(64, 64);
    let canvas =
        OverlayRenderer::new().annotate(&image, &DetectionSet::new(), &OverlayStyle::default());
    assert_eq!(canvas, image.to_rgba8());
}

#[test]
fn out_of_bounds_boxes_are_clamped() {
    let image = black_screen(50, 50);
    let detections: DetectionSet = vec![
        Detection::icon(BoundingBox::pixel(-20.0, -20.0, 500.0, 500.0), 0.9),
        Detection::icon(BoundingBox::pixel(200.0, 200.0, 300.0, 300.0), 0.9),
    ]
    .into();

    // Must not panic; the fully out-of-bounds box is skipped.
    let canvas = OverlayRenderer::new().annotate(&image, &detections, &OverlayStyle::default());
    assert_ne!(*canvas.get_pixel(0, 25), BLACK);
}

#[test]
fn distinct_indices_get_distinct_colors() {
    let image = black_screen(200, 50);
    let detections: DetectionSet = vec![
        Detection::icon(BoundingBox::pixel(10.0, 30.0, 40.0, 45.0), 0.9),
        Detection::icon(BoundingBox::pixel(100.0, 30.0, 140.0, 45.0), 0.9),
    ]
    .into();

    let style = OverlayStyle {
        thickness: 1,
        ..Default::default()
    };
    let canvas = OverlayRenderer::new().annotate(&image, &detections, &style);

    assert_ne!(canvas.get_pixel(10, 40), canvas.get_pixel(100, 40));
}
