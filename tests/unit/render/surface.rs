use super::*;
use crate::render::fit::{FitMode, fit_rect};

#[test]
fn resize_reallocates_with_background() {
    let mut s = RasterSurface::with_clear(4, 4, [1, 2, 3, 255]);
    s.resize(8, 2);
    assert_eq!(s.dimensions(), (8, 2));
    assert_eq!(s.size(), Size::new(8.0, 2.0));
    assert_eq!(s.pixels().get_pixel(7, 1).0, [1, 2, 3, 255]);
}

#[test]
fn draw_scales_and_crops_into_surface() {
    let mut s = RasterSurface::with_clear(10, 10, [0, 0, 0, 255]);
    let red = FrameImage::solid(2, 1, [255, 0, 0, 255]);

    // Letterboxed band through the middle.
    s.draw_image(&red, Rect::new(0.0, 2.5, 10.0, 7.5));
    assert_eq!(s.pixels().get_pixel(5, 0).0, [0, 0, 0, 255]);
    assert_eq!(s.pixels().get_pixel(5, 5).0, [255, 0, 0, 255]);
    assert_eq!(s.pixels().get_pixel(5, 9).0, [0, 0, 0, 255]);

    // Overflowing destination is cropped, not rejected.
    s.clear();
    s.draw_image(&red, Rect::new(-10.0, 0.0, 20.0, 10.0));
    assert_eq!(s.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(s.pixels().get_pixel(9, 9).0, [255, 0, 0, 255]);
}

#[test]
fn undrawable_inputs_leave_pixels_untouched() {
    let mut s = RasterSurface::with_clear(3, 3, [7, 7, 7, 255]);
    s.draw_image(&FrameImage::new(2, 2, vec![0; 3]), Rect::new(0.0, 0.0, 3.0, 3.0));
    s.draw_image(
        &FrameImage::solid(1, 1, [255, 255, 255, 255]),
        Rect::new(0.0, 0.0, 0.2, 3.0),
    );
    assert!(s.pixels().pixels().all(|p| p.0 == [7, 7, 7, 255]));
}

#[test]
fn save_png_round_trips_dimensions() {
    let dir = std::env::temp_dir().join(format!("framescroll_surface_{}", std::process::id()));
    let path = dir.join("out.png");
    RasterSurface::new(5, 3).save_png(&path).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (5, 3));
    std::fs::remove_dir_all(&dir).ok();
}

fn two_tone_column() -> FrameImage {
    // 4x160: top half red, bottom half blue.
    let mut rgba = Vec::with_capacity(4 * 160 * 4);
    for y in 0..160 {
        let px = if y < 80 { [255, 0, 0, 255] } else { [0, 0, 255, 255] };
        for _ in 0..4 {
            rgba.extend_from_slice(&px);
        }
    }
    FrameImage::new(4, 160, rgba)
}

#[test]
fn cover_overflow_samples_only_the_visible_rows() {
    let frame = two_tone_column();
    let canvas = Size::new(1440.0, 900.0);
    let dest = fit_rect(Size::new(4.0, 160.0), canvas, FitMode::Cover).unwrap();
    assert!(dest.height() > 50_000.0);

    let region = visible_region(&frame, dest, canvas).unwrap();
    assert_eq!((region.out_x, region.out_y), (0, 0));
    assert_eq!((region.out_w, region.out_h), (1440, 900));
    assert_eq!((region.src_x, region.src_w), (0, 4));
    assert!(region.src_h <= 4, "sampled {} source rows", region.src_h);
    assert!(region.src_y <= 79 && region.src_y + region.src_h >= 81);

    let mut s = RasterSurface::with_clear(1440, 900, [0, 0, 0, 255]);
    s.draw_image(&frame, dest);
    assert_eq!(s.pixels().get_pixel(720, 0).0, [255, 0, 0, 255]);
    assert_eq!(s.pixels().get_pixel(720, 899).0, [0, 0, 255, 255]);
}

#[test]
fn destination_off_the_surface_draws_nothing() {
    let frame = FrameImage::solid(2, 2, [255, 255, 255, 255]);
    let size = Size::new(10.0, 10.0);
    assert_eq!(visible_region(&frame, Rect::new(20.0, 0.0, 30.0, 10.0), size), None);
    assert_eq!(
        visible_region(&frame, Rect::new(f64::NAN, 0.0, 5.0, 5.0), size),
        None
    );
}
