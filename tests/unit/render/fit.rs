use super::*;

const WIDE: Size = Size::new(1920.0, 1080.0);
const TALL: Size = Size::new(1080.0, 1920.0);

fn approx(r: Rect, expected: (f64, f64, f64, f64)) {
    let got = (r.x0, r.y0, r.width(), r.height());
    let close = |a: f64, b: f64| (a - b).abs() < 1e-6;
    assert!(
        close(got.0, expected.0)
            && close(got.1, expected.1)
            && close(got.2, expected.2)
            && close(got.3, expected.3),
        "got {got:?}, expected {expected:?}"
    );
}

#[test]
fn category_selects_mode() {
    assert_eq!(FitMode::for_category(ScreenCategory::Small), FitMode::Cover);
    assert_eq!(FitMode::for_category(ScreenCategory::Large), FitMode::Contain);
}

#[test]
fn cover_wide_image_on_tall_canvas_fits_height_and_crops_width() {
    let r = fit_rect(WIDE, TALL, FitMode::Cover).unwrap();
    let w = 1920.0 * 16.0 / 9.0;
    approx(r, ((1080.0 - w) / 2.0, 0.0, w, 1920.0));
    assert!(r.x0 < 0.0);
}

#[test]
fn cover_tall_image_on_wide_canvas_fits_width_and_crops_height() {
    let r = fit_rect(TALL, WIDE, FitMode::Cover).unwrap();
    let h = 1920.0 * 16.0 / 9.0;
    approx(r, (0.0, (1080.0 - h) / 2.0, 1920.0, h));
    assert!(r.y0 < 0.0);
}

#[test]
fn contain_wide_image_on_tall_canvas_letterboxes_top_and_bottom() {
    let r = fit_rect(WIDE, TALL, FitMode::Contain).unwrap();
    let h = 1080.0 * 9.0 / 16.0;
    approx(r, (0.0, (1920.0 - h) / 2.0, 1080.0, h));
    assert!(r.y0 > 0.0);
}

#[test]
fn contain_tall_image_on_wide_canvas_pillarboxes_left_and_right() {
    let r = fit_rect(TALL, WIDE, FitMode::Contain).unwrap();
    let w = 1080.0 * 9.0 / 16.0;
    approx(r, ((1920.0 - w) / 2.0, 0.0, w, 1080.0));
    assert!(r.x0 > 0.0);
}

#[test]
fn equal_ratios_fill_exactly_in_both_modes() {
    let canvas = Size::new(960.0, 540.0);
    for mode in [FitMode::Cover, FitMode::Contain] {
        approx(fit_rect(WIDE, canvas, mode).unwrap(), (0.0, 0.0, 960.0, 540.0));
    }
}

#[test]
fn degenerate_sizes_yield_none() {
    assert!(fit_rect(Size::ZERO, WIDE, FitMode::Cover).is_none());
    assert!(fit_rect(WIDE, Size::new(0.0, 100.0), FitMode::Contain).is_none());
    assert!(fit_rect(Size::new(f64::NAN, 1.0), WIDE, FitMode::Contain).is_none());
}
