use super::*;
use crate::{
    assets::{FrameImage, source::FrameLoadError},
    foundation::core::ScreenCategory,
    loader::store::Generation,
    render::surface::RasterSurface,
};

fn store_with(loaded: &[usize], failed: &[usize]) -> FrameStore {
    let mut store = FrameStore::new(142);
    let g: Generation = store.begin_cycle(ScreenCategory::Large);
    for &i in loaded {
        store.mark_in_flight(g, i);
        store.settle(g, i, Ok(FrameImage::solid(16, 9, [i as u8, 0, 0, 255])));
    }
    for &i in failed {
        store.mark_in_flight(g, i);
        store.settle(g, i, Err(FrameLoadError::Empty));
    }
    store
}

fn renderer() -> FrameRenderer<RasterSurface> {
    FrameRenderer::new(RasterSurface::with_clear(32, 18, [0, 0, 0, 255]))
}

#[test]
fn exact_frame_wins() {
    let store = store_with(&[50, 57, 60], &[]);
    let drawn = renderer().render(57, &store, FitMode::Contain).unwrap();
    assert_eq!(drawn.drawn, 57);
    assert!(!drawn.is_fallback());
}

#[test]
fn failed_target_falls_back_to_nearest_preceding_frame() {
    let store = store_with(&[50, 60], &[57]);
    let mut r = renderer();
    let drawn = r.render(57, &store, FitMode::Contain).unwrap();
    assert_eq!((drawn.requested, drawn.drawn), (57, 50));
    assert!(drawn.is_fallback());
    assert_eq!(r.surface().pixels().get_pixel(16, 9).0, [50, 0, 0, 255]);
}

#[test]
fn falls_forward_when_nothing_precedes() {
    let store = store_with(&[60, 100], &[10]);
    let drawn = renderer().render(57, &store, FitMode::Cover).unwrap();
    assert_eq!(drawn.drawn, 60);
}

#[test]
fn nothing_loaded_leaves_surface_unchanged() {
    let store = store_with(&[], &[0, 1, 2]);
    let mut r = renderer();
    assert!(r.render(57, &store, FitMode::Contain).is_none());
    assert!(r.last_drawn().is_none());
    assert!(r.surface().pixels().pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn out_of_range_target_is_clamped() {
    let store = store_with(&[141], &[]);
    let drawn = renderer().render(9_999, &store, FitMode::Contain).unwrap();
    assert_eq!((drawn.requested, drawn.drawn), (141, 141));
    assert_eq!(resolve_frame(&FrameStore::new(0), 3), None);
}

#[test]
fn paint_clears_previous_frame_before_drawing() {
    let store = store_with(&[1, 2], &[]);
    let mut r = FrameRenderer::new(RasterSurface::with_clear(18, 32, [0, 0, 0, 255]));
    r.render(1, &store, FitMode::Cover).unwrap();
    assert_eq!(r.surface().pixels().get_pixel(0, 0).0, [1, 0, 0, 255]);

    // Contain on a tall surface letterboxes: the top rows go back to the background.
    let drawn = r.render(2, &store, FitMode::Contain).unwrap();
    assert!(drawn.dest.y0 > 1.0);
    assert_eq!(r.surface().pixels().get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(r.surface().pixels().get_pixel(9, 16).0, [2, 0, 0, 255]);
    assert_eq!(r.last_drawn(), Some(drawn));
}

#[test]
fn zero_area_surface_is_a_no_op() {
    let store = store_with(&[0], &[]);
    let mut r = FrameRenderer::new(RasterSurface::new(0, 0));
    assert!(r.render(0, &store, FitMode::Cover).is_none());
    r.resize(4, 4);
    assert!(r.render(0, &store, FitMode::Cover).is_some());
}

#[test]
fn reset_blanks_the_surface_and_forgets_the_last_paint() {
    let store = store_with(&[3], &[]);
    let mut r = renderer();
    r.render(3, &store, FitMode::Contain).unwrap();
    assert!(r.surface().pixels().pixels().any(|p| p.0 == [3, 0, 0, 255]));

    r.reset();
    assert_eq!(r.last_drawn(), None);
    assert!(r.surface().pixels().pixels().all(|p| p.0 == [0, 0, 0, 255]));
}
