use super::*;
use crate::foundation::core::Size;

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10" width="10" height="10"><rect width="10" height="10" fill="#000"/></svg>"##;

fn square_element() -> LogoElement {
    LogoElement::from_markup(SQUARE, Size::new(10.0, 10.0)).unwrap()
}

#[test]
fn raster_size_scales_and_caps() {
    assert_eq!(raster_size(10.0, 5.0, 2.0).unwrap(), (20, 10));
    assert_eq!(raster_size(0.4, 0.4, 1.0).unwrap(), (1, 1));
    assert!(raster_size(0.0, 5.0, 1.0).is_err());
    assert!(raster_size(10.0, 5.0, 0.0).is_err());
    assert!(raster_size(20_000.0, 5.0, 1.0).is_err());
}

#[test]
fn decode_renders_opaque_square() {
    let logo = decode_logo(SQUARE.as_bytes(), 1.0, 2.0).unwrap();
    assert_eq!((logo.width(), logo.height()), (20, 20));
    assert_eq!(logo.aspect_ratio(), 1.0);
    let px = logo.pixmap().pixel(10, 10).unwrap();
    assert_eq!(px.alpha(), 255);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_logo(b"<svg", 1.0, 1.0).is_err());
}

#[test]
fn invalid_aspect_defaults_to_one() {
    let pixmap = tiny_skia::Pixmap::new(1, 1).unwrap();
    assert_eq!(RasterizedLogo::new(pixmap.clone(), 0.0).aspect_ratio(), 1.0);
    assert_eq!(RasterizedLogo::new(pixmap, f64::NAN).aspect_ratio(), 1.0);
}

#[test]
fn one_url_per_decode_released_on_completion() {
    let mut r = LogoRasterizer::new(1.0);
    let url = r.begin(&square_element(), 7);
    assert_eq!(r.pending(), 1);
    assert_eq!(r.urls().live_count(), 1);
    assert!(r.urls().resolve(&url).is_some());

    let done = r.next_completion().unwrap();
    assert_eq!(done.generation, 7);
    assert!(done.result.is_ok());
    assert_eq!(r.urls().live_count(), 0);
    assert_eq!(r.urls().created_count(), 1);
    assert_eq!(r.urls().revoked_count(), 1);
    assert!(r.next_completion().is_none());
}

#[test]
fn failed_decode_still_releases_url() {
    let mut r = LogoRasterizer::new(1.0);
    let broken = LogoElement {
        markup: "<svg".to_owned(),
        view_box: None,
        width: None,
        height: None,
        client_size: Size::ZERO,
    };
    r.begin(&broken, 1);
    let done = r.next_completion().unwrap();
    assert!(done.result.is_err());
    assert_eq!(r.urls().live_count(), 0);
}

#[test]
fn aspect_ratio_is_derived_before_decode() {
    let mut r = LogoRasterizer::new(1.0);
    let wide = LogoElement::from_markup(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"><rect width="200" height="100"/></svg>"#,
        Size::new(200.0, 100.0),
    )
    .unwrap();
    r.begin(&wide, 1);
    assert_eq!(r.aspect_ratio(), 2.0);
    let logo = r.next_completion().unwrap().result.unwrap();
    assert_eq!(logo.aspect_ratio(), 2.0);
}
