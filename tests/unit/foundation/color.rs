use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgba8::parse_css("#ffffff").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::parse_css("#f00").unwrap(), Rgba8::rgba(255, 0, 0, 255));
    assert_eq!(
        Rgba8::parse_css("#0000ff80").unwrap(),
        Rgba8::rgba(0, 0, 255, 128)
    );
    assert_eq!(Rgba8::parse_css("#1238").unwrap(), Rgba8::rgba(0x11, 0x22, 0x33, 0x88));
}

#[test]
fn parses_rgb_functions() {
    assert_eq!(
        Rgba8::parse_css("rgb(10, 20, 30)").unwrap(),
        Rgba8::rgba(10, 20, 30, 255)
    );
    assert_eq!(
        Rgba8::parse_css("rgba(10 20 30 / 0.5)").unwrap(),
        Rgba8::rgba(10, 20, 30, 128)
    );
    assert_eq!(
        Rgba8::parse_css("RGB(100%, 0%, 0%)").unwrap(),
        Rgba8::rgba(255, 0, 0, 255)
    );
}

#[test]
fn parses_keywords_and_rejects_garbage() {
    assert_eq!(Rgba8::parse_css(" white ").unwrap(), Rgba8::WHITE);
    assert_eq!(Rgba8::parse_css("transparent").unwrap(), Rgba8::TRANSPARENT);
    assert!(Rgba8::parse_css("#12").is_err());
    assert!(Rgba8::parse_css("#gggggg").is_err());
    assert!(Rgba8::parse_css("rgb(1, 2)").is_err());
    assert!(Rgba8::parse_css("papayawhip").is_err());
}

#[test]
fn serde_uses_css_strings() {
    let c: Rgba8 = serde_json::from_value(json!("#102030")).unwrap();
    assert_eq!(c, Rgba8::rgba(0x10, 0x20, 0x30, 255));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#102030ff"));
    assert!(serde_json::from_value::<Rgba8>(json!("nope")).is_err());
}
