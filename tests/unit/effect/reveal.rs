use super::*;
use crate::effect::config::{END_PERCENTAGE_PROPERTY, FILL_COLOR_PROPERTY};
use crate::page::static_page::{StaticElement, StaticPage};

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="100" height="100"><rect width="100" height="100" fill="#000"/></svg>"##;

struct Ids {
    canvas: ElementId,
    placeholder: ElementId,
    video: ElementId,
}

fn boxed(x0: f64, y0: f64, x1: f64, y1: f64) -> StaticElement {
    StaticElement {
        layout: Rect::new(x0, y0, x1, y1),
        ..StaticElement::default()
    }
}

fn page_with(logo_svg: &str, with_logo_placeholder: bool) -> (StaticPage, Ids) {
    let mut page = StaticPage::new(600.0);
    let canvas = page.insert(
        Role::Canvas,
        StaticElement {
            layout: Rect::new(0.0, 0.0, 800.0, 600.0),
            parent: Some(Rect::new(0.0, 0.0, 800.0, 600.0)),
            svg: None,
        },
    );
    page.insert(Role::ScrollTarget, boxed(0.0, 0.0, 800.0, 3000.0));
    page.insert(
        Role::Logo,
        StaticElement {
            layout: Rect::new(0.0, 0.0, 100.0, 100.0),
            parent: None,
            svg: Some(logo_svg.to_owned()),
        },
    );
    if with_logo_placeholder {
        page.insert(Role::LogoPlaceholder, boxed(240.0, 140.0, 560.0, 460.0));
    }
    let placeholder = page.insert(Role::Placeholder, boxed(0.0, 0.0, 800.0, 600.0));
    let video = page.insert(Role::Video, boxed(0.0, 0.0, 800.0, 600.0));
    (
        page,
        Ids {
            canvas,
            placeholder,
            video,
        },
    )
}

fn ready(config: RevealConfig) -> (HeroReveal<StaticPage>, Ids) {
    let (page, ids) = page_with(LOGO, true);
    let mut fx = HeroReveal::mount(page, config).unwrap().unwrap();
    fx.on_load();
    assert_eq!(fx.run_pending(), 1);
    assert_eq!(fx.state(), RevealState::Ready);
    (fx, ids)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn missing_required_element_mounts_nothing() {
    let mut page = StaticPage::new(600.0);
    page.insert(Role::Canvas, boxed(0.0, 0.0, 10.0, 10.0));
    page.insert(Role::ScrollTarget, boxed(0.0, 0.0, 10.0, 10.0));
    let mounted = HeroReveal::mount(page, RevealConfig::default()).unwrap();
    assert!(mounted.is_none());
}

#[test]
fn invalid_config_is_an_error() {
    let (page, _) = page_with(LOGO, true);
    let cfg = RevealConfig {
        fallback_initial_width: -1.0,
        ..RevealConfig::default()
    };
    assert!(HeroReveal::mount(page, cfg).is_err());
}

#[test]
fn load_fills_and_queues_one_decode() {
    let (page, _) = page_with(LOGO, true);
    let mut fx = HeroReveal::mount(page, RevealConfig::default()).unwrap().unwrap();
    fx.on_load();
    assert_eq!(fx.state(), RevealState::Loading { generation: 1 });
    assert_eq!((fx.surface().width(), fx.surface().height()), (801, 601));
    assert!(fx.surface().data().iter().all(|b| *b == 255));
    assert_eq!(fx.object_urls().live_count(), 1);
    assert!(fx.scaler().is_none());
    assert_eq!(fx.on_scroll(100.0), None);

    // A second load does not start another decode.
    fx.on_load();
    assert_eq!(fx.object_urls().created_count(), 1);
}

#[test]
fn decode_completion_initializes_mask_and_driver() {
    let (fx, ids) = ready(RevealConfig::default());

    let scaler = fx.scaler().unwrap();
    let p = scaler.anchor_position();
    assert!(close(p.x, 400.5 - 160.0 + 320.0 * 0.63));
    assert!(close(p.y, 300.5 - 160.0 + 320.0 * 0.717));
    assert_eq!(fx.current_width(), Some(320.0));

    let (start, end) = fx.trigger().unwrap().bounds();
    assert!(close(start, 0.0));
    assert!(close(end, 0.9 * 3000.0 - 600.0));
    assert_eq!(fx.trigger().unwrap().tween().to, 601.0 * 11.0);

    assert_eq!(fx.host().fades(), &[(ids.placeholder, 0.2)]);
    assert_eq!(fx.host().played(), &[ids.video]);
    assert_eq!(fx.object_urls().live_count(), 0);
    assert_eq!(fx.object_urls().revoked_count(), 1);
}

#[test]
fn scroll_interpolates_width_and_keeps_anchor() {
    let (mut fx, _) = ready(RevealConfig::default());
    let pinned = fx.scaler().unwrap().anchor_position();
    let terminal = 601.0 * 11.0;

    let rect = fx.on_scroll(1050.0).unwrap();
    let expected = 320.0 + (terminal - 320.0) * 0.5;
    assert!(close(rect.width(), expected));
    assert!(close(rect.x0 + rect.width() * 0.63, pinned.x));
    assert!(close(rect.y0 + rect.height() * 0.717, pinned.y));

    // Unchanged progress does not repaint.
    let count = fx.repaint_count();
    assert_eq!(fx.on_scroll(1050.0), None);
    assert_eq!(fx.repaint_count(), count);

    let rect = fx.on_scroll(10_000.0).unwrap();
    assert!(close(rect.width(), terminal));
    assert_eq!(fx.scaler().unwrap().anchor_position(), pinned);
}

#[test]
fn resize_rebuilds_surface_without_duplicate_updates() {
    let (mut fx, ids) = ready(RevealConfig::default());
    fx.on_scroll(500.0);

    fx.host_mut().element_mut(ids.canvas).unwrap().parent =
        Some(Rect::new(0.0, 0.0, 1024.0, 768.0));
    fx.on_resize();
    assert_eq!((fx.surface().width(), fx.surface().height()), (1025, 769));
    assert_eq!(fx.trigger().unwrap().tween().to, 769.0 * 11.0);

    // New anchor is derived from the new centered placement.
    let p = fx.scaler().unwrap().anchor_position();
    assert!(close(p.x, 512.5 - 160.0 + 320.0 * 0.63));

    let before = fx.repaint_count();
    fx.on_scroll(700.0);
    assert_eq!(fx.repaint_count(), before + 1);

    // Placeholder fades only once, video plays on load and on resize.
    assert_eq!(fx.host().fades().len(), 1);
    assert_eq!(fx.host().played().len(), 2);
}

#[test]
fn resize_reapplies_last_scroll_position() {
    let (mut fx, _) = ready(RevealConfig::default());
    fx.on_scroll(1050.0);
    let width = fx.current_width().unwrap();
    fx.on_resize();
    assert!(close(fx.current_width().unwrap(), width));
}

#[test]
fn stale_decode_completion_is_ignored() {
    let (page, _) = page_with(LOGO, true);
    let cfg = RevealConfig {
        rerasterize_on_resize: true,
        ..RevealConfig::default()
    };
    let mut fx = HeroReveal::mount(page, cfg).unwrap().unwrap();
    fx.on_load();
    fx.on_resize();
    assert_eq!(fx.state(), RevealState::Loading { generation: 2 });

    assert_eq!(fx.run_pending(), 2);
    assert_eq!(fx.state(), RevealState::Ready);
    assert_eq!(fx.object_urls().created_count(), 2);
    assert_eq!(fx.object_urls().revoked_count(), 2);
    assert_eq!(fx.object_urls().live_count(), 0);
    assert_eq!(fx.host().fades().len(), 1);
}

#[test]
fn decode_failure_degrades_to_plain_fill() {
    let oversized = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100000" height="10"><rect width="10" height="10"/></svg>"#;
    let (page, _) = page_with(oversized, true);
    let mut fx = HeroReveal::mount(page, RevealConfig::default()).unwrap().unwrap();
    fx.on_load();
    assert_eq!(fx.run_pending(), 1);
    assert!(matches!(fx.state(), RevealState::Loading { .. }));
    assert!(fx.scaler().is_none());
    assert_eq!(fx.on_scroll(500.0), None);
    assert!(fx.surface().data().iter().all(|b| *b == 255));
    assert_eq!(fx.object_urls().live_count(), 0);
    assert!(fx.host().fades().is_empty());
}

#[test]
fn resize_after_failed_decode_tracks_container() {
    let oversized = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100000" height="10"><rect width="10" height="10"/></svg>"#;
    let (page, ids) = page_with(oversized, true);
    let mut fx = HeroReveal::mount(page, RevealConfig::default()).unwrap().unwrap();
    fx.on_load();
    fx.run_pending();
    assert!(matches!(fx.state(), RevealState::Loading { .. }));

    fx.host_mut().element_mut(ids.canvas).unwrap().parent =
        Some(Rect::new(0.0, 0.0, 1000.0, 700.0));
    fx.on_resize();
    assert_eq!((fx.surface().width(), fx.surface().height()), (1001, 701));
    assert!(fx.surface().data().iter().all(|b| *b == 255));
    assert_eq!(fx.host().played().len(), 2);
}

#[test]
fn rerasterizing_resize_resets_surface_until_decode_lands() {
    let cfg = RevealConfig {
        rerasterize_on_resize: true,
        ..RevealConfig::default()
    };
    let (mut fx, ids) = ready(cfg);
    fx.host_mut().element_mut(ids.canvas).unwrap().parent =
        Some(Rect::new(0.0, 0.0, 1024.0, 768.0));
    fx.on_resize();
    assert_eq!(fx.state(), RevealState::Loading { generation: 2 });
    assert_eq!((fx.surface().width(), fx.surface().height()), (1025, 769));
    assert!(fx.scaler().is_none());
    assert!(fx.trigger().is_none());
    assert!(fx.surface().data().iter().all(|b| *b == 255));

    assert_eq!(fx.run_pending(), 1);
    assert_eq!(fx.state(), RevealState::Ready);
    let p = fx.scaler().unwrap().anchor_position();
    assert!(close(p.x, 512.5 - 160.0 + 320.0 * 0.63));
}

#[test]
fn style_properties_drive_fill_and_range() {
    let (mut page, _) = page_with(LOGO, true);
    page.set_property(FILL_COLOR_PROPERTY, "#102030");
    page.set_property(END_PERCENTAGE_PROPERTY, "50%");
    let mut fx = HeroReveal::mount(page, RevealConfig::default()).unwrap().unwrap();
    assert_eq!(fx.fill_color(), Rgba8::rgba(0x10, 0x20, 0x30, 255));
    fx.on_load();
    fx.run_pending();
    let (_, end) = fx.trigger().unwrap().bounds();
    assert!(close(end, 0.5 * 3000.0 - 600.0));
    assert_eq!(fx.surface().pixel(0, 0).unwrap(), [0x10, 0x20, 0x30, 255]);
}

#[test]
fn bad_style_properties_fall_back_to_defaults() {
    let (mut page, _) = page_with(LOGO, true);
    page.set_property(FILL_COLOR_PROPERTY, "not-a-color");
    page.set_property(END_PERCENTAGE_PROPERTY, "lots");
    let mut fx = HeroReveal::mount(page, RevealConfig::default()).unwrap().unwrap();
    assert_eq!(fx.fill_color(), Rgba8::WHITE);
    fx.on_load();
    fx.run_pending();
    let (_, end) = fx.trigger().unwrap().bounds();
    assert!(close(end, 0.9 * 3000.0 - 600.0));
}

#[test]
fn missing_logo_placeholder_uses_fallback_width() {
    let (page, _) = page_with(LOGO, false);
    let cfg = RevealConfig {
        fallback_initial_width: 250.0,
        ..RevealConfig::default()
    };
    let mut fx = HeroReveal::mount(page, cfg).unwrap().unwrap();
    fx.on_load();
    fx.run_pending();
    assert_eq!(fx.current_width(), Some(250.0));
    assert_eq!(fx.trigger().unwrap().tween().from, 250.0);
}

#[test]
fn teardown_stops_updates_and_ignores_late_decodes() {
    let (mut fx, _) = ready(RevealConfig::default());
    fx.teardown();
    assert_eq!(fx.state(), RevealState::Uninitialized);
    assert!(fx.trigger().is_none());
    assert_eq!(fx.on_scroll(800.0), None);
    fx.on_resize();
    assert_eq!(fx.state(), RevealState::Uninitialized);

    // Tear down while a decode is in flight; its completion must not revive the effect.
    fx.on_load();
    fx.teardown();
    assert_eq!(fx.run_pending(), 1);
    assert_eq!(fx.state(), RevealState::Uninitialized);
    assert!(fx.scaler().is_none());

    // Mounting again later works with a fresh generation.
    fx.on_load();
    assert_eq!(fx.state(), RevealState::Loading { generation: 3 });
    fx.run_pending();
    assert_eq!(fx.state(), RevealState::Ready);
}
