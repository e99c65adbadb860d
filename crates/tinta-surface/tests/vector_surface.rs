use std::time::{Duration, Instant};

use tinta_engine::time::CountdownEvent;
use tinta_engine::RenderState;
use tinta_surface::prelude::*;

const PICTURE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="30" height="10" viewBox="0 0 30 10">
<style>.cls-1{fill:#2e86c1}</style>
<path id="a" fill="#C0392B" d="M0 0h10v10H0z"/>
<path id="b" class="cls-1" d="M10 0h10v10H10z"/>
<path d="M20 0h10v10H20z" style="fill:#C0392B"/>
</svg>"##;

fn loaded() -> VectorSurface {
    let mut s = VectorSurface::new(SurfaceConfig::default(), None);
    s.load(&ImageSource::VectorInline(PICTURE.into()), &MemoryFetcher::new()).unwrap();
    s
}

// ── loading ───────────────────────────────────────────────────────────────

#[test]
fn load_discovers_regions_and_palette() {
    let s = loaded();
    assert_eq!(s.phase(), &Phase::Ready);
    assert_eq!(s.palette().palette().as_slice(), ["#C0392B", "#2e86c1"]);
    let ids: Vec<_> = s.image().unwrap().regions.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "area3"]);
    assert_eq!(s.status_text(), "Lütfen aşağıdan bir renk seçin");
    assert_eq!(s.progress(), 0.0);
}

#[test]
fn palette_override_wins_over_discovered_colors() {
    let custom: Palette = ["#2e86c1", "#C0392B", "#F1C40F"].into_iter().collect();
    let mut s = VectorSurface::new(SurfaceConfig::default(), Some(custom.clone()));
    s.load(&ImageSource::VectorInline(PICTURE.into()), &MemoryFetcher::new()).unwrap();
    assert_eq!(s.palette().palette(), &custom);
}

const SECOND_PICTURE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
<path id="sun" fill="#F1C40F" d="M0 0h10v10H0z"/>
<path id="sky" fill="#85C1E9" d="M10 0h10v10H10z"/>
</svg>"##;

#[test]
fn failed_load_then_successful_load() {
    let now = Instant::now();
    let mut s = loaded();
    s.select_color(0);
    assert!(s.click_region("a", now));
    assert!(!s.painted().is_empty());

    let err = s.load(&ImageSource::VectorUrl("/images/missing.svg".into()), &MemoryFetcher::new());
    assert!(matches!(err, Err(SurfaceError::Source(SourceLoadError::NotFound(_)))));
    assert!(matches!(s.phase(), Phase::Error(_)));
    assert!(s.image().is_none());

    // Reset in the error phase leaves it there.
    s.reset();
    assert!(matches!(s.phase(), Phase::Error(_)));

    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("/images/sun.svg", SECOND_PICTURE);
    s.load(&ImageSource::VectorUrl("/images/sun.svg".into()), &fetcher).unwrap();
    assert_eq!(s.phase(), &Phase::Ready);
    assert!(s.painted().is_empty());
    assert_eq!(s.palette().palette().as_slice(), ["#F1C40F", "#85C1E9"]);
    assert!(s.palette().selection().is_none());
    let ids: Vec<_> = s.image().unwrap().regions.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["sun", "sky"]);
    assert_eq!(s.progress(), 0.0);
}

#[test]
fn markup_without_shapes_is_an_error() {
    let mut s = VectorSurface::new(SurfaceConfig::default(), None);
    let err = s.load(&ImageSource::VectorInline("<svg/>".into()), &MemoryFetcher::new());
    assert!(matches!(err, Err(SurfaceError::Prepare(_))));
    assert!(matches!(s.phase(), Phase::Error(_)));
}

#[test]
fn superseded_load_is_dropped() {
    let mut s = VectorSurface::new(SurfaceConfig::default(), None);
    let first = s.begin_load();
    let second = s.begin_load();
    assert!(matches!(s.finish_load(first, Ok(PICTURE.into())), Err(SurfaceError::Superseded)));
    assert_eq!(s.phase(), &Phase::Loading);
    s.finish_load(second, Ok(PICTURE.into())).unwrap();
    assert_eq!(s.phase(), &Phase::Ready);
}

// ── painting ──────────────────────────────────────────────────────────────

#[test]
fn paint_requires_a_matching_selection() {
    let now = Instant::now();
    let mut s = loaded();
    assert!(!s.click_region("a", now));

    assert!(s.on_event(&SurfaceEvent::SelectColor { index: 0 }, now).is_consumed());
    assert_eq!(s.status_text(), "Şimdi 1 numaralı alanları boyayabilirsiniz");
    assert!(!s.click_region("b", now));
    assert!(!s.click_region("nope", now));
    assert_eq!(s.phase(), &Phase::Ready);

    assert!(s.click_region("a", now));
    assert_eq!(s.phase(), &Phase::Filling);
    assert_eq!(s.painted().get("a").map(String::as_str), Some("#C0392B"));
}

#[test]
fn highlights_follow_selection() {
    let now = Instant::now();
    let mut s = loaded();
    assert!(s.highlights().is_empty());

    s.select_color(0);
    s.click_region("a", now);
    let hl: Vec<_> = s.highlights().into_iter().map(|h| (h.region_id, h.label)).collect();
    assert_eq!(hl, [("a".to_string(), "✓".to_string()), ("area3".to_string(), "1".to_string())]);

    let states = s.render_states();
    assert_eq!(states[0].1, RenderState::PaintedHighlighted { color: "#C0392B".into() });
    assert_eq!(states[1].1, RenderState::Outline);
    assert_eq!(states[2].1, RenderState::Highlighted);

    // Toggling the same swatch clears the selection.
    s.select_color(0);
    assert!(s.highlights().is_empty());
    assert_eq!(s.render_states()[0].1, RenderState::Painted { color: "#C0392B".into() });
}

#[test]
fn click_node_resolves_nearest_region() {
    let now = Instant::now();
    let mut s = loaded();
    s.select_color(0);
    let target = s.image().unwrap().document.find_by_id("area3").unwrap();
    assert!(s.on_event(&SurfaceEvent::ClickNode { target }, now).is_consumed());
    assert!(s.painted().contains_key("area3"));

    let root = s.image().unwrap().document.root_element();
    assert_eq!(s.on_event(&SurfaceEvent::ClickNode { target: root }, now), EventResult::Ignored);
}

#[test]
fn raster_clicks_are_ignored() {
    let mut s = loaded();
    let click = SurfaceEvent::Click { pos: Vec2::new(1.0, 1.0), display: Rect::new(0.0, 0.0, 30.0, 10.0) };
    assert_eq!(s.on_event(&click, Instant::now()), EventResult::Ignored);
}

// ── completion ────────────────────────────────────────────────────────────

#[test]
fn celebration_fires_once_past_threshold() {
    let t0 = Instant::now();
    let mut s = loaded();
    s.select_color(0);
    s.click_region("a", t0);
    s.click_region("area3", t0);
    assert!((s.progress() - 2.0 / 3.0).abs() < 1e-6);
    assert!(!s.is_celebrating());

    s.select_color(1);
    s.click_region("b", t0);
    assert_eq!(s.progress(), 1.0);
    assert!(s.is_celebrating());
    assert!(matches!(s.tick(t0 + Duration::from_secs(1)), CountdownEvent::Running(_)));
    assert_eq!(s.tick(t0 + Duration::from_secs(5)), CountdownEvent::Elapsed);
    assert!(!s.is_celebrating());

    // Repainting does not celebrate again.
    s.click_region("b", t0 + Duration::from_secs(6));
    assert!(!s.is_celebrating());
}

// ── reset and export ──────────────────────────────────────────────────────

#[test]
fn reset_clears_paint_and_is_idempotent() {
    let now = Instant::now();
    let mut s = loaded();
    s.select_color(0);
    s.click_region("a", now);
    assert!(s.has_changes());

    s.on_event(&SurfaceEvent::Reset, now);
    assert!(s.painted().is_empty());
    assert_eq!(s.phase(), &Phase::Ready);
    assert!(!s.has_changes());
    assert_eq!(s.palette().selection().index(), Some(0));

    s.reset();
    assert!(s.painted().is_empty());
    assert_eq!(s.phase(), &Phase::Ready);
}

#[test]
fn export_needs_changes() {
    let now = Instant::now();
    let mut s = loaded();
    assert!(matches!(s.export(), Err(ExportError::NoChanges)));

    s.select_color(0);
    s.click_region("a", now);
    let png = s.export().unwrap();
    assert_eq!((png.width, png.height), (30, 10));
    assert!(png.data_url().starts_with("data:image/png;base64,"));

    let share = s.share().unwrap();
    assert_eq!(share.title, "Sayıya Göre Boya");
    assert_eq!(s.export_file_name(), "sayıya-göre-boya-boyama.png");
}

#[test]
fn rendered_markup_carries_paint() {
    let now = Instant::now();
    let mut s = loaded();
    s.select_color(1);
    s.click_region("b", now);
    let markup = s.render_markup().unwrap();
    assert!(markup.contains(r##"fill="#2e86c1""##));
    assert!(markup.contains(r##"data-color="#C0392B""##));
}
