//! End-to-end scenarios for the map layers against the fake surface.

use hoodmap_core::{
    Directory, GeometryError, GeometrySource, LayerPhase, NameIndex, Palette, PopoverAction,
    RenderMode, HOVER_FILL_OPACITY, MEMBER_FILL_OPACITY, TARGET_FILL_OPACITY,
};
use hoodmap_test::{fixtures, Harness, SurfaceCall};
use hoodmap_widgets::{BoundaryLayer, BoundaryOptions, MapContext, NeighbourhoodMap};
use std::rc::Rc;

fn context(harness: &Harness) -> MapContext {
    MapContext::new(harness.surface(), harness.spawner(), harness.navigator())
        .with_leads(harness.leads())
}

fn index() -> Rc<NameIndex> {
    Rc::new(NameIndex::from_directory(&Directory::builtin()))
}

// =============================================================================
// Marker Scenario
// =============================================================================

#[test]
fn scenario_oakridge_marker_popover_and_navigation() {
    let mut harness = Harness::new();
    let map = NeighbourhoodMap::from_yaml(fixtures::MANIFEST_YAML).expect("manifest");
    let mounted = map.mount(&context(&harness));

    harness.click_marker("oakridge");
    let card = harness.fake().popover().expect("popover open");
    assert_eq!(card.title, "Oakridge");
    assert_eq!(card.avg_price, "$1.2M");
    assert_eq!(card.price_change, "+4.3%");
    assert_eq!(
        harness.fake().popover_position(),
        Some(Directory::builtin().by_slug("oakridge").expect("record").center)
    );

    harness
        .press(PopoverAction::ViewDetails)
        .assert_navigated("/neighbourhoods/oakridge");
    assert_eq!(mounted.markers().selected().as_deref(), Some("oakridge"));
}

// =============================================================================
// Overview Scenario
// =============================================================================

#[test]
fn scenario_overview_hover_oakridge() {
    let mut harness = Harness::new();
    let layer = BoundaryLayer::with_options(
        &context(&harness),
        GeometrySource::new("/data/vancouver.geojson"),
        index(),
        BoundaryOptions::new().focus(fixtures::oakridge_focus()),
    );
    layer.mount();
    harness.resolve_geojson(fixtures::BOUNDARIES_GEOJSON);

    let idle = harness.fake().style_of("Oakridge").expect("styled");
    assert_eq!(idle.fill_opacity, MEMBER_FILL_OPACITY);
    assert_eq!(idle.stroke_weight, 2.0);
    assert_eq!(idle.stroke_opacity, 0.7);

    harness.hover("Oakridge");
    let hovered = harness.fake().style_of("Oakridge").expect("styled");
    assert_eq!(hovered.fill_opacity, HOVER_FILL_OPACITY);
    assert_eq!(hovered.stroke_weight, 3.0);
    assert_eq!(hovered.stroke_opacity, 1.0);
    assert_eq!(hovered.fill_color, Palette::DEFAULT.highlight);

    let tooltip = harness.fake().tooltip().expect("tooltip");
    assert_eq!(tooltip.name(), "Oakridge");
    assert_eq!(tooltip.get_hint(), Some("Click to explore"));

    harness.hover("Strathcona");
    assert_eq!(harness.fake().tooltip().expect("tooltip").get_hint(), None);
    assert_eq!(
        harness.fake().style_of("Oakridge").expect("styled").fill_opacity,
        MEMBER_FILL_OPACITY
    );

    harness.click_feature("Strathcona").assert_no_navigation();
    harness
        .click_feature("Oakridge")
        .assert_navigated("/neighbourhoods/oakridge");
}

// =============================================================================
// Focused Scenario
// =============================================================================

#[test]
fn scenario_focused_oakridge_hides_marpole() {
    let mut harness = Harness::new();
    let layer = BoundaryLayer::with_options(
        &context(&harness),
        GeometrySource::new("/data/vancouver.geojson"),
        index(),
        BoundaryOptions::new().mode(RenderMode::focused("Oakridge")),
    );
    layer.mount();
    harness.resolve_geojson(fixtures::BOUNDARIES_GEOJSON);

    let oakridge = harness.fake().style_of("Oakridge").expect("styled");
    assert!(oakridge.visible);
    assert!(!oakridge.interactive);
    assert_eq!(oakridge.fill_opacity, TARGET_FILL_OPACITY);

    let marpole = harness.fake().style_of("Marpole").expect("styled");
    assert!(!marpole.visible);
    assert!(!marpole.interactive);
    assert_eq!(marpole.fill_opacity, 0.0);

    harness.click_feature("Oakridge").assert_no_navigation();
    assert!(harness.fake().tooltip().is_none());
}

// =============================================================================
// Teardown Scenarios
// =============================================================================

#[test]
fn scenario_unmount_during_load_then_late_resolution() {
    let mut harness = Harness::new();
    let map = NeighbourhoodMap::from_yaml(fixtures::MANIFEST_YAML).expect("manifest");
    let mut mounted = map.mount(&context(&harness));
    harness.run();

    mounted.unmount();
    harness.resolve_geojson(fixtures::BOUNDARIES_GEOJSON);

    assert_eq!(
        mounted.boundary().expect("boundary").phase(),
        LayerPhase::Uninitialized
    );
    assert_eq!(
        harness
            .fake()
            .count_calls(|c| matches!(c, SurfaceCall::AddFeatures(_))),
        0
    );
    harness.assert_clean();
}

#[test]
fn scenario_geometry_failure_keeps_markers_working() {
    let mut harness = Harness::new();
    let map = NeighbourhoodMap::from_yaml(fixtures::MANIFEST_YAML).expect("manifest");
    let mounted = map.mount(&context(&harness));
    harness.fail(GeometryError::Fetch("offline".into()));

    assert_eq!(mounted.boundary().expect("boundary").phase(), LayerPhase::Failed);
    harness.click_marker("marpole");
    assert_eq!(harness.fake().popover().expect("popover").slug, "marpole");
}

#[test]
fn scenario_layers_are_independent_observers() {
    let mut harness = Harness::new();
    let map = NeighbourhoodMap::from_yaml(fixtures::MANIFEST_YAML).expect("manifest");
    let mounted = map.mount(&context(&harness));
    harness.resolve_geojson(fixtures::BOUNDARIES_GEOJSON);

    harness.click_marker("kerrisdale").hover("Oakridge");
    assert_eq!(mounted.markers().selected().as_deref(), Some("kerrisdale"));
    assert_eq!(
        mounted.boundary().expect("boundary").hovered().as_deref(),
        Some("Oakridge")
    );

    harness.leave().close_popover();
    assert_eq!(mounted.markers().selected(), None);
    assert_eq!(mounted.boundary().expect("boundary").hovered(), None);
}

#[test]
fn scenario_report_request_reaches_lead_capture() {
    let mut harness = Harness::new();
    let yaml = "hoodmap: '0.1'\nmarkers:\n  report_action: true\n";
    let map = NeighbourhoodMap::from_yaml(yaml).expect("manifest");
    let _mounted = map.mount(&context(&harness));

    harness.click_marker("dunbar-southlands");
    assert!(harness.fake().popover().expect("popover").offer_report);
    harness.press(PopoverAction::RequestReport);
    assert_eq!(harness.reports(), vec!["dunbar-southlands"]);
    harness.assert_no_navigation();
}
