//! Benchmarks for the boundary style engine and GeoJSON parsing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hoodmap_core::{
    parse_feature_collection, style_for, Directory, FocusSet, InteractionState, RenderMode,
};

fn bench_style_overview(c: &mut Criterion) {
    let focus: FocusSet = Directory::builtin().names().collect();
    let hover = InteractionState::hovering("Oakridge");

    c.bench_function("style_for_overview", |b| {
        b.iter(|| style_for(black_box("Marpole"), &hover, &RenderMode::Overview, &focus))
    });
}

fn bench_restyle_all(c: &mut Criterion) {
    let dir = Directory::builtin();
    let focus: FocusSet = dir.names().collect();
    let names: Vec<String> = (0..200).map(|i| format!("Area {i}")).collect();
    let hover = InteractionState::hovering("Area 17");

    c.bench_function("restyle_200_features", |b| {
        b.iter(|| {
            names
                .iter()
                .map(|n| style_for(black_box(n), &hover, &RenderMode::Overview, &focus))
                .filter(|s| s.visible)
                .count()
        })
    });
}

fn bench_style_focused(c: &mut Criterion) {
    let mode = RenderMode::focused("Oakridge");
    let focus = FocusSet::new();

    c.bench_function("style_for_focused", |b| {
        b.iter(|| style_for(black_box("Oakridge"), &InteractionState::default(), &mode, &focus))
    });
}

fn bench_parse_collection(c: &mut Criterion) {
    let features: Vec<String> = (0..50)
        .map(|i| {
            let x = -123.2 + f64::from(i) * 0.01;
            let x2 = x + 0.01;
            format!(
                concat!(
                    r#"{{"type":"Feature","properties":{{"name":"Area {i}"}},"#,
                    r#""geometry":{{"type":"Polygon","#,
                    r#""coordinates":[[[{x},49.2],[{x2},49.2],[{x2},49.21],[{x},49.2]]]}}}}"#
                ),
                i = i,
                x = x,
                x2 = x2
            )
        })
        .collect();
    let text = format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    );

    c.bench_function("parse_50_features", |b| {
        b.iter(|| parse_feature_collection(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_style_overview,
    bench_restyle_all,
    bench_style_focused,
    bench_parse_collection,
);
criterion_main!(benches);
