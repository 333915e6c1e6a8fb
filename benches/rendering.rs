//! Benchmarks for topic rendering and terminal layout.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mdbrowse::document::{RenderOptions, Renderer};
use mdbrowse::image::FsImageSupplier;
use mdbrowse::ui::layout::layout;

fn sample_topic() -> String {
    let page = include_str!("../tests/fixtures/help/README.md");
    page.repeat(50)
}

fn bench_render(c: &mut Criterion) {
    let content = sample_topic();
    let renderer = Renderer::new(RenderOptions::default()).unwrap();

    c.bench_function("render_topic", |b| {
        b.iter(|| renderer.render(black_box(&content)))
    });
}

fn bench_layout(c: &mut Criterion) {
    let content = sample_topic();
    let renderer = Renderer::new(RenderOptions::default()).unwrap();
    let items = renderer.render(&content);
    let supplier = FsImageSupplier::default();

    c.bench_function("layout_topic", |b| {
        b.iter(|| layout(black_box(&items), &supplier))
    });
}

criterion_group!(benches, bench_render, bench_layout);
criterion_main!(benches);
