//! Criterion benchmarks for bars document parsing and frame layout.
//!
//! Run with:
//! ```bash
//! cargo bench --package bars-core --bench document_bench
//! ```

use bars_core::{domain::layout::layout_frame, parse_document, Viewport, MAX_BARS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Builds a well-formed document with `n` bars.
fn document_with_n_bars(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r##"    {{"title": "Bar {i}", "current": {}, "total": 100, "color": "#3357FF"}}"##,
                i % 100
            )
        })
        .collect();
    format!("[\n{}\n]\n", items.join(",\n"))
}

fn bench_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for n in [5, 50, MAX_BARS, MAX_BARS * 2] {
        let text = document_with_n_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| parse_document(black_box(text)))
        });
    }

    group.finish();
}

fn bench_layout_frame(c: &mut Criterion) {
    let doc = parse_document(&document_with_n_bars(MAX_BARS)).expect("parse");
    let viewport = Viewport::new(480, 480);

    c.bench_function("layout_frame/full_registry_mid_scroll", |b| {
        b.iter(|| layout_frame(black_box(doc.registry.as_slice()), black_box(2000), viewport))
    });
}

criterion_group!(benches, bench_parse_document, bench_layout_frame);
criterion_main!(benches);
