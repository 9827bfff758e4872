use bar_chart_rs::core::{SourceTable, compute_geometry, extract_table};
use bar_chart_rs::render::RecordingRenderer;
use bar_chart_rs::{BarChart, BarChartConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wide_source(columns: usize, rows: usize) -> SourceTable {
    let mut source = SourceTable::new((0..columns).map(|c| format!("c{c}"))).with_caption("bench");
    for r in 0..rows {
        let cells = (0..columns).map(|c| ((r * 37 + c * 11) % 5_000).to_string());
        source = source.with_row(format!("r{r}"), cells);
    }
    source
}

fn bench_extract_64x256(c: &mut Criterion) {
    let source = wide_source(64, 256);
    c.bench_function("extract_table_64x256", |b| {
        b.iter(|| extract_table(black_box(&source)).expect("extract"))
    });
}

fn bench_geometry_64x256(c: &mut Criterion) {
    let data = extract_table(&wide_source(64, 256)).expect("extract");
    c.bench_function("compute_geometry_64x256", |b| {
        b.iter(|| compute_geometry(black_box(&data)).expect("geometry"))
    });
}

fn bench_full_reveal_16x16(c: &mut Criterion) {
    let source = wide_source(16, 16);
    c.bench_function("full_reveal_16x16", |b| {
        b.iter(|| {
            let mut chart = BarChart::build(
                black_box(&source),
                RecordingRenderer::default(),
                BarChartConfig::default(),
            )
            .expect("chart build");
            chart.run_to_completion().expect("run")
        })
    });
}

criterion_group!(
    benches,
    bench_extract_64x256,
    bench_geometry_64x256,
    bench_full_reveal_16x16
);
criterion_main!(benches);
