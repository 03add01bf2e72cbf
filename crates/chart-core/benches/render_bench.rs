use criterion::{black_box, criterion_group, criterion_main, Criterion};
use inline_chart_core::{ChartConfig, ChartKind, ChartView, LogicalSize, RenderOptions, Series};

fn build_config(kind: ChartKind, n: usize) -> ChartConfig {
    let labels: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
    let values: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin() * 10.0 + 12.0).collect();
    ChartConfig::new(kind)
        .with_categories(labels)
        .with_series(Series::from_numbers(&values).with_tension(0.4))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_view");
    for &(kind, n) in &[(ChartKind::Line, 50usize), (ChartKind::Line, 500), (ChartKind::Bar, 50)] {
        let opts = RenderOptions::default().with_labels(false);
        let size = LogicalSize::new(800.0, 500.0);
        let mut view =
            ChartView::mount(size, 2.0, build_config(kind, n), None, opts).expect("mount");

        group.bench_function(format!("render_{kind}_{n}"), |b| {
            b.iter(|| {
                view.render().expect("render");
                black_box(view.render_count());
            });
        });

        group.bench_function(format!("hover_{kind}_{n}"), |b| {
            let mut x = 60.0f32;
            b.iter(|| {
                x = if x > 760.0 { 60.0 } else { x + 7.0 };
                view.pointer_move(black_box(x), 200.0);
                black_box(view.hovered().is_some());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
