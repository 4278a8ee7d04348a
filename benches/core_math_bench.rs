use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use doughnut_chart::api::{
    ChartConfig, ChartController, ChartDataSource, HitTester, plan_layer, stroke_intervals,
};
use doughnut_chart::core::{ChartItem, Point, RingRadii, SlicePath, Viewport, arc_point};
use doughnut_chart::render::{Color, HeadlessSurface};
use std::hint::black_box;

struct GeneratedRings {
    slices_per_ring: usize,
}

impl ChartDataSource for GeneratedRings {
    fn number_of_layers(&self) -> usize {
        4
    }

    fn number_of_slices(&self, _layer_index: usize) -> usize {
        self.slices_per_ring
    }

    fn item(&self, path: SlicePath) -> Option<ChartItem> {
        let value = 1.0 + ((path.index * 7 + path.layer_index * 3) % 11) as f64;
        Some(ChartItem::new(value, Color::rgb(0.3, 0.6, 0.9)))
    }

    fn inner_radius(&self, layer_index: usize) -> Option<f64> {
        Some(60.0 + 80.0 * layer_index as f64)
    }

    fn outer_radius(&self, layer_index: usize) -> Option<f64> {
        Some(120.0 + 80.0 * layer_index as f64)
    }
}

fn bench_stroke_intervals_1k(c: &mut Criterion) {
    let values: Vec<f64> = (0..1_000).map(|i| 1.0 + (i % 17) as f64).collect();

    c.bench_function("stroke_intervals_1k", |b| {
        b.iter(|| {
            let _ = stroke_intervals(black_box(&values));
        })
    });
}

fn bench_plan_layer_shrink(c: &mut Criterion) {
    let values: Vec<f64> = (0..256).map(|i| 0.5 + (i % 5) as f64).collect();

    c.bench_function("plan_layer_shrink_512_to_256", |b| {
        b.iter(|| {
            let _ = plan_layer(black_box(512), black_box(&values));
        })
    });
}

fn bench_hit_layer_512(c: &mut Criterion) {
    let center = Point::new(500.0, 500.0);
    let radii = RingRadii::new(200.0, 400.0).expect("valid radii");
    let values: Vec<f64> = (0..512).map(|i| 1.0 + (i % 9) as f64).collect();
    let intervals = stroke_intervals(&values);
    let tester = HitTester::new(center, -std::f64::consts::FRAC_PI_2);
    let probe = arc_point(center, 300.0, 0.97, -std::f64::consts::FRAC_PI_2);

    c.bench_function("hit_layer_512_slices", |b| {
        b.iter(|| {
            let _ = tester.hit_layer(
                black_box(probe),
                black_box(radii),
                intervals.iter().copied(),
            );
        })
    });
}

fn bench_controller_reload_4x128(c: &mut Criterion) {
    let source = Rc::new(GeneratedRings {
        slices_per_ring: 128,
    });
    let config = ChartConfig::new(Viewport::new(1200, 1200)).with_animation_duration(0.0);
    let mut controller =
        ChartController::new(HeadlessSurface::new(), config).expect("controller init");
    controller.set_data_source(&source);

    c.bench_function("controller_reload_4x128", |b| {
        b.iter(|| {
            controller.reload_data();
            controller.surface_mut().clear_animation_log();
        })
    });
}

criterion_group!(
    benches,
    bench_stroke_intervals_1k,
    bench_plan_layer_shrink,
    bench_hit_layer_512,
    bench_controller_reload_4x128
);
criterion_main!(benches);
