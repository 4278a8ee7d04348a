use std::cell::RefCell;
use std::rc::Rc;

use doughnut_chart::api::{ChartConfig, ChartController, ChartDataSource, ChartDelegate};
use doughnut_chart::core::{ChartItem, Point, SlicePath, Viewport, arc_point};
use doughnut_chart::interaction::ChartPhase;
use doughnut_chart::render::{ArcProperty, ArcValue, Color, HeadlessSurface};

struct Rings {
    layers: Vec<(Vec<f64>, f64, f64)>,
}

impl ChartDataSource for Rings {
    fn number_of_layers(&self) -> usize {
        self.layers.len()
    }

    fn number_of_slices(&self, layer_index: usize) -> usize {
        self.layers.get(layer_index).map_or(0, |layer| layer.0.len())
    }

    fn item(&self, path: SlicePath) -> Option<ChartItem> {
        let value = *self.layers.get(path.layer_index)?.0.get(path.index)?;
        Some(ChartItem::new(value, Color::rgb(0.9, 0.3, 0.1)))
    }

    fn inner_radius(&self, layer_index: usize) -> Option<f64> {
        self.layers.get(layer_index).map(|layer| layer.1)
    }

    fn outer_radius(&self, layer_index: usize) -> Option<f64> {
        self.layers.get(layer_index).map(|layer| layer.2)
    }
}

#[derive(Default)]
struct RecordingDelegate {
    selections: RefCell<Vec<SlicePath>>,
}

impl ChartDelegate for RecordingDelegate {
    fn on_slice_selected(&self, path: SlicePath) {
        self.selections.borrow_mut().push(path);
    }
}

fn chart(
    duration: f64,
    source: &Rc<Rings>,
    delegate: &Rc<RecordingDelegate>,
) -> ChartController<HeadlessSurface> {
    let config = ChartConfig::new(Viewport::new(300, 300)).with_animation_duration(duration);
    let mut controller =
        ChartController::new(HeadlessSurface::new(), config).expect("controller init");
    controller.set_data_source(source);
    controller.set_delegate(delegate);
    controller
}

fn point_at(controller: &ChartController<HeadlessSurface>, radius: f64, fraction: f64) -> Point {
    arc_point(
        controller.viewport().center(),
        radius,
        fraction,
        controller.start_angle(),
    )
}

#[test]
fn touch_on_third_slice_selects_it() {
    let source = Rc::new(Rings {
        layers: vec![(vec![1.0, 1.0, 2.0], 50.0, 100.0)],
    });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.0, &source, &delegate);
    controller.reload_data();

    let inside = point_at(&controller, 75.0, 0.6);
    assert_eq!(controller.touch_ended(inside), Some(SlicePath::new(2, 0)));
    assert_eq!(delegate.selections.borrow().as_slice(), &[SlicePath::new(2, 0)]);

    let outside = point_at(&controller, 150.0, 0.6);
    assert_eq!(controller.touch_ended(outside), None);
    assert_eq!(delegate.selections.borrow().len(), 1);
    assert_eq!(controller.touch_state().last_selection, None);
}

#[test]
fn touches_in_the_hole_or_on_boundaries_miss() {
    let source = Rc::new(Rings {
        layers: vec![(vec![1.0, 1.0], 50.0, 100.0)],
    });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.0, &source, &delegate);
    controller.reload_data();

    assert_eq!(controller.touch_ended(controller.viewport().center()), None);
    assert_eq!(controller.hit_test(Point::new(200.0, 150.0)), None);
    assert_eq!(controller.hit_test(Point::new(250.0, 150.0)), None);
    assert_eq!(controller.hit_test(Point::new(150.0, 225.0)), None);
    assert_eq!(
        controller.hit_test(Point::new(225.0, 150.0)),
        Some(SlicePath::new(0, 0))
    );
    assert!(delegate.selections.borrow().is_empty());
}

#[test]
fn empty_chart_never_hits() {
    let source = Rc::new(Rings { layers: Vec::new() });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.0, &source, &delegate);
    controller.reload_data();

    assert_eq!(controller.touch_ended(Point::new(150.0, 150.0)), None);
    assert_eq!(controller.touch_ended(Point::new(10.0, 10.0)), None);
    assert!(delegate.selections.borrow().is_empty());
}

#[test]
fn touches_are_dropped_while_a_transaction_is_in_flight() {
    let source = Rc::new(Rings {
        layers: vec![(vec![1.0, 3.0], 40.0, 90.0)],
    });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.5, &source, &delegate);
    controller.reload_data();
    assert_eq!(controller.phase(), ChartPhase::Animating);
    assert!(!controller.interaction_enabled());

    let target = point_at(&controller, 65.0, 0.5);
    assert_eq!(controller.touch_ended(target), None);
    assert_eq!(controller.touch_state().suppressed_touches, 1);
    assert!(delegate.selections.borrow().is_empty());

    controller.surface_mut().advance(0.5);
    assert!(controller.interaction_enabled());
    assert_eq!(controller.touch_ended(target), Some(SlicePath::new(1, 0)));
    assert_eq!(delegate.selections.borrow().len(), 1);
}

#[test]
fn hit_testing_scans_layers_in_order() {
    let source = Rc::new(Rings {
        layers: vec![
            (vec![1.0], 20.0, 60.0),
            (vec![1.0, 1.0, 1.0, 1.0], 70.0, 120.0),
        ],
    });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.0, &source, &delegate);
    controller.reload_data();

    assert_eq!(
        controller.touch_ended(point_at(&controller, 40.0, 0.9)),
        Some(SlicePath::new(0, 0))
    );
    assert_eq!(
        controller.touch_ended(point_at(&controller, 100.0, 0.9)),
        Some(SlicePath::new(3, 1))
    );
    assert_eq!(controller.touch_ended(point_at(&controller, 65.0, 0.9)), None);
}

#[test]
fn dropped_delegate_is_not_notified() {
    let source = Rc::new(Rings {
        layers: vec![(vec![1.0], 50.0, 100.0)],
    });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.0, &source, &delegate);
    controller.reload_data();
    drop(delegate);

    let hit = controller.touch_ended(point_at(&controller, 75.0, 0.1));
    assert_eq!(hit, Some(SlicePath::new(0, 0)));
    assert_eq!(controller.touch_state().last_selection, Some(SlicePath::new(0, 0)));
}

#[test]
fn rotated_start_angle_moves_the_slices() {
    let source = Rc::new(Rings {
        layers: vec![(vec![1.0, 1.0], 50.0, 100.0)],
    });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.0, &source, &delegate);
    controller.set_start_angle(0.0).expect("finite start angle");
    controller.reload_data();

    // Directly below the center lies a quarter turn past 0 rad in screen space.
    let below = Point::new(150.0, 225.0);
    assert_eq!(controller.touch_ended(below), Some(SlicePath::new(0, 0)));
    let above = Point::new(150.0, 75.0);
    assert_eq!(controller.touch_ended(above), Some(SlicePath::new(1, 0)));
}

#[test]
fn resized_viewport_moves_rings_on_the_next_reload() {
    let source = Rc::new(Rings {
        layers: vec![(vec![1.0], 50.0, 100.0)],
    });
    let delegate = Rc::new(RecordingDelegate::default());
    let mut controller = chart(0.0, &source, &delegate);
    controller.reload_data();

    let near_old_center = Point::new(150.0, 225.0);
    let near_new_center = Point::new(275.0, 100.0);
    controller
        .set_viewport(Viewport::new(400, 200))
        .expect("valid viewport");

    assert_eq!(controller.hit_test(near_old_center), Some(SlicePath::new(0, 0)));
    assert_eq!(controller.hit_test(near_new_center), None);

    controller.reload_data();

    assert_eq!(controller.hit_test(near_old_center), None);
    assert_eq!(controller.hit_test(near_new_center), Some(SlicePath::new(0, 0)));

    let id = controller.layers()[0].slots()[0].id;
    let path = controller
        .surface()
        .model_value(id, ArcProperty::Path)
        .and_then(ArcValue::as_path)
        .expect("path");
    assert_eq!(path.center, Point::new(200.0, 100.0));
}
