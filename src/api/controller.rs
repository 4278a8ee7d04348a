use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::core::{
    Point, SliceModel, SlicePath, Viewport, stroke_radius, stroke_width,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartPhase, InteractionState, TouchState};
use crate::render::{ArcPath, ArcSurface, LabelFont};

use super::animation::{AnimationScheduler, SliceUpdate};
use super::data_source::capture_layer;
use super::hit_test::HitTester;
use super::labels::{LabelContext, layout_slice_label};
use super::reconciler::{LayerArcSet, plan_layer};
use super::{
    ChartConfig, ChartDataSource, ChartDelegate, ChartSnapshot, ChartState, LayerSnapshot,
};

/// Main orchestration facade consumed by host applications.
///
/// `ChartController` pulls layer data from its data source, diffs it against
/// the arcs already on the surface, schedules the resulting animations, and
/// resolves touches back to slices. Data source and delegate are held weakly;
/// the host owns them.
pub struct ChartController<S: ArcSurface> {
    surface: S,
    viewport: Viewport,
    state: ChartState,
    layers: Vec<LayerArcSet>,
    interaction: InteractionState,
    hit_tester: HitTester,
    data_source: Option<Weak<dyn ChartDataSource>>,
    delegate: Option<Weak<dyn ChartDelegate>>,
}

impl<S: ArcSurface> ChartController<S> {
    pub fn new(surface: S, config: ChartConfig) -> ChartResult<Self> {
        validate_viewport(config.viewport)?;
        let state = ChartState::from_config(&config)?;
        let hit_tester = HitTester::new(config.viewport.center(), state.start_angle());

        Ok(Self {
            surface,
            viewport: config.viewport,
            state,
            layers: Vec::new(),
            interaction: InteractionState::default(),
            hit_tester,
            data_source: None,
            delegate: None,
        })
    }

    pub fn set_data_source<D: ChartDataSource + 'static>(&mut self, source: &Rc<D>) {
        let source = Rc::downgrade(source);
        self.data_source = Some(source as Weak<dyn ChartDataSource>);
    }

    pub fn clear_data_source(&mut self) {
        self.data_source = None;
    }

    pub fn set_delegate<D: ChartDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let delegate = Rc::downgrade(delegate);
        self.delegate = Some(delegate as Weak<dyn ChartDelegate>);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Hosts drive the surface clock through this handle.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resizes the chart. Arcs move to the new center on the next reload.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        validate_viewport(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.state.start_angle()
    }

    /// Stores `start_angle` normalized into `[-π, π)`.
    pub fn set_start_angle(&mut self, start_angle: f64) -> ChartResult<()> {
        self.state.set_start_angle(start_angle)
    }

    #[must_use]
    pub fn selected_pie_offset(&self) -> f64 {
        self.state.selected_pie_offset()
    }

    pub fn set_selected_pie_offset(&mut self, offset: f64) -> ChartResult<()> {
        self.state.set_selected_pie_offset(offset)
    }

    #[must_use]
    pub fn label_font(&self) -> &LabelFont {
        self.state.label_font()
    }

    pub fn set_label_font(&mut self, font: LabelFont) -> ChartResult<()> {
        self.state.set_label_font(font)
    }

    #[must_use]
    pub fn show_description_text(&self) -> bool {
        self.state.show_description_text()
    }

    pub fn set_show_description_text(&mut self, show: bool) {
        self.state.set_show_description_text(show);
    }

    #[must_use]
    pub fn animation_duration(&self) -> f64 {
        self.state.animation_duration()
    }

    pub fn set_animation_duration(&mut self, seconds: f64) -> ChartResult<()> {
        self.state.set_animation_duration(seconds)
    }

    #[must_use]
    pub fn phase(&self) -> ChartPhase {
        self.interaction.phase()
    }

    #[must_use]
    pub fn interaction_enabled(&self) -> bool {
        self.interaction.accepts_touches()
    }

    #[must_use]
    pub fn touch_state(&self) -> TouchState {
        self.interaction.touch()
    }

    #[must_use]
    pub fn layers(&self) -> &[LayerArcSet] {
        &self.layers
    }

    /// Pulls every layer from the data source and reconciles it.
    ///
    /// Layers the source stopped reporting are reconciled to empty so their
    /// arcs collapse and detach. Without a live data source this is a no-op.
    pub fn reload_data(&mut self) {
        let Some(source) = self.data_source.as_ref().and_then(Weak::upgrade) else {
            debug!("reload skipped: no data source attached");
            return;
        };

        self.interaction.on_reconcile_start();
        let layer_count = source.number_of_layers();
        let previous_layers = self.layers.len();
        while self.layers.len() < layer_count {
            self.layers.push(LayerArcSet::new(self.layers.len()));
        }

        let center = self.viewport.center();
        let start_angle = self.state.start_angle();
        for layer_index in 0..self.layers.len() {
            let model = if layer_index < layer_count {
                capture_layer(source.as_ref(), layer_index, self.state.label_font())
            } else {
                SliceModel::empty(layer_index, self.state.label_font().clone())
            };
            self.draw_layer(&model, center, start_angle);
        }

        while self
            .layers
            .last()
            .is_some_and(|layer| layer.layer_index() >= layer_count && layer.is_empty())
        {
            self.layers.pop();
        }

        self.hit_tester = HitTester::new(center, start_angle);
        self.interaction.on_reconcile_end();
        debug!(
            layer_count,
            previous_layers,
            in_flight = self.interaction.gate().in_flight(),
            "reload data"
        );
    }

    fn draw_layer(&mut self, model: &SliceModel, center: Point, start_angle: f64) {
        let layer_index = model.layer_index;
        let Some(arcs) = self.layers.get_mut(layer_index) else {
            return;
        };

        let plan = plan_layer(arcs.len(), &model.values());
        debug!(
            layer_index,
            previous = plan.previous_count,
            effective = plan.effective_count,
            create = plan.to_create,
            remove = plan.to_remove,
            "reconcile layer"
        );

        let path = model
            .radii
            .map(|radii| ArcPath::new(center, stroke_radius(radii.inner, radii.outer), start_angle));
        let show_description_text = self.state.show_description_text();
        let scheduler = AnimationScheduler::new(self.state.animation_duration());

        let report = scheduler.run(&mut self.surface, self.interaction.gate(), |tx| {
            let removed = arcs.apply_structure(&plan, tx.surface_mut());
            for id in removed {
                tx.collapse(id, path);
            }

            let (Some(radii), Some(path)) = (model.radii, path) else {
                if plan.effective_count > 0 {
                    warn!(layer_index, "layer radii unavailable; skipping slice updates");
                }
                return;
            };
            let label_context = LabelContext {
                show_description_text,
                font: &model.label_font,
                center,
                radii,
                start_angle,
            };

            for (index, interval) in plan.intervals.iter().copied().enumerate() {
                let Some(slot) = arcs.slots().get(index).copied() else {
                    break;
                };
                let Some(item) = model.item(index) else {
                    warn!(layer_index, slice_index = index, "slice item unavailable; skipping");
                    continue;
                };
                tx.update_slice(
                    slot.id,
                    SliceUpdate {
                        path,
                        line_width: stroke_width(radii.inner, radii.outer),
                        color: item.color,
                        interval,
                        label: layout_slice_label(item, interval, label_context),
                    },
                );
                arcs.set_interval(index, interval);
            }
        });
        arcs.set_radii(model.radii);

        trace!(
            layer_index,
            animations = report.animations,
            deferred_removals = report.deferred_removals,
            duration = report.duration_seconds,
            "scheduled layer transaction"
        );
    }

    /// Slice under `point` in the last laid-out geometry, ignoring the
    /// interaction gate and without notifying anyone.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<SlicePath> {
        self.hit_tester.hit_test(point, &self.layers)
    }

    /// Handles the end of a single touch.
    ///
    /// Touches that land while a transaction is in flight are dropped. On a
    /// hit the delegate is told once; misses notify nobody.
    pub fn touch_ended(&mut self, point: Point) -> Option<SlicePath> {
        if !self.interaction.accepts_touches() {
            self.interaction.on_touch_suppressed(point);
            debug!(
                x = point.x,
                y = point.y,
                in_flight = self.interaction.gate().in_flight(),
                "touch suppressed during animation"
            );
            return None;
        }

        let hit = self.hit_test(point);
        self.interaction.on_touch_resolved(point, hit);
        let path = hit?;

        match self.delegate.as_ref().and_then(Weak::upgrade) {
            Some(delegate) => {
                debug!(
                    layer_index = path.layer_index,
                    slice_index = path.index,
                    "slice selected"
                );
                delegate.on_slice_selected(path);
            }
            None => trace!("slice hit without a live delegate"),
        }
        Some(path)
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            viewport: self.viewport,
            state: self.state.clone(),
            phase: self.phase(),
            touch: self.touch_state(),
            layers: self
                .layers
                .iter()
                .map(|layer| LayerSnapshot {
                    layer_index: layer.layer_index(),
                    radii: layer.radii(),
                    slots: layer.slots().to_vec(),
                })
                .collect(),
        }
    }
}

fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}
