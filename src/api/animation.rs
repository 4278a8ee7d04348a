use tracing::trace;

use crate::core::StrokeInterval;
use crate::interaction::InteractionGate;
use crate::render::{
    ArcPath, ArcPrimitiveId, ArcProperty, ArcSurface, ArcValue, Color, LabelPrimitive,
    PropertyAnimation,
};

use super::reconciler::RemovedArcs;

/// Outcome of one scheduled transaction, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionReport {
    pub duration_seconds: f64,
    pub animations: usize,
    pub deferred_removals: usize,
}

/// Target state for one live slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceUpdate {
    pub path: ArcPath,
    pub line_width: f64,
    pub color: Color,
    pub interval: StrokeInterval,
    pub label: Option<LabelPrimitive>,
}

/// Mutations issued against the surface while a transaction is open.
pub struct LayerTransaction<'a, S: ArcSurface + ?Sized> {
    surface: &'a mut S,
    removals: RemovedArcs,
    animations: usize,
}

impl<S: ArcSurface + ?Sized> LayerTransaction<'_, S> {
    pub fn surface_mut(&mut self) -> &mut S {
        &mut *self.surface
    }

    /// Animates `property` from whatever is on screen now to `to`.
    ///
    /// Primitives that were never presented start from the property's zero,
    /// so fresh arcs grow out of nothing instead of snapping in.
    pub fn animate_to(&mut self, id: ArcPrimitiveId, property: ArcProperty, to: ArcValue) {
        let from = self
            .surface
            .presented_value(id, property)
            .unwrap_or_else(|| ArcValue::zero_for(property));
        self.surface
            .animate(id, PropertyAnimation { property, from, to });
        self.animations += 1;
    }

    pub fn animate_interval(&mut self, id: ArcPrimitiveId, interval: StrokeInterval) {
        self.animate_to(
            id,
            ArcProperty::StrokeStart,
            ArcValue::Fraction(interval.start),
        );
        self.animate_to(id, ArcProperty::StrokeEnd, ArcValue::Fraction(interval.end));
    }

    pub fn update_slice(&mut self, id: ArcPrimitiveId, update: SliceUpdate) {
        self.animate_to(id, ArcProperty::Path, ArcValue::Path(update.path));
        self.surface
            .set_stroke_style(id, update.color, update.line_width);
        self.animate_interval(id, update.interval);
        self.surface.set_label(id, update.label);
    }

    /// Shrinks a removed arc to a point at the end of the circle and queues
    /// its detachment for the transaction's completion.
    pub fn collapse(&mut self, id: ArcPrimitiveId, path: Option<ArcPath>) {
        if let Some(path) = path {
            self.animate_to(id, ArcProperty::Path, ArcValue::Path(path));
        }
        self.animate_interval(id, StrokeInterval::COLLAPSED);
        self.surface.set_label(id, None);
        self.removals.push(id);
    }
}

/// Wraps one layer's mutations in a single timed transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationScheduler {
    duration_seconds: f64,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new(duration_seconds: f64) -> Self {
        Self { duration_seconds }
    }

    #[must_use]
    pub fn duration_seconds(self) -> f64 {
        self.duration_seconds
    }

    /// Closes `gate`, opens a transaction, lets `build` issue mutations, then
    /// commits with a completion that detaches collapsed arcs and reopens
    /// the gate. Detaching is idempotent, so a completion that lands after a
    /// later pass already touched the same layer is harmless.
    pub fn run<S, F>(&self, surface: &mut S, gate: &InteractionGate, build: F) -> TransactionReport
    where
        S: ArcSurface + ?Sized,
        F: FnOnce(&mut LayerTransaction<'_, S>),
    {
        gate.close();
        surface.begin_transaction(self.duration_seconds);

        let mut transaction = LayerTransaction {
            surface,
            removals: RemovedArcs::new(),
            animations: 0,
        };
        build(&mut transaction);
        let LayerTransaction {
            surface,
            removals,
            animations,
        } = transaction;

        let report = TransactionReport {
            duration_seconds: self.duration_seconds,
            animations,
            deferred_removals: removals.len(),
        };

        let gate = gate.clone();
        surface.commit_transaction(Box::new(move |surface: &mut dyn ArcSurface| {
            for id in removals {
                if !surface.remove_primitive(id) {
                    trace!(primitive = id.raw(), "arc already detached");
                }
            }
            gate.reopen();
        }));

        report
    }
}
