use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{RingRadii, StrokeInterval};
use crate::render::{ArcPrimitiveId, ArcSurface};

/// Primitives detached from a layer during one pass, pending their collapse animation.
pub type RemovedArcs = SmallVec<[ArcPrimitiveId; 8]>;

/// Structural and geometric changes needed to bring one layer up to date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcilePlan {
    pub previous_count: usize,
    /// Slice count after the empty-layer rule has been applied.
    pub effective_count: usize,
    /// New primitives to insert at the front of the layer.
    pub to_create: usize,
    /// Primitives to drop from the back of the layer.
    pub to_remove: usize,
    /// Target interval per final slot, in slice order.
    pub intervals: Vec<StrokeInterval>,
}

impl ReconcilePlan {
    #[must_use]
    pub fn is_structural(&self) -> bool {
        self.to_create > 0 || self.to_remove > 0
    }
}

/// Diffs `previous_count` rendered arcs against the new slice `values`.
///
/// A layer whose signed total is not positive renders nothing, whatever the
/// reported slice count. Non-finite values weigh nothing.
///
/// Slots are matched by position: reordering slices between passes looks the
/// same as changing the values at those positions.
#[must_use]
pub fn plan_layer(previous_count: usize, values: &[f64]) -> ReconcilePlan {
    let scale = largest_magnitude(values);
    let signed_total: f64 = values
        .iter()
        .map(|value| finite_or_zero(*value) / scale)
        .sum();
    let effective_count = if values.is_empty() || signed_total <= 0.0 {
        0
    } else {
        values.len()
    };

    let intervals = if effective_count == 0 {
        Vec::new()
    } else {
        stroke_intervals(values)
    };

    ReconcilePlan {
        previous_count,
        effective_count,
        to_create: effective_count.saturating_sub(previous_count),
        to_remove: previous_count.saturating_sub(effective_count),
        intervals,
    }
}

/// Partitions the full circle proportionally to `|value|`, in order.
///
/// Returns an empty list when there is no magnitude to distribute. Values are
/// scaled by the largest magnitude first so sums near `f64::MAX` stay finite.
#[must_use]
pub fn stroke_intervals(values: &[f64]) -> Vec<StrokeInterval> {
    let scale = largest_magnitude(values);
    let total: f64 = values
        .iter()
        .map(|value| finite_or_zero(*value).abs() / scale)
        .sum();
    if !total.is_finite() || total <= 0.0 {
        return Vec::new();
    }

    let mut cumulative = 0.0;
    values
        .iter()
        .map(|value| {
            let magnitude = finite_or_zero(*value).abs() / scale;
            let interval =
                StrokeInterval::new(cumulative / total, (cumulative + magnitude) / total);
            cumulative += magnitude;
            interval
        })
        .collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Largest finite magnitude in `values`, or 1 when there is none.
fn largest_magnitude(values: &[f64]) -> f64 {
    let largest = values
        .iter()
        .map(|value| finite_or_zero(*value).abs())
        .fold(0.0_f64, f64::max);
    if largest > 0.0 { largest } else { 1.0 }
}

/// One rendered arc and the interval it was last assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSlot {
    pub id: ArcPrimitiveId,
    pub interval: StrokeInterval,
}

/// Arcs currently rendered for one layer, index-aligned with slice order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerArcSet {
    layer_index: usize,
    slots: Vec<ArcSlot>,
    radii: Option<RingRadii>,
}

impl LayerArcSet {
    #[must_use]
    pub fn new(layer_index: usize) -> Self {
        Self {
            layer_index,
            slots: Vec::new(),
            radii: None,
        }
    }

    #[must_use]
    pub fn layer_index(&self) -> usize {
        self.layer_index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[ArcSlot] {
        &self.slots
    }

    /// Radii the slots were last laid out with.
    #[must_use]
    pub fn radii(&self) -> Option<RingRadii> {
        self.radii
    }

    pub(crate) fn set_radii(&mut self, radii: Option<RingRadii>) {
        self.radii = radii;
    }

    pub(crate) fn set_interval(&mut self, index: usize, interval: StrokeInterval) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.interval = interval;
        }
    }

    /// Applies the structural half of `plan`: new primitives go to the front,
    /// surplus ones leave from the back and are handed back for collapsing.
    pub(crate) fn apply_structure<S>(&mut self, plan: &ReconcilePlan, surface: &mut S) -> RemovedArcs
    where
        S: ArcSurface + ?Sized,
    {
        for _ in 0..plan.to_create {
            let id = surface.add_primitive(self.layer_index);
            self.slots.insert(
                0,
                ArcSlot {
                    id,
                    interval: StrokeInterval::default(),
                },
            );
        }

        let mut removed = RemovedArcs::new();
        for _ in 0..plan.to_remove {
            match self.slots.pop() {
                Some(slot) => removed.push(slot.id),
                None => break,
            }
        }
        removed
    }
}
