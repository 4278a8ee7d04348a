use std::fmt;

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::core::StrokeInterval;
use crate::render::{
    ArcPath, ArcPrimitiveId, ArcProperty, ArcSurface, ArcValue, Color, LabelPrimitive,
    PropertyAnimation, TransactionCompletion, stroke_interval,
};

/// Counters describing everything issued against a [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceStats {
    pub added: usize,
    pub removed: usize,
    pub animations: usize,
    pub committed_transactions: usize,
    pub completed_transactions: usize,
    pub rejected_mutations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    property: ArcProperty,
    from: ArcValue,
    to: ArcValue,
    elapsed: f64,
    duration: f64,
}

impl Transition {
    fn value(&self) -> ArcValue {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from.lerp(self.to, t)
    }
}

#[derive(Debug, Clone)]
struct PrimitiveState {
    layer: usize,
    path: ArcPath,
    stroke_start: f64,
    stroke_end: f64,
    color: Color,
    line_width: f64,
    label: Option<LabelPrimitive>,
    transitions: Vec<Transition>,
    presented: bool,
}

impl PrimitiveState {
    fn new(layer: usize) -> Self {
        Self {
            layer,
            path: ArcPath::default(),
            stroke_start: 0.0,
            stroke_end: 0.0,
            color: Color::TRANSPARENT,
            line_width: 0.0,
            label: None,
            transitions: Vec::new(),
            presented: false,
        }
    }

    fn model_value(&self, property: ArcProperty) -> ArcValue {
        match property {
            ArcProperty::Path => ArcValue::Path(self.path),
            ArcProperty::StrokeStart => ArcValue::Fraction(self.stroke_start),
            ArcProperty::StrokeEnd => ArcValue::Fraction(self.stroke_end),
        }
    }
}

struct OpenTransaction {
    duration: f64,
    touched: Vec<ArcPrimitiveId>,
}

struct PendingTransaction {
    remaining: f64,
    completion: TransactionCompletion,
}

/// In-memory surface used by tests and headless hosts.
///
/// It keeps per-layer stacking order, interpolates in-flight properties
/// linearly, and runs transaction completions once `advance` has covered
/// their duration. Mutations that fail validation are dropped and counted.
#[derive(Default)]
pub struct HeadlessSurface {
    next_id: u64,
    primitives: IndexMap<ArcPrimitiveId, PrimitiveState>,
    stacking: Vec<Vec<ArcPrimitiveId>>,
    open: Option<OpenTransaction>,
    pending: Vec<PendingTransaction>,
    animation_log: Vec<(ArcPrimitiveId, PropertyAnimation)>,
    stats: SurfaceStats,
}

impl fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("primitives", &self.primitives.len())
            .field("stacking", &self.stacking)
            .field("in_transaction", &self.open.is_some())
            .field("pending_transactions", &self.pending.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    #[must_use]
    pub fn contains(&self, id: ArcPrimitiveId) -> bool {
        self.primitives.contains_key(&id)
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Primitives of `layer`, bottom of the stack first.
    #[must_use]
    pub fn layer_stack(&self, layer: usize) -> &[ArcPrimitiveId] {
        self.stacking.get(layer).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn layer_of(&self, id: ArcPrimitiveId) -> Option<usize> {
        self.primitives.get(&id).map(|state| state.layer)
    }

    /// Target value of a property, ignoring any running transition.
    #[must_use]
    pub fn model_value(&self, id: ArcPrimitiveId, property: ArcProperty) -> Option<ArcValue> {
        self.primitives
            .get(&id)
            .map(|state| state.model_value(property))
    }

    #[must_use]
    pub fn model_stroke_interval(&self, id: ArcPrimitiveId) -> Option<StrokeInterval> {
        stroke_interval(
            self.model_value(id, ArcProperty::StrokeStart)?,
            self.model_value(id, ArcProperty::StrokeEnd)?,
        )
    }

    #[must_use]
    pub fn stroke_style(&self, id: ArcPrimitiveId) -> Option<(Color, f64)> {
        self.primitives
            .get(&id)
            .map(|state| (state.color, state.line_width))
    }

    #[must_use]
    pub fn label(&self, id: ArcPrimitiveId) -> Option<&LabelPrimitive> {
        self.primitives.get(&id).and_then(|state| state.label.as_ref())
    }

    /// Every animation issued so far, in issue order.
    #[must_use]
    pub fn animation_log(&self) -> &[(ArcPrimitiveId, PropertyAnimation)] {
        &self.animation_log
    }

    pub fn clear_animation_log(&mut self) {
        self.animation_log.clear();
    }

    #[must_use]
    pub fn pending_transactions(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.pending.is_empty()
            || self
                .primitives
                .values()
                .any(|state| !state.transitions.is_empty())
    }

    /// Moves the compositor clock forward and runs completions that came due.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            warn!(elapsed_seconds, "ignoring invalid surface clock step");
            return;
        }

        for state in self.primitives.values_mut() {
            for transition in &mut state.transitions {
                transition.elapsed += elapsed_seconds;
            }
            state
                .transitions
                .retain(|transition| transition.elapsed < transition.duration);
        }

        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            self.pending[index].remaining -= elapsed_seconds;
            if self.pending[index].remaining <= 0.0 {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }
        for transaction in due {
            self.complete(transaction.completion);
        }
    }

    /// Advances far enough to settle every running transition and transaction.
    pub fn finish_all(&mut self) {
        let longest_pending = self
            .pending
            .iter()
            .map(|transaction| transaction.remaining)
            .fold(0.0_f64, f64::max);
        let longest_transition = self
            .primitives
            .values()
            .flat_map(|state| state.transitions.iter())
            .map(|transition| transition.duration - transition.elapsed)
            .fold(0.0_f64, f64::max);
        self.advance(longest_pending.max(longest_transition));
    }

    fn complete(&mut self, completion: TransactionCompletion) {
        self.stats.completed_transactions += 1;
        completion(self);
    }

    fn reject(&mut self, id: ArcPrimitiveId, reason: &str) {
        self.stats.rejected_mutations += 1;
        warn!(primitive = id.raw(), reason, "rejected surface mutation");
    }
}

impl ArcSurface for HeadlessSurface {
    fn add_primitive(&mut self, layer: usize) -> ArcPrimitiveId {
        let id = ArcPrimitiveId::from_raw(self.next_id);
        self.next_id += 1;

        if self.stacking.len() <= layer {
            self.stacking.resize_with(layer + 1, Vec::new);
        }
        self.stacking[layer].insert(0, id);
        self.primitives.insert(id, PrimitiveState::new(layer));
        self.stats.added += 1;
        trace!(primitive = id.raw(), layer, "add arc primitive");
        id
    }

    fn remove_primitive(&mut self, id: ArcPrimitiveId) -> bool {
        let Some(state) = self.primitives.shift_remove(&id) else {
            return false;
        };
        if let Some(stack) = self.stacking.get_mut(state.layer) {
            stack.retain(|candidate| *candidate != id);
        }
        self.stats.removed += 1;
        trace!(primitive = id.raw(), layer = state.layer, "remove arc primitive");
        true
    }

    fn presented_value(&self, id: ArcPrimitiveId, property: ArcProperty) -> Option<ArcValue> {
        let state = self.primitives.get(&id)?;
        if !state.presented {
            return None;
        }
        let in_flight = state
            .transitions
            .iter()
            .rev()
            .find(|transition| transition.property == property);
        Some(in_flight.map_or_else(|| state.model_value(property), Transition::value))
    }

    fn animate(&mut self, id: ArcPrimitiveId, animation: PropertyAnimation) {
        if let Err(err) = animation.validate() {
            self.reject(id, &err.to_string());
            return;
        }
        let duration = self.open.as_ref().map_or(0.0, |open| open.duration);
        let Some(state) = self.primitives.get_mut(&id) else {
            self.reject(id, "unknown primitive");
            return;
        };

        match (animation.property, animation.to) {
            (ArcProperty::Path, ArcValue::Path(path)) => state.path = path,
            (ArcProperty::StrokeStart, ArcValue::Fraction(value)) => state.stroke_start = value,
            (ArcProperty::StrokeEnd, ArcValue::Fraction(value)) => state.stroke_end = value,
            _ => {}
        }
        state
            .transitions
            .retain(|transition| transition.property != animation.property);
        if duration > 0.0 {
            state.transitions.push(Transition {
                property: animation.property,
                from: animation.from,
                to: animation.to,
                elapsed: 0.0,
                duration,
            });
        }

        match self.open.as_mut() {
            Some(open) => open.touched.push(id),
            None => state.presented = true,
        }
        self.animation_log.push((id, animation));
        self.stats.animations += 1;
    }

    fn set_stroke_style(&mut self, id: ArcPrimitiveId, color: Color, line_width: f64) {
        if let Err(err) = color.validate() {
            self.reject(id, &err.to_string());
            return;
        }
        if !line_width.is_finite() || line_width < 0.0 {
            self.reject(id, "line width must be finite and >= 0");
            return;
        }
        match self.primitives.get_mut(&id) {
            Some(state) => {
                state.color = color;
                state.line_width = line_width;
            }
            None => self.reject(id, "unknown primitive"),
        }
    }

    fn set_label(&mut self, id: ArcPrimitiveId, label: Option<LabelPrimitive>) {
        if let Some(Err(err)) = label.as_ref().map(LabelPrimitive::validate) {
            self.reject(id, &err.to_string());
            return;
        }
        match self.primitives.get_mut(&id) {
            Some(state) => state.label = label,
            None => self.reject(id, "unknown primitive"),
        }
    }

    fn begin_transaction(&mut self, duration_seconds: f64) {
        if self.open.is_some() {
            warn!("begin_transaction while a transaction is open; merging into it");
            return;
        }
        let duration = if duration_seconds.is_finite() {
            duration_seconds.max(0.0)
        } else {
            0.0
        };
        self.open = Some(OpenTransaction {
            duration,
            touched: Vec::new(),
        });
    }

    fn commit_transaction(&mut self, completion: TransactionCompletion) {
        let open = self.open.take().unwrap_or(OpenTransaction {
            duration: 0.0,
            touched: Vec::new(),
        });
        for id in &open.touched {
            if let Some(state) = self.primitives.get_mut(id) {
                state.presented = true;
            }
        }
        self.stats.committed_transactions += 1;

        if open.duration > 0.0 {
            self.pending.push(PendingTransaction {
                remaining: open.duration,
                completion,
            });
        } else {
            self.complete(completion);
        }
    }
}
