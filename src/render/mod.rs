mod headless_surface;
mod primitives;

pub use headless_surface::{HeadlessSurface, SurfaceStats};
pub use primitives::{
    ArcPath, ArcPrimitiveId, ArcProperty, ArcValue, Color, LabelFont, LabelPrimitive,
    PropertyAnimation, stroke_interval,
};

/// Callback a surface runs once when a committed transaction finishes.
///
/// It receives the surface itself so deferred detachment can happen without
/// the caller holding a second handle to it.
pub type TransactionCompletion = Box<dyn FnOnce(&mut dyn ArcSurface)>;

/// Contract implemented by any drawing/animation backend.
///
/// The controller owns the surface and addresses primitives only through
/// opaque ids, so reconciliation and scheduling stay testable without a
/// display. All calls happen on the surface's event thread.
pub trait ArcSurface {
    /// Creates a primitive with empty stroke beneath every existing primitive of `layer`.
    fn add_primitive(&mut self, layer: usize) -> ArcPrimitiveId;

    /// Detaches a primitive. Returns `false` if it was already gone.
    fn remove_primitive(&mut self, id: ArcPrimitiveId) -> bool;

    /// Value currently on screen, including in-flight interpolation.
    ///
    /// `None` until the primitive has been presented at least once.
    fn presented_value(&self, id: ArcPrimitiveId, property: ArcProperty) -> Option<ArcValue>;

    /// Starts a transition and sets the model value to `animation.to`.
    fn animate(&mut self, id: ArcPrimitiveId, animation: PropertyAnimation);

    fn set_stroke_style(&mut self, id: ArcPrimitiveId, color: Color, line_width: f64);

    fn set_label(&mut self, id: ArcPrimitiveId, label: Option<LabelPrimitive>);

    /// Opens a batch; every mutation until commit shares `duration_seconds`.
    fn begin_transaction(&mut self, duration_seconds: f64);

    /// Closes the batch. `completion` runs exactly once, after the batch's
    /// animations finish (immediately when the duration is zero).
    fn commit_transaction(&mut self, completion: TransactionCompletion);
}
