use tracing::warn;

use crate::core::{ChartItem, RingRadii, SliceModel, SlicePath};
use crate::render::LabelFont;

/// Supplies layered slice data to a chart.
///
/// Implementations are owned by the host application; the controller only
/// keeps a weak handle. Every query may decline to answer, in which case the
/// affected slice or layer is skipped for that pass.
pub trait ChartDataSource {
    fn number_of_layers(&self) -> usize;

    fn number_of_slices(&self, layer_index: usize) -> usize;

    fn item(&self, path: SlicePath) -> Option<ChartItem>;

    fn inner_radius(&self, layer_index: usize) -> Option<f64>;

    fn outer_radius(&self, layer_index: usize) -> Option<f64>;

    /// Font for this layer's labels. `None` falls back to the chart default.
    fn label_font(&self, _layer_index: usize) -> Option<LabelFont> {
        None
    }
}

/// Receives slice selection events.
pub trait ChartDelegate {
    fn on_slice_selected(&self, path: SlicePath);
}

/// Pulls everything one render pass needs for `layer_index`.
pub(crate) fn capture_layer(
    source: &dyn ChartDataSource,
    layer_index: usize,
    default_font: &LabelFont,
) -> SliceModel {
    let slice_count = source.number_of_slices(layer_index);
    let items = (0..slice_count)
        .map(|index| source.item(SlicePath::new(index, layer_index)))
        .collect();

    let radii = match (
        source.inner_radius(layer_index),
        source.outer_radius(layer_index),
    ) {
        (Some(inner), Some(outer)) => {
            let radii = RingRadii::new(inner, outer);
            if radii.is_none() {
                warn!(
                    layer_index,
                    inner, outer, "ignoring ring radii outside 0 <= inner < outer"
                );
            }
            radii
        }
        _ => None,
    };

    let label_font = source
        .label_font(layer_index)
        .filter(|font| font.validate().is_ok())
        .unwrap_or_else(|| default_font.clone());

    SliceModel {
        layer_index,
        items,
        radii,
        label_font,
    }
}
