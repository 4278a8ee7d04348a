use serde::{Deserialize, Serialize};

use crate::render::{Color, LabelFont};

/// One weighted slice as supplied by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartItem {
    /// Signed weight. Arcs are sized by magnitude.
    pub value: f64,
    pub color: Color,
    #[serde(default)]
    pub description: Option<String>,
}

impl ChartItem {
    #[must_use]
    pub fn new(value: f64, color: Color) -> Self {
        Self {
            value,
            color,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Inner/outer radius of one ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingRadii {
    pub inner: f64,
    pub outer: f64,
}

impl RingRadii {
    /// Accepts only finite radii with `0 <= inner < outer`.
    #[must_use]
    pub fn new(inner: f64, outer: f64) -> Option<Self> {
        let valid = inner.is_finite() && outer.is_finite() && inner >= 0.0 && outer > inner;
        valid.then_some(Self { inner, outer })
    }
}

/// Read-only capture of one layer, taken once per render pass.
///
/// Entries the data source could not answer stay `None`; the render path
/// skips them instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceModel {
    pub layer_index: usize,
    pub items: Vec<Option<ChartItem>>,
    pub radii: Option<RingRadii>,
    pub label_font: LabelFont,
}

impl SliceModel {
    #[must_use]
    pub fn empty(layer_index: usize, label_font: LabelFont) -> Self {
        Self {
            layer_index,
            items: Vec::new(),
            radii: None,
            label_font,
        }
    }

    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.items.len()
    }

    /// Slice values in data-source order; unanswered items weigh nothing.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.items
            .iter()
            .map(|item| item.as_ref().map_or(0.0, |item| item.value))
            .collect()
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&ChartItem> {
        self.items.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartItem, RingRadii, SliceModel};
    use crate::render::{Color, LabelFont};

    #[test]
    fn ring_radii_reject_inverted_or_negative_bounds() {
        assert!(RingRadii::new(50.0, 100.0).is_some());
        assert!(RingRadii::new(0.0, 10.0).is_some());
        assert!(RingRadii::new(100.0, 50.0).is_none());
        assert!(RingRadii::new(-1.0, 50.0).is_none());
        assert!(RingRadii::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn missing_items_weigh_nothing() {
        let mut model = SliceModel::empty(0, LabelFont::default());
        model.items = vec![
            Some(ChartItem::new(2.0, Color::BLACK)),
            None,
            Some(ChartItem::new(-1.0, Color::BLACK)),
        ];
        assert_eq!(model.values(), vec![2.0, 0.0, -1.0]);
        assert!(model.item(1).is_none());
        assert_eq!(model.slice_count(), 3);
    }
}
