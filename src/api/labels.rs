use crate::core::{
    ChartItem, Point, RingRadii, StrokeInterval, arc_length, arc_mid_point, stroke_radius,
};
use crate::render::{Color, LabelFont, LabelPrimitive};

/// Deterministic, backend-independent text extent in points.
#[must_use]
pub fn estimate_label_size(text: &str, font: &LabelFont) -> (f64, f64) {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    let weight = if font.bold { 1.06 } else { 1.0 };
    (units * font.point_size * weight, font.point_size)
}

/// Everything needed to place one slice's description.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LabelContext<'a> {
    pub show_description_text: bool,
    pub font: &'a LabelFont,
    pub center: Point,
    pub radii: RingRadii,
    pub start_angle: f64,
}

/// Label for a live slice, or `None` when disabled, blank or too long for its arc.
pub(crate) fn layout_slice_label(
    item: &ChartItem,
    interval: StrokeInterval,
    context: LabelContext<'_>,
) -> Option<LabelPrimitive> {
    if !context.show_description_text {
        return None;
    }
    let text = item.description.as_deref().filter(|text| !text.is_empty())?;

    let (width, height) = estimate_label_size(text, context.font);
    let radius = stroke_radius(context.radii.inner, context.radii.outer);
    if arc_length(radius, interval) < width.max(height) {
        return None;
    }

    Some(LabelPrimitive {
        text: text.to_owned(),
        position: arc_mid_point(context.center, radius, interval, context.start_angle),
        width,
        height,
        font: context.font.clone(),
        color: Color::BLACK,
    })
}
