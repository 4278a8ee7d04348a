pub mod geometry;
pub mod slice_model;
pub mod types;

pub use geometry::{
    StrokeInterval, arc_length, arc_mid_point, arc_point, normalize_start_angle,
    point_in_annulus, relative_angle, stroke_radius, stroke_width,
};
pub use slice_model::{ChartItem, RingRadii, SliceModel};
pub use types::{Point, SlicePath, Viewport};
