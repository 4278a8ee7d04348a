use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::core::types::Point;

/// Visible portion of a ring expressed as fractions of the full circle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrokeInterval {
    pub start: f64,
    pub end: f64,
}

impl StrokeInterval {
    /// Interval every removed arc collapses into before it is detached.
    pub const COLLAPSED: Self = Self {
        start: 1.0,
        end: 1.0,
    };

    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }
}

/// Brings `angle` into `[-π, π)` by whole turns.
///
/// Large magnitudes are reduced in one step; the loops only absorb rounding
/// at the interval edges. Non-finite input comes back as NaN.
#[must_use]
pub fn normalize_start_angle(angle: f64) -> f64 {
    let mut angle = (angle + PI).rem_euclid(TAU) - PI;
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Point on the circle of `radius` at `angle_fraction` of a turn past `start_angle`.
#[must_use]
pub fn arc_point(center: Point, radius: f64, angle_fraction: f64, start_angle: f64) -> Point {
    let angle = angle_fraction * TAU + start_angle;
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Point halfway along the arc between two stroke fractions.
#[must_use]
pub fn arc_mid_point(
    center: Point,
    radius: f64,
    interval: StrokeInterval,
    start_angle: f64,
) -> Point {
    arc_point(
        center,
        radius,
        (interval.start + interval.end) / 2.0,
        start_angle,
    )
}

#[must_use]
pub fn arc_length(radius: f64, interval: StrokeInterval) -> f64 {
    interval.span() * TAU * radius
}

/// Rings are stroked full circles drawn at the mid radius of the annulus.
#[must_use]
pub fn stroke_radius(inner_radius: f64, outer_radius: f64) -> f64 {
    (outer_radius + inner_radius) / 2.0
}

#[must_use]
pub fn stroke_width(inner_radius: f64, outer_radius: f64) -> f64 {
    outer_radius - inner_radius
}

/// Angle of `point` around `center`, measured from `start_angle`, in `[0, 2π)`.
#[must_use]
pub fn relative_angle(point: Point, center: Point, start_angle: f64) -> f64 {
    let mut angle = (point.y - center.y).atan2(point.x - center.x) - start_angle;
    if angle < 0.0 {
        angle += TAU;
    }
    angle
}

/// Whether `point` lies inside the annular sector spanned by `interval`.
///
/// Both angular and radial bounds are exclusive: a touch exactly on a slice
/// edge or on a ring boundary is a miss.
#[must_use]
pub fn point_in_annulus(
    point: Point,
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    interval: StrokeInterval,
) -> bool {
    let angle = relative_angle(point, center, start_angle);
    let distance = point.distance_to(center);

    angle > interval.start * TAU
        && angle < interval.end * TAU
        && distance > inner_radius
        && distance < outer_radius
}
