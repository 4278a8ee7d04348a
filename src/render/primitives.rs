use serde::{Deserialize, Serialize};

use crate::core::{Point, StrokeInterval};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Font descriptor for slice labels. Resolution to a real face is the host's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFont {
    pub family: String,
    pub point_size: f64,
    #[serde(default)]
    pub bold: bool,
}

impl LabelFont {
    #[must_use]
    pub fn new(family: impl Into<String>, point_size: f64) -> Self {
        Self {
            family: family.into(),
            point_size,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold_system(point_size: f64) -> Self {
        Self {
            family: "system".to_owned(),
            point_size,
            bold: true,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.point_size.is_finite() || self.point_size <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for LabelFont {
    fn default() -> Self {
        Self::bold_system(14.0)
    }
}

/// Opaque handle to an arc primitive owned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArcPrimitiveId(u64);

impl ArcPrimitiveId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Animatable properties of an arc primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcProperty {
    Path,
    StrokeStart,
    StrokeEnd,
}

/// Full-circle stroke path an arc primitive trims with its stroke fractions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
}

impl ArcPath {
    #[must_use]
    pub const fn new(center: Point, radius: f64, start_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
        }
    }

    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            center: Point::new(
                lerp(self.center.x, to.center.x, t),
                lerp(self.center.y, to.center.y, t),
            ),
            radius: lerp(self.radius, to.radius, t),
            start_angle: lerp(self.start_angle, to.start_angle, t),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.center.is_finite() || !self.start_angle.is_finite() {
            return Err(ChartError::InvalidAnimation(
                "arc path center and start angle must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidAnimation(
                "arc path radius must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Value carried by one animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArcValue {
    Path(ArcPath),
    Fraction(f64),
}

impl ArcValue {
    /// Value an animation starts from when nothing has been presented yet.
    #[must_use]
    pub fn zero_for(property: ArcProperty) -> Self {
        match property {
            ArcProperty::Path => Self::Path(ArcPath::default()),
            ArcProperty::StrokeStart | ArcProperty::StrokeEnd => Self::Fraction(0.0),
        }
    }

    #[must_use]
    pub fn matches(self, property: ArcProperty) -> bool {
        matches!(
            (self, property),
            (Self::Path(_), ArcProperty::Path)
                | (
                    Self::Fraction(_),
                    ArcProperty::StrokeStart | ArcProperty::StrokeEnd
                )
        )
    }

    /// Linear blend; mismatched kinds jump straight to `to`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        match (self, to) {
            (Self::Path(from), Self::Path(to)) => Self::Path(from.lerp(to, t)),
            (Self::Fraction(from), Self::Fraction(to)) => Self::Fraction(lerp(from, to, t)),
            (_, to) => to,
        }
    }

    #[must_use]
    pub fn as_fraction(self) -> Option<f64> {
        match self {
            Self::Fraction(value) => Some(value),
            Self::Path(_) => None,
        }
    }

    #[must_use]
    pub fn as_path(self) -> Option<ArcPath> {
        match self {
            Self::Path(path) => Some(path),
            Self::Fraction(_) => None,
        }
    }
}

/// One property transition issued inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnimation {
    pub property: ArcProperty,
    pub from: ArcValue,
    pub to: ArcValue,
}

impl PropertyAnimation {
    pub fn validate(self) -> ChartResult<()> {
        if !self.from.matches(self.property) || !self.to.matches(self.property) {
            return Err(ChartError::InvalidAnimation(format!(
                "animation values do not match property {:?}",
                self.property
            )));
        }
        for value in [self.from, self.to] {
            match value {
                ArcValue::Path(path) => path.validate()?,
                ArcValue::Fraction(fraction) => {
                    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                        return Err(ChartError::InvalidAnimation(
                            "stroke fraction must be finite and in [0, 1]".to_owned(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Description text anchored at the middle of a slice's arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPrimitive {
    pub text: String,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub font: LabelFont,
    pub color: Color,
}

impl LabelPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "label primitive must not be empty".to_owned(),
            ));
        }
        if !self.position.is_finite() {
            return Err(ChartError::InvalidData(
                "label position must be finite".to_owned(),
            ));
        }
        self.font.validate()?;
        self.color.validate()
    }
}

/// Stroke interval a primitive currently targets, read back from its properties.
#[must_use]
pub fn stroke_interval(start: ArcValue, end: ArcValue) -> Option<StrokeInterval> {
    Some(StrokeInterval::new(start.as_fraction()?, end.as_fraction()?))
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
