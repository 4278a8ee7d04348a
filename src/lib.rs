//! doughnut-chart: layout, animation-diffing and hit-testing core for
//! layered doughnut/pie charts.
//!
//! Drawing is delegated to an injected [`render::ArcSurface`]; this crate
//! decides which arc primitives exist, where each one starts and ends, how
//! they animate between data reloads, and which slice a touch landed on.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartController, ChartDataSource, ChartDelegate};
pub use error::{ChartError, ChartResult};
