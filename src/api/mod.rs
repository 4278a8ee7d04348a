mod animation;
mod chart_config;
mod chart_snapshot;
mod controller;
mod data_source;
mod labels;
mod reconciler;

pub use animation::{AnimationScheduler, LayerTransaction, SliceUpdate, TransactionReport};
pub use chart_config::{ChartConfig, ChartState};
pub use chart_snapshot::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1, LayerSnapshot,
};
pub use controller::ChartController;
pub use data_source::{ChartDataSource, ChartDelegate};
pub use hit_test::HitTester;
pub use labels::estimate_label_size;
pub use reconciler::{
    ArcSlot, LayerArcSet, ReconcilePlan, RemovedArcs, plan_layer, stroke_intervals,
};
