pub mod cell;
pub mod metrics_impl;
pub mod snapshot;

pub use cell::MetricsCell;
pub use metrics_impl::{LfuMetrics, LruMetrics};
pub use snapshot::{LfuMetricsSnapshot, LruMetricsSnapshot};
