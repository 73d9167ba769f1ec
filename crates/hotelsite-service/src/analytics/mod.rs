//! Revenue and occupancy analytics.

pub mod service;
pub mod summary;

pub use service::{AnalyticsPeriod, AnalyticsService};
pub use summary::{AnalyticsReport, MonthlyRevenue, RoomPerformance, SourceCount, summarize};
