mod summary;
pub mod views;

pub use summary::{aggregate, DateWindow, EXPECTATION_POINT_LIMIT};
pub use views::{
    CategoryCount, ExpectationPoint, Grouping, MetricsSnapshot, ScoreBucket, ScoreBucketCount,
    TemperatureCounts,
};
