// Both statistics tools take no parameters of their own.
pub use super::EmptyRequest as StatsRequest;
