/// CSV export of per-period results.
pub mod export;
