// Analytics aggregation engine.
// Pure calculators (status, weekly, funnel) composed by engine::summarize over
// one user's records; source provides the records, handlers serve the result.

pub mod engine;
pub mod funnel;
pub mod handlers;
pub mod source;
pub mod status;
pub mod weekly;
