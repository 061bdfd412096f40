//! Search criteria
//!
//! Typed, builder-style filters that serialize to the JSON body the
//! Content1 surface expects. Criteria are re-sent verbatim on every
//! pagination step; only the continuation token is added or replaced
//! between pages.

mod types;

pub use types::{CompareOp, DateBound, DateRange, FieldSelection, ProductCriteria, SortField};

#[cfg(test)]
mod tests;
