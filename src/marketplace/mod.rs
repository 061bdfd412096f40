//! Marketplace search surface
//!
//! Query-string-signed GET requests against `V2/products`. Every request
//! carries `app_id`, the operation type, the query payload, a fresh
//! `TIMESTAMP`, and the `hash_code` signature as the final parameter.
//! Pagination follows the `nextCursorMark` token via `cursorMark`.

mod client;
mod models;

pub use client::{MarketplaceClient, SearchPager, SearchRequest, SearchType};
pub use models::{ItemIdentifier, Product, SearchResults};

#[cfg(test)]
mod tests;
