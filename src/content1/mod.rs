//! Content1 surface
//!
//! Header-signed POST requests against `V1/product/*`. The signed URI
//! carries `appId`, the optional `pageSize`, and a fresh `timestamp`; the
//! structured criteria travel as the JSON body. Authentication rides in the
//! `appid`/`hashcode` (and optional `gln`) headers. Pagination follows the
//! `searchAfter` token, merged into the criteria body.

mod client;
mod models;

pub use client::{Content1Client, HierarchyPager, ProductPager};
pub use models::{
    Gs1IdentificationKey, HierarchyLevel, HierarchyRecord, HierarchyResults, ProductRecord,
    ProductResults,
};
