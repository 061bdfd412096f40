//! # oneworldsync
//!
//! A client for the 1WorldSync product-data REST APIs. It covers the two
//! upstream surfaces, which use unrelated signing schemes:
//!
//! - the **marketplace search** surface: query-string-signed GET requests
//!   (free-text search, advanced search, fetch by item id);
//! - the **Content1** surface: header-signed POST requests carrying
//!   structured criteria (product fetch, count, hierarchies).
//!
//! Both paginate through an opaque continuation token the client carries
//! forward verbatim; see the [`pagination`] module.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use oneworldsync::{ClientConfig, Content1Client, DateRange, ProductCriteria};
//!
//! #[tokio::main]
//! async fn main() -> oneworldsync::Result<()> {
//!     let config = ClientConfig::builder()
//!         .app_id("my-app-id")
//!         .secret_key("my-secret")
//!         .build()?;
//!
//!     let client = Content1Client::new(&config)?;
//!     let criteria = ProductCriteria::new()
//!         .with_target_market("US")
//!         .with_last_modified_date(DateRange::last_30_days());
//!
//!     let mut pager = client.product_pager(criteria, Some(100));
//!     while let Some(page) = pager.next_page().await? {
//!         for product in &page {
//!             println!("{:?} {:?}", product.gtin(), product.brand_name());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────┐   ┌────────────────────┐
//! │  MarketplaceClient │   │   Content1Client   │
//! │  GET V2/products   │   │  POST V1/product/* │
//! └─────────┬──────────┘   └─────────┬──────────┘
//!           │ MarketplaceSigner      │ Content1Signer
//!           │ (raw-string HMAC)      │ (encode-then-HMAC)
//!           └───────────┬────────────┘
//!       ┌───────────────┼───────────────┐
//!       │    criteria   │   pagination  │
//!       │    http       │   mapping     │
//!       └───────────────┴───────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// Request signing for both surfaces
pub mod auth;

/// Typed search criteria
pub mod criteria;

/// Cursor pagination core
pub mod pagination;

/// Marketplace search surface
pub mod marketplace;

/// Content1 surface
pub mod content1;

/// HTTP transport
pub mod http;

mod mapping;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use content1::Content1Client;
pub use criteria::{CompareOp, DateRange, FieldSelection, ProductCriteria, SortField};
pub use error::{Error, Result};
pub use marketplace::{MarketplaceClient, SearchRequest, SearchType};
pub use pagination::{PageState, Paged};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
