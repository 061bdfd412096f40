//! Request signing
//!
//! The two API surfaces use two distinct, non-interchangeable HMAC schemes:
//!
//! - [`MarketplaceSigner`] hashes the raw canonical path+query string and
//!   ships the signature as the `hash_code` query parameter;
//! - [`Content1Signer`] URI-component-encodes the canonical string *before*
//!   hashing and ships the signature as the `hashcode` header.
//!
//! Which signer applies is decided by the surface being called, never
//! inferred from the request. Signing is pure: no network I/O happens here.

mod signer;

pub use signer::{format_timestamp, generate_timestamp, Content1Signer, MarketplaceSigner};
pub(crate) use signer::QUERY_VALUE;

#[cfg(test)]
mod tests;
