//! HTTP transport
//!
//! A thin wrapper over reqwest: base-URL joining, default timeout and user
//! agent, JSON decoding, and mapping of non-2xx statuses onto the error
//! taxonomy. There is no retry loop here; every call sends exactly one
//! request, and callers that retry re-sign from scratch.

mod client;

pub use client::HttpClient;
