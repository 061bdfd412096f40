//! Cursor pagination
//!
//! Both surfaces paginate the same way: the server hands back an opaque
//! continuation token (`searchAfter` on Content1, `nextCursorMark` on the
//! marketplace surface) and the client carries it, byte for byte, into the
//! next request alongside the original criteria. The server defines result
//! order; the client only guarantees it never skips or duplicates the
//! continuation boundary.
//!
//! A page sequence moves through two states, [`PageState::HasMore`] and
//! [`PageState::Exhausted`], and never transitions back. Advancing past
//! `Exhausted` is a programming error surfaced as
//! [`Error::Pagination`](crate::Error::Pagination), not something to retry.

use crate::error::{Error, Result};

/// Whether a page sequence can be advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// The last response carried a continuation token and at least one item
    HasMore,
    /// The last response omitted the token or returned zero items
    Exhausted,
}

impl PageState {
    /// Derive the state from a response page
    pub fn of<P: Paged + ?Sized>(page: &P) -> Self {
        match page.continuation_token() {
            Some(token) if !token.is_empty() && page.item_count() > 0 => Self::HasMore,
            _ => Self::Exhausted,
        }
    }

    /// True when another page can be requested
    pub fn has_more(self) -> bool {
        matches!(self, Self::HasMore)
    }
}

/// Minimal view of a response envelope the pagination core needs: the
/// continuation token and the number of items on the page. Everything else
/// in an envelope is caller-facing and irrelevant here.
pub trait Paged {
    /// The opaque continuation token, if the server returned one
    fn continuation_token(&self) -> Option<&str>;

    /// Number of items on this page
    fn item_count(&self) -> usize;

    /// State of the sequence after this page
    fn state(&self) -> PageState
    where
        Self: Sized,
    {
        PageState::of(self)
    }
}

/// Extract the continuation token needed for the next request, or fail
/// when the sequence is exhausted. Callers should check
/// [`PageState::has_more`] first.
pub fn next_token<P: Paged + ?Sized>(page: &P) -> Result<&str> {
    match PageState::of(page) {
        PageState::HasMore => Ok(page.continuation_token().unwrap_or_default()),
        PageState::Exhausted => Err(Error::pagination(
            "no continuation token: the previous response was the final page",
        )),
    }
}
