//! Paste sessions
//!
//! A form field that accepts pasted links can be cleared, or pasted into
//! again, while an expansion is still in flight. Each paste takes a ticket
//! from a generation counter; a result whose ticket is no longer current is
//! discarded instead of being applied.

use crate::grammar::CoordinateMatch;
use crate::resolver::CoordinateResolver;
use netzero_core::Result;
use std::sync::atomic::{AtomicU64, Ordering};

/// What became of a paste once its resolution finished
#[derive(Debug, Clone, PartialEq)]
pub enum PasteOutcome {
    Resolved(CoordinateMatch),
    /// The field was cleared or pasted into again meanwhile
    Discarded,
}

pub struct PasteSession {
    resolver: CoordinateResolver,
    generation: AtomicU64,
}

impl PasteSession {
    pub fn new(resolver: CoordinateResolver) -> Self {
        Self {
            resolver,
            generation: AtomicU64::new(0),
        }
    }

    /// Resolve a pasted link, superseding any earlier paste
    ///
    /// Errors from a superseded paste are discarded as well.
    pub async fn paste(&self, link: &str) -> Result<PasteOutcome> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.resolver.resolve(link).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "Discarding stale paste result");
            return Ok(PasteOutcome::Discarded);
        }

        result.map(PasteOutcome::Resolved)
    }

    /// Clear the field; any in-flight paste is discarded on completion
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
