//! NetZero Geo - Map-link coordinate extraction and redirect resolution
//!
//! This crate turns pasted map links into coordinates. Full links are parsed
//! locally against an ordered grammar; shortened links are expanded by exactly
//! one redirect lookup through a [`RedirectResolver`] before re-parsing.

pub mod expand;
pub mod grammar;
pub mod resolver;
pub mod session;

pub use expand::{ExpanderClient, UpstreamExpander, DEFAULT_TIMEOUT};
pub use grammar::{extract_coordinates, is_shortened_link, CoordinateMatch, Extraction};
pub use resolver::{CoordinateResolver, RedirectResolver};
pub use session::{PasteOutcome, PasteSession};
