//! NetZero Store - Persistence ports, adapters, and the ledger
//!
//! This crate defines the key-value persistence port, provides in-memory and
//! file-backed adapters for it, and implements the [`LedgerStore`] that owns
//! the emission, sink, and strategy collections.

pub mod file;
pub mod ledger;
pub mod memory;
pub mod ports;

pub use file::FileKeyValueStore;
pub use ledger::{ChangeKind, Collection, LedgerEvent, LedgerStore};
pub use memory::MemoryKeyValueStore;
pub use ports::KeyValueStore;
