//! NetZero Core - Domain models, factor tables, calculators, and configuration
//!
//! This crate contains the carbon-accounting domain logic shared by the
//! ledger store, the coordinate resolver, and the binaries.

pub mod calculator;
pub mod config;
pub mod error;
pub mod land_area;
pub mod metrics;
pub mod models;
pub mod registry;
pub mod seed;

pub use calculator::{format_co2e, Calculator};
pub use error::{NetZeroError, Result};
pub use land_area::{AreaUnit, LandAreaInput, LandAreaOffset};
pub use metrics::{LedgerMetrics, LedgerSnapshot};
pub use registry::{FactorTables, Registry};
pub use seed::SeedPolicy;
