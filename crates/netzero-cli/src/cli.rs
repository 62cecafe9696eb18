use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use netzero_core::models::StrategyStatus;
use netzero_core::{AreaUnit, SeedPolicy};
use std::path::PathBuf;

/// NetZero - Carbon accounting for mine operations
#[derive(Parser, Debug)]
#[command(name = "netzero")]
#[command(about = "Carbon accounting for mine operations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Persistence medium for the ledger
    #[arg(long, global = true, default_value = "file")]
    pub storage: StorageBackend,

    /// Data directory (overrides NETZERO_DATA_DIR and the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// What empty or unreadable collections fall back to (demo or empty)
    #[arg(long, global = true, value_name = "POLICY")]
    pub seed_policy: Option<SeedPolicy>,

    /// Base URL of the redirect resolver service
    #[arg(long, global = true, value_name = "URL")]
    pub resolver_url: Option<String>,

    /// TOML file replacing the built-in factor tables
    #[arg(long, global = true, value_name = "FILE")]
    pub factors_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// In-memory storage, discarded on exit
    Memory,
    /// One JSON file per collection in the data directory (default)
    File,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List emission, sink, vegetation, and soil factors
    Factors(FactorsArgs),

    /// Record and manage emission activities
    #[command(subcommand)]
    Emission(EmissionCommand),

    /// Record and manage carbon sink projects
    #[command(subcommand)]
    Sink(SinkCommand),

    /// Plan and track reduction strategies
    #[command(subcommand)]
    Strategy(StrategyCommand),

    /// Show derived ledger metrics
    Metrics(MetricsArgs),

    /// Extract coordinates from a map link
    Resolve(ResolveArgs),

    /// Show configuration and ledger status
    Status(StatusArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FactorTable {
    Activity,
    Sink,
    Vegetation,
    Soil,
}

#[derive(Args, Debug)]
pub struct FactorsArgs {
    /// Show only one table
    #[arg(long)]
    pub table: Option<FactorTable>,
}

/// Fields shared by every recorded entry
#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Activity date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Free-text location
    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long, value_name = "ID")]
    pub mine_id: Option<String>,

    /// Recording user
    #[arg(long, default_value = "1")]
    pub user: String,
}

#[derive(Args, Debug)]
pub struct DateRangeArgs {
    /// First date to include, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to include, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum EmissionCommand {
    /// Record an emission activity
    Add(EmissionAddArgs),

    /// List emissions, newest first
    List(DateRangeArgs),

    /// Delete an emission by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct EmissionAddArgs {
    /// Activity kind (see `netzero factors --table activity`)
    pub kind: String,

    /// Quantity in the activity's unit
    pub quantity: f64,

    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Subcommand, Debug)]
pub enum SinkCommand {
    /// Record a carbon sink project
    Add(SinkAddArgs),

    /// Record a land-area offset project
    LandArea(LandAreaArgs),

    /// List sinks, newest first
    List(DateRangeArgs),

    /// Delete a sink by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct SinkAddArgs {
    /// Sink kind (see `netzero factors --table sink`)
    pub kind: String,

    /// Quantity in the sink's unit
    pub quantity: f64,

    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Args, Debug)]
pub struct LandAreaArgs {
    /// Vegetation kind (see `netzero factors --table vegetation`)
    pub vegetation: String,

    /// Area in the chosen unit
    pub area: f64,

    /// Area unit: hectares, acres, or sqkm
    #[arg(long, default_value = "hectares")]
    pub unit: AreaUnit,

    /// Project duration in whole years
    #[arg(long)]
    pub duration: String,

    /// Soil kind (see `netzero factors --table soil`)
    #[arg(long)]
    pub soil: Option<String>,

    /// Map link to take the project coordinates from
    #[arg(long, value_name = "URL", conflicts_with_all = ["lat", "lng"])]
    pub link: Option<String>,

    /// Latitude, when entering coordinates by hand
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude, when entering coordinates by hand
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Expand shortened links directly instead of through the resolver service
    #[arg(long)]
    pub direct: bool,

    #[command(flatten)]
    pub entry: EntryArgs,
}

#[derive(Subcommand, Debug)]
pub enum StrategyCommand {
    /// Plan a reduction strategy
    Add(StrategyAddArgs),

    /// List strategies, newest first
    List,

    /// Update fields of a strategy (status may only move forward)
    Update(StrategyUpdateArgs),

    /// Move a strategy back to an earlier status
    Reopen(StrategyReopenArgs),

    /// Delete a strategy by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct StrategyAddArgs {
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "General")]
    pub category: String,

    /// planned, in-progress, or completed
    #[arg(long, default_value = "planned")]
    pub status: StrategyStatus,

    /// Target reduction, percent
    #[arg(long, default_value_t = 0.0)]
    pub target: f64,

    /// Reduction achieved so far, percent
    #[arg(long, default_value_t = 0.0)]
    pub current: f64,

    /// Start date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long, default_value_t = 0.0)]
    pub cost: f64,

    /// Return on investment, percent (may be negative)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub roi: f64,

    #[arg(long, value_name = "ID")]
    pub mine_id: Option<String>,

    #[arg(long, default_value = "1")]
    pub user: String,
}

#[derive(Args, Debug)]
pub struct StrategyUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub status: Option<StrategyStatus>,

    #[arg(long)]
    pub target: Option<f64>,

    #[arg(long)]
    pub current: Option<f64>,

    #[arg(long)]
    pub start: Option<NaiveDate>,

    #[arg(long, conflicts_with = "clear_end")]
    pub end: Option<NaiveDate>,

    /// Remove the end date
    #[arg(long)]
    pub clear_end: bool,

    #[arg(long)]
    pub cost: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub roi: Option<f64>,
}

#[derive(Args, Debug)]
pub struct StrategyReopenArgs {
    pub id: String,

    /// Status to move back to
    #[arg(long, default_value = "in-progress")]
    pub status: StrategyStatus,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Also break emissions down by activity
    #[arg(long)]
    pub breakdown: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Map link to extract coordinates from
    pub link: String,

    /// Expand shortened links directly instead of through the resolver service
    #[arg(long)]
    pub direct: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show where each configuration value came from
    #[arg(long)]
    pub verbose: bool,
}
