pub mod co2e;
pub mod coordinates;
pub mod entry;
pub mod factor;
pub mod strategy;

pub use co2e::Co2e;
pub use coordinates::Coordinates;
pub use entry::{
    CarbonSinkDraft, CarbonSinkEntry, EmissionDraft, EmissionEntry, EntryId, LandAreaDetails,
};
pub use factor::{ActivityFactor, SoilFactor, VegetationFactor};
pub use strategy::{StrategyDraft, StrategyEntry, StrategyPatch, StrategyStatus};
