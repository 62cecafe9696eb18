//! Factors command implementation

use crate::cli::{FactorTable, FactorsArgs};
use crate::commands::CommandContext;
use crate::output_types::{FactorRow, SoilRow, VegetationRow};
use anyhow::Result;

pub fn execute(args: FactorsArgs, ctx: &CommandContext) -> Result<()> {
    let calculator = ctx.calculator()?;
    let tables = calculator.tables();
    let output = &ctx.output;

    let show = |table: FactorTable| args.table.map_or(true, |only| only == table);

    if show(FactorTable::Activity) {
        output.section("Emission factors");
        output.table(tables.activities.iter().map(FactorRow::from).collect())?;
    }

    if show(FactorTable::Sink) {
        output.section("Sink factors");
        output.table(tables.sinks.iter().map(FactorRow::from).collect())?;
    }

    if show(FactorTable::Vegetation) {
        output.section("Vegetation sequestration rates");
        output.table(tables.vegetation.iter().map(VegetationRow::from).collect())?;
    }

    if show(FactorTable::Soil) {
        output.section("Soil multipliers");
        output.table(tables.soils.iter().map(SoilRow::from).collect())?;
    }

    Ok(())
}
