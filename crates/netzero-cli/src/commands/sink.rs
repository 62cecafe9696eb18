//! Sink command implementations

use crate::cli::{DateRangeArgs, DeleteArgs, LandAreaArgs, SinkAddArgs, SinkCommand};
use crate::commands::{today, CommandContext};
use crate::config_loader::build_resolver;
use crate::output_types::{LandAreaOutput, SinkRow};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use netzero_core::land_area::parse_duration;
use netzero_core::models::{Coordinates, EntryId};
use netzero_core::{format_co2e, LandAreaInput};

pub async fn execute(command: SinkCommand, ctx: &CommandContext) -> Result<()> {
    match command {
        SinkCommand::Add(args) => add(args, ctx).await,
        SinkCommand::LandArea(args) => land_area(args, ctx).await,
        SinkCommand::List(args) => list(args, ctx).await,
        SinkCommand::Delete(args) => delete(args, ctx).await,
    }
}

async fn add(args: SinkAddArgs, ctx: &CommandContext) -> Result<()> {
    let calculator = ctx.calculator()?;
    let entry = args.entry;

    let mut draft = calculator.sink_draft(
        &args.kind,
        args.quantity,
        entry.date.unwrap_or_else(today),
        entry.user,
    )?;
    if let Some(location) = entry.location {
        draft = draft.with_location(location);
    }
    if let Some(notes) = entry.notes {
        draft = draft.with_notes(notes);
    }
    if let Some(mine_id) = entry.mine_id {
        draft = draft.with_mine_id(mine_id);
    }

    let ledger = ctx.ledger().await?;
    let recorded = ledger.add_sink(draft).await.context("Failed to record sink")?;

    if ctx.output.is_json() {
        return ctx.output.result(&recorded);
    }

    ctx.output.success(format!(
        "Recorded {} {} of {}: {}",
        recorded.quantity,
        recorded.unit,
        recorded.sink_kind,
        format_co2e(recorded.co2e)
    ));
    ctx.output.kv("ID", &recorded.id);
    Ok(())
}

/// Coordinates from a pasted link or from --lat/--lng, if either was given
async fn project_coordinates(args: &LandAreaArgs, ctx: &CommandContext) -> Result<Option<Coordinates>> {
    if let Some(link) = &args.link {
        let resolver = build_resolver(&ctx.config, args.direct)?;
        let found = resolver
            .resolve(link)
            .await
            .with_context(|| format!("Failed to resolve coordinates from {}", link))?;
        tracing::debug!(rule = found.rule, "Resolved project coordinates");
        return Ok(Some(found.coordinates));
    }

    match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => match Coordinates::new(lat, lng) {
            Some(coordinates) => Ok(Some(coordinates)),
            None => bail!("Coordinates out of range: {}, {}", lat, lng),
        },
        _ => Ok(None),
    }
}

async fn land_area(args: LandAreaArgs, ctx: &CommandContext) -> Result<()> {
    let calculator = ctx.calculator()?;
    let duration = parse_duration(&args.duration)?;

    let mut input = LandAreaInput::new(&args.vegetation, args.area, args.unit, duration);
    if let Some(soil) = &args.soil {
        input = input.with_soil(soil);
    }

    // Unknown kinds fail before any network round trip
    calculator.calculate_land_area_offset(&input)?;
    let coordinates = project_coordinates(&args, ctx).await?;

    let entry = args.entry;
    let (mut draft, offset) =
        calculator.land_area_draft(&input, entry.date.unwrap_or_else(today), entry.user)?;
    if let Some(coordinates) = coordinates {
        draft = draft.with_coordinates(coordinates);
    }
    if let Some(location) = entry.location {
        draft = draft.with_location(location);
    }
    if let Some(notes) = entry.notes {
        draft = draft.with_notes(notes);
    }
    if let Some(mine_id) = entry.mine_id {
        draft = draft.with_mine_id(mine_id);
    }

    let ledger = ctx.ledger().await?;
    let recorded = ledger
        .add_sink(draft)
        .await
        .context("Failed to record land-area project")?;

    let output = LandAreaOutput::new(recorded, &offset);
    if ctx.output.is_json() {
        return ctx.output.result(&output);
    }

    ctx.output.success(format!(
        "Recorded {} {} of {} over {} years",
        input.area, input.area_unit, input.vegetation_kind, duration
    ));
    ctx.output.kv("ID", &output.entry.id);
    ctx.output.kv("Area", format!("{:.2} hectares", output.area_hectares));
    ctx.output.kv("Rate", format!("{:.2} t CO2e / ha / yr", output.effective_rate));
    ctx.output.kv("Annual offset", format_co2e(output.annual_offset));
    ctx.output.kv("Total offset", format_co2e(output.total_offset));
    if let Some(coordinates) = coordinates {
        ctx.output.kv("Coordinates", coordinates);
    }
    Ok(())
}

async fn list(args: DateRangeArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;

    let sinks = match (args.from, args.to) {
        (None, None) => ledger.sinks().await,
        (from, to) => {
            ledger
                .sinks_by_date_range(from.unwrap_or(NaiveDate::MIN), to.unwrap_or(NaiveDate::MAX))
                .await
        }
    };

    ctx.output.table(sinks.iter().map(SinkRow::from).collect())
}

async fn delete(args: DeleteArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;
    let id = EntryId::from(args.id);

    if ledger.delete_sink(&id).await.context("Failed to delete sink")? {
        ctx.output.success(format!("Deleted sink {}", id));
    } else {
        ctx.output.warning(format!("No sink with id {}", id));
    }
    Ok(())
}
