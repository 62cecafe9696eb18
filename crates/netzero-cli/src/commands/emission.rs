//! Emission command implementations

use crate::cli::{DateRangeArgs, DeleteArgs, EmissionAddArgs, EmissionCommand};
use crate::commands::{today, CommandContext};
use crate::output_types::EmissionRow;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use netzero_core::format_co2e;
use netzero_core::models::EntryId;

pub async fn execute(command: EmissionCommand, ctx: &CommandContext) -> Result<()> {
    match command {
        EmissionCommand::Add(args) => add(args, ctx).await,
        EmissionCommand::List(args) => list(args, ctx).await,
        EmissionCommand::Delete(args) => delete(args, ctx).await,
    }
}

async fn add(args: EmissionAddArgs, ctx: &CommandContext) -> Result<()> {
    let calculator = ctx.calculator()?;
    let entry = args.entry;

    let mut draft = calculator.emission_draft(
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
    let recorded = ledger
        .add_emission(draft)
        .await
        .context("Failed to record emission")?;

    if ctx.output.is_json() {
        return ctx.output.result(&recorded);
    }

    ctx.output.success(format!(
        "Recorded {} {} of {}: {}",
        recorded.quantity,
        recorded.unit,
        recorded.activity_kind,
        format_co2e(recorded.co2e)
    ));
    ctx.output.kv("ID", &recorded.id);
    Ok(())
}

async fn list(args: DateRangeArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;

    let emissions = match (args.from, args.to) {
        (None, None) => ledger.emissions().await,
        (from, to) => {
            ledger
                .emissions_by_date_range(
                    from.unwrap_or(NaiveDate::MIN),
                    to.unwrap_or(NaiveDate::MAX),
                )
                .await
        }
    };

    ctx.output.table(emissions.iter().map(EmissionRow::from).collect())
}

async fn delete(args: DeleteArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;
    let id = EntryId::from(args.id);

    if ledger.delete_emission(&id).await.context("Failed to delete emission")? {
        ctx.output.success(format!("Deleted emission {}", id));
    } else {
        ctx.output.warning(format!("No emission with id {}", id));
    }
    Ok(())
}
