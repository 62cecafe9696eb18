//! Strategy command implementations

use crate::cli::{DeleteArgs, StrategyAddArgs, StrategyCommand, StrategyReopenArgs, StrategyUpdateArgs};
use crate::commands::{today, CommandContext};
use crate::output_types::StrategyRow;
use anyhow::{bail, Context, Result};
use netzero_core::calculator::{validate_finite, validate_quantity};
use netzero_core::models::{EntryId, StrategyDraft, StrategyEntry, StrategyPatch};

pub async fn execute(command: StrategyCommand, ctx: &CommandContext) -> Result<()> {
    match command {
        StrategyCommand::Add(args) => add(args, ctx).await,
        StrategyCommand::List => list(ctx).await,
        StrategyCommand::Update(args) => update(args, ctx).await,
        StrategyCommand::Reopen(args) => reopen(args, ctx).await,
        StrategyCommand::Delete(args) => delete(args, ctx).await,
    }
}

async fn add(args: StrategyAddArgs, ctx: &CommandContext) -> Result<()> {
    let draft = StrategyDraft {
        title: args.title,
        description: args.description,
        category: args.category,
        status: args.status,
        target_reduction: validate_quantity("target", args.target)?,
        current_reduction: validate_quantity("current", args.current)?,
        start_date: args.start.unwrap_or_else(today),
        end_date: args.end,
        cost: validate_quantity("cost", args.cost)?,
        roi: validate_finite("roi", args.roi)?,
        user_id: args.user,
        mine_id: args.mine_id,
    };

    let ledger = ctx.ledger().await?;
    let recorded = ledger.add_strategy(draft).await.context("Failed to record strategy")?;

    report(ctx, "Planned", &recorded)
}

fn patch_from(args: &StrategyUpdateArgs) -> Result<StrategyPatch> {
    let end_date = if args.clear_end {
        Some(None)
    } else {
        args.end.map(Some)
    };

    Ok(StrategyPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        category: args.category.clone(),
        status: args.status,
        target_reduction: args.target.map(|v| validate_quantity("target", v)).transpose()?,
        current_reduction: args.current.map(|v| validate_quantity("current", v)).transpose()?,
        start_date: args.start,
        end_date,
        cost: args.cost.map(|v| validate_quantity("cost", v)).transpose()?,
        roi: args.roi.map(|v| validate_finite("roi", v)).transpose()?,
        mine_id: None,
    })
}

async fn update(args: StrategyUpdateArgs, ctx: &CommandContext) -> Result<()> {
    let patch = patch_from(&args)?;
    if patch.is_empty() {
        bail!("Nothing to update: pass at least one field, e.g. --status completed");
    }

    let ledger = ctx.ledger().await?;
    let id = EntryId::from(args.id);

    match ledger.update_strategy(&id, patch).await? {
        Some(updated) => report(ctx, "Updated", &updated),
        None => bail!("No strategy with id {}", id),
    }
}

async fn reopen(args: StrategyReopenArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;
    let id = EntryId::from(args.id);

    match ledger.reopen_strategy(&id, args.status).await? {
        Some(updated) => report(ctx, "Reopened", &updated),
        None => bail!("No strategy with id {}", id),
    }
}

async fn list(ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;
    let strategies = ledger.strategies().await;
    ctx.output.table(strategies.iter().map(StrategyRow::from).collect())
}

async fn delete(args: DeleteArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;
    let id = EntryId::from(args.id);

    if ledger.delete_strategy(&id).await.context("Failed to delete strategy")? {
        ctx.output.success(format!("Deleted strategy {}", id));
    } else {
        ctx.output.warning(format!("No strategy with id {}", id));
    }
    Ok(())
}

fn report(ctx: &CommandContext, verb: &str, strategy: &StrategyEntry) -> Result<()> {
    if ctx.output.is_json() {
        return ctx.output.result(strategy);
    }

    ctx.output.success(format!("{} '{}' ({})", verb, strategy.title, strategy.status));
    ctx.output.kv("ID", &strategy.id);
    ctx.output.kv("Progress", format!("{:.0}%", strategy.progress_percentage()));
    Ok(())
}
