//! Metrics command implementation

use crate::cli::MetricsArgs;
use crate::commands::CommandContext;
use crate::output_types::ActivityShareRow;
use anyhow::Result;
use netzero_core::format_co2e;
use netzero_core::metrics::{emissions_by_activity, MAX_SUSTAINABILITY_SCORE};

pub async fn execute(args: MetricsArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;
    let snapshot = ledger.snapshot().await;
    let metrics = ledger.metrics().await;

    let breakdown: Vec<ActivityShareRow> = if args.breakdown {
        emissions_by_activity(&snapshot.emissions)
            .into_iter()
            .map(|(activity, co2e)| ActivityShareRow::new(activity, co2e, metrics.total_emissions))
            .collect()
    } else {
        Vec::new()
    };

    if ctx.output.is_json() {
        let mut data = serde_json::to_value(&metrics)?;
        if args.breakdown {
            data["breakdown"] = serde_json::to_value(&breakdown)?;
        }
        return ctx.output.result(data);
    }

    let output = &ctx.output;
    output.section("Ledger");
    output.kv("Total emissions", format_co2e(metrics.total_emissions));
    output.kv("Total sinks", format_co2e(metrics.total_sinks));
    output.kv("Net emissions", format_co2e(metrics.net_emissions));
    if metrics.net_emissions.is_negative() {
        output.info("Operation is net carbon-negative");
    }
    output.kv("Reduction", format!("{:.1}%", metrics.reduction_percentage));
    output.kv(
        "Sustainability score",
        format!("{:.1} / {}", metrics.sustainability_score, MAX_SUSTAINABILITY_SCORE),
    );
    output.kv(
        "Strategies completed",
        format!("{} of {}", metrics.completed_strategies, metrics.strategy_count),
    );
    output.kv("Entries", format!("{} emissions, {} sinks", metrics.emission_count, metrics.sink_count));

    if args.breakdown {
        output.section("Emissions by activity");
        output.table(breakdown)?;
    }

    Ok(())
}
