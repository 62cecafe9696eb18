//! Status command implementation

use crate::cli::{StatusArgs, StorageBackend};
use crate::commands::CommandContext;
use crate::output_types::{ConfigEntry, StatusOutput};
use anyhow::Result;
use std::collections::BTreeMap;

pub async fn execute(args: StatusArgs, ctx: &CommandContext) -> Result<()> {
    let ledger = ctx.ledger().await?;
    let snapshot = ledger.snapshot().await;

    let storage = match ctx.storage {
        StorageBackend::Memory => "memory",
        StorageBackend::File => "file",
    };

    let config = args.verbose.then(|| {
        ctx.config
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| {
                let entry = ConfigEntry {
                    value,
                    source: format!("{:?}", source),
                };
                (key, entry)
            })
            .collect::<BTreeMap<_, _>>()
    });

    let status = StatusOutput {
        storage: storage.to_string(),
        data_dir: ctx.config.data_dir.value.display().to_string(),
        seed_policy: ledger.seed_policy().to_string(),
        emission_count: snapshot.emissions.len(),
        sink_count: snapshot.sinks.len(),
        strategy_count: snapshot.strategies.len(),
        config,
    };

    if ctx.output.is_json() {
        return ctx.output.result(&status);
    }

    let output = &ctx.output;
    output.section("Ledger Status");
    output.kv("Storage", &status.storage);
    if ctx.storage == StorageBackend::File {
        output.kv("Data directory", &status.data_dir);
    }
    output.kv("Seed policy", &status.seed_policy);
    output.kv("Emissions", status.emission_count);
    output.kv("Sinks", status.sink_count);
    output.kv("Strategies", status.strategy_count);

    if let Some(config) = &status.config {
        output.section("Configuration");
        for (key, entry) in config {
            output.kv(key, format!("{} ({})", entry.value, entry.source));
        }
    }

    Ok(())
}
