//! Resolve command implementation

use crate::cli::ResolveArgs;
use crate::commands::CommandContext;
use crate::config_loader::build_resolver;
use crate::output_types::ResolveOutput;
use anyhow::{Context, Result};

pub async fn execute(args: ResolveArgs, ctx: &CommandContext) -> Result<()> {
    let resolver = build_resolver(&ctx.config, args.direct)?;
    let found = resolver
        .resolve(&args.link)
        .await
        .with_context(|| format!("Failed to resolve coordinates from {}", args.link))?;

    let output = ResolveOutput::new(&args.link, found);
    if ctx.output.is_json() {
        return ctx.output.result(&output);
    }

    ctx.output.success(format!("{}, {}", output.lat, output.lng));
    ctx.output.kv("Matched", output.rule);
    if let Some(place) = &output.place {
        ctx.output.kv("Place", place);
    }
    Ok(())
}
