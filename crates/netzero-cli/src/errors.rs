use console::style;
use netzero_core::NetZeroError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Attach suggestions to a domain error
pub fn from_domain(error: &NetZeroError) -> CliError {
    let base = CliError::new(error.to_string());
    let base = if error.is_recoverable() {
        base.with_context("Nothing was recorded; the ledger is unchanged.")
    } else {
        base
    };

    match error {
        NetZeroError::UnknownKind { registry, .. } => base
            .with_suggestion(format!("List known kinds: netzero factors --table {}", table_flag(registry)))
            .with_help("Run: netzero factors --help"),
        NetZeroError::InvalidQuantity { .. } => {
            base.with_suggestion("Quantities must be finite and not negative")
        }
        NetZeroError::InvalidDuration { .. } => base
            .with_suggestion("Pass the project length in whole years, e.g. --duration 25")
            .with_help("Run: netzero sink land-area --help"),
        NetZeroError::InvalidAreaUnit { .. } => {
            base.with_suggestion("Use one of: hectares, acres, sqkm")
        }
        NetZeroError::InvalidStatusTransition { id, .. } => base
            .with_context("Status can only move forward with 'strategy update'.")
            .with_suggestion(format!("Move it back explicitly: netzero strategy reopen {}", id)),
        NetZeroError::ResolverUnreachable { .. } | NetZeroError::ResolverTimeout { .. } => base
            .with_suggestion("Start the resolver service: netzero-expander")
            .with_suggestion("Or expand the link directly with --direct")
            .with_suggestion("Or enter coordinates by hand with --lat and --lng"),
        NetZeroError::ResolverBadResponse { .. } | NetZeroError::LinkNotRecognized { .. } => {
            base.with_suggestion("Enter coordinates by hand with --lat and --lng")
        }
        NetZeroError::ConfigMissing { key } => base
            .with_suggestion(format!("Set {} in netzero.toml or pass it as a flag", key))
            .with_help("Run: netzero status --verbose"),
        NetZeroError::ConfigInvalid { .. } => base
            .with_suggestion("Check netzero.toml in the data directory")
            .with_help("Run: netzero status --verbose"),
        _ => base,
    }
}

fn table_flag(registry: &str) -> &'static str {
    match registry {
        "sink" => "sink",
        "vegetation" => "vegetation",
        "soil" => "soil",
        _ => "activity",
    }
}

/// Convert anyhow::Error to CliError, keeping suggestions for domain errors
pub fn from_anyhow(error: &anyhow::Error) -> CliError {
    if let Some(domain) = error.downcast_ref::<NetZeroError>() {
        let cli_error = from_domain(domain);
        // Outer context, if any, explains what was being attempted
        let outer = error.to_string();
        if outer != domain.to_string() {
            return cli_error.with_context(outer);
        }
        return cli_error;
    }

    let message = error.to_string();
    let detail = error
        .chain()
        .skip(1)
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ");

    if detail.is_empty() {
        CliError::new(message)
    } else {
        CliError::new(message).with_context(format!("Error: {}", detail))
    }
}
