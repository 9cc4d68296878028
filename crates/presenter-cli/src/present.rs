//! # Present Command
//!
//! Reads the model, resolves the requested strategy, and writes the
//! presentation as JSON. An empty model input is the absent model and
//! produces no output.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use presenter_core::{PresenterConfig, Strategy, StrategyRef};

/// Arguments for presenting a model.
#[derive(Args, Debug)]
pub struct PresentArgs {
    /// Presenter configuration file (YAML, or JSON with a .json extension).
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Name of a strategy registered in the configuration.
    #[arg(short, long, conflicts_with = "inline")]
    pub strategy: Option<String>,

    /// Inline strategy as JSON, e.g. '{"whitelist":["firstName"]}'.
    #[arg(long, value_name = "JSON")]
    pub inline: Option<String>,

    /// Pretty-print the output.
    #[arg(long)]
    pub pretty: bool,

    /// JSON model file; `-` or omitted reads stdin.
    #[arg(value_name = "MODEL")]
    pub model: Option<PathBuf>,
}

/// Execute the present command, writing the presentation to `out`.
pub fn run_present(args: &PresentArgs, out: &mut impl Write) -> Result<()> {
    let presenter = PresenterConfig::from_path(&args.config)
        .and_then(PresenterConfig::into_presenter)
        .with_context(|| format!("failed to load presenter from {}", args.config.display()))?;

    let inline = args
        .inline
        .as_deref()
        .map(serde_json::from_str::<Strategy>)
        .transpose()
        .context("invalid inline strategy")?;

    let strategy = match (&inline, &args.strategy) {
        (Some(inline), _) => StrategyRef::Inline(inline),
        (None, Some(name)) => StrategyRef::Named(name),
        (None, None) => StrategyRef::Default,
    };

    let model = read_model(args.model.as_deref())?;
    tracing::debug!(?strategy, absent = model.is_none(), "presenting model");

    let Some(presented) = presenter.present_value(model, strategy)? else {
        return Ok(());
    };

    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, &presented)?;
    } else {
        serde_json::to_writer(&mut *out, &presented)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Read the model as JSON. Blank input is the absent model.
fn read_model(path: Option<&Path>) -> Result<Option<Value>> {
    let source = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read model from stdin")?;
            buf
        }
    };

    if source.trim().is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(&source).context("model is not valid JSON")?;
    Ok(Some(value))
}
