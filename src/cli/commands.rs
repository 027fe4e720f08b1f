//! Command dispatch

use std::io::{self, Read};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt, Visualizer};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::TextFormat;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see --help".to_string(),
        ));
    };

    // Completion must not depend on a readable config
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    match command {
        Commands::Layout { file, compact } => cmd_layout(&settings, file.as_deref(), *compact),
        Commands::Text { file, format } => cmd_text(&settings, file.as_deref(), *format),
        Commands::Roots { file } => cmd_roots(&settings, file.as_deref()),
        Commands::Config { command } => cmd_config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Read the whole input from `file`, or from stdin when none is given.
pub fn read_input(file: Option<&Path>) -> CliResult<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path).with_path_context("read input", path)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_context("read input from stdin")?;
            buf
        }
    };
    debug!("read {} bytes of input", text.len());
    Ok(text)
}

#[instrument(skip(settings))]
fn cmd_layout(settings: &Settings, file: Option<&Path>, compact: bool) -> CliResult<()> {
    let input = read_input(file)?;
    let vis = Visualizer::new(settings.params()).visualize(&input)?;
    let json = if compact {
        serde_json::to_string(&vis.layout)
    } else {
        serde_json::to_string_pretty(&vis.layout)
    }
    .map_err(|e| ApplicationError::OperationFailed {
        context: "serialize layout".to_string(),
        source: Box::new(e),
    })?;
    output::info(&json);
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_text(settings: &Settings, file: Option<&Path>, format: Option<TextFormat>) -> CliResult<()> {
    let input = read_input(file)?;
    let vis = Visualizer::new(settings.params()).visualize(&input)?;
    let format = format.unwrap_or(settings.text_format);
    let text = vis.text(format);
    if format == TextFormat::Html {
        output::info(&text);
    } else {
        output::raw(&text);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_roots(settings: &Settings, file: Option<&Path>) -> CliResult<()> {
    let input = read_input(file)?;
    let vis = Visualizer::new(settings.params()).visualize(&input)?;
    for root in &vis.roots {
        output::info(root);
    }
    Ok(())
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("# effective configuration");
            output::raw(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::raw(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
