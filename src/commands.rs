//! Command implementation for the jobdiff CLI

use crate::batch::compare_directories;
use crate::cli::{Cli, OutputFormat};
use crate::compare::compare_files;
use crate::config::DiffConfig;
use crate::error::{JobdiffError, Result};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use std::path::Path;

/// Run the comparison and emit the report to stdout or `--output`.
///
/// Finding changes is not an error: this returns `Ok` whenever the comparison
/// itself could be carried out.
pub fn execute_command(cli: &Cli) -> Result<()> {
    let rendered = render_comparison(cli)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Compare the inputs named on the command line and render the result
pub fn render_comparison(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format).map_err(JobdiffError::invalid_input)?;
    let config = DiffConfig::load_or_default(cli.config.as_deref())?;

    match (cli.old.is_dir(), cli.new.is_dir()) {
        (true, true) => directory_command(&cli.old, &cli.new, &config, format, cli.quiet),
        (false, false) => file_command(&cli.old, &cli.new, &config, format),
        _ => Err(JobdiffError::invalid_input(format!(
            "Cannot compare a file with a directory: {} vs {}",
            cli.old.display(),
            cli.new.display()
        ))),
    }
}

fn file_command(
    old: &Path,
    new: &Path,
    config: &DiffConfig,
    format: OutputFormat,
) -> Result<String> {
    let label = new
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| new.display().to_string());

    let comparison = compare_files(label, Some(old), Some(new), config)?;

    match format {
        OutputFormat::Pretty => Ok(PrettyPrinter::format_comparison(&comparison)),
        OutputFormat::Json => JsonFormatter::format_comparison(&comparison),
    }
}

fn directory_command(
    old: &Path,
    new: &Path,
    config: &DiffConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<String> {
    let comparisons = compare_directories(old, new, config, |total| {
        if quiet || format == OutputFormat::Json {
            ProgressReporter::new_minimal()
        } else {
            ProgressReporter::new_for_batch(total)
        }
    })?;

    match format {
        OutputFormat::Pretty => Ok(PrettyPrinter::format_batch(&comparisons)),
        OutputFormat::Json => JsonFormatter::format_batch(&comparisons),
    }
}
