//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, IsTerminal};

use crate::harness::{
    ConfigError, ConsoleReporter, GoldenFileTestHarness, HarnessConfig, HarnessError, RunSummary,
    TracingReporter,
};

use super::{Cli, CliError, CliResult, ExitCode};

/// Translate parsed arguments into a harness configuration.
pub fn config_from_cli(cli: &Cli) -> HarnessConfig {
    let mut config = HarnessConfig::new(&cli.test_dir, &cli.tool, cli.plugin.clone())
        .with_record_mode(cli.reset_results);
    config.language_standard = cli.std.clone();
    config.plugin_args = cli.plugin_args.clone();
    config.base_args = cli.extra_args.clone();
    config.probe_diagnostic_flags = !cli.no_probe;
    if !cli.extensions.is_empty() {
        config.input_extensions = cli
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();
    }
    config
}

fn build_harness(cli: &Cli) -> CliResult<GoldenFileTestHarness> {
    GoldenFileTestHarness::new(config_from_cli(cli)).map_err(config_error)
}

/// Run every case and exit with the number of failures.
pub fn run_tests(cli: &Cli) -> CliResult<ExitCode> {
    let harness = build_harness(cli)?;

    let summary = if cli.json {
        let summary = harness.run_with_reporter(&mut TracingReporter).map_err(harness_error)?;
        println!("{}", summary.to_json());
        summary
    } else {
        let color = !cli.no_color && io::stdout().is_terminal();
        let mut reporter = ConsoleReporter::stdout(color, cli.verbose);
        harness.run_with_reporter(&mut reporter).map_err(harness_error)?
    };

    Ok(exit_code_for(&summary))
}

/// Print each discovered case with the command line it would run.
pub fn list_cases(cli: &Cli) -> CliResult<ExitCode> {
    let harness = build_harness(cli)?;
    let cases = harness.collect_cases().map_err(harness_error)?;

    if cases.is_empty() {
        eprintln!("No test inputs found in '{}'", harness.config().test_directory.display());
        return Ok(ExitCode::SUCCESS);
    }

    for case in &cases {
        println!("{}: {}", case.name, harness.invocation_for(case));
    }
    println!("{} case(s)", cases.len());
    Ok(ExitCode::SUCCESS)
}

pub fn exit_code_for(summary: &RunSummary) -> ExitCode {
    ExitCode(summary.exit_code())
}

/// Render a configuration problem through miette.
fn config_error(err: ConfigError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

fn harness_error(err: HarnessError) -> CliError {
    CliError::failure(format!("Error: {}", err))
}
