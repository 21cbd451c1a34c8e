//! Flux packager CLI entrypoint.
//!
//! Builds a placeholder `.tar.zst` package in the working directory and
//! prints its file name and SHA-256 for pasting into `packages.json`.

use clap::Parser;
use flux_packager::cli::Cli;
use flux_packager::output::Reporter;
use flux_packager::pipeline;
use flux_packager::version::PackageVersion;
use std::io::Write;

/// Exit status for unusable configuration, matching clap's usage errors.
const CONFIG_ERROR_EXIT: i32 = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = run(&cli, &PackageVersion::now(), &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Resolve configuration, run the packager and return the exit status.
fn run(
    cli: &Cli,
    version: &PackageVersion,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            return CONFIG_ERROR_EXIT;
        }
    };
    let mut reporter = Reporter::new(stdout, cli.output_mode());
    pipeline::run(&config, version, &mut reporter).exit_code()
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
