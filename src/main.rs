use clap::Parser;
use color_eyre::eyre::bail;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use simspec::config::RunnerConfig;
use simspec::config_loader::load_config;
use simspec::engine::{DryRunEngine, SimulationEngine, DEFAULT_SOURCE_DIR};
use simspec::registry::CcRegistry;
use simspec::spec::{load_spec_file, SpecError};

/// Network simulation runner driven by a simulation specification file.
///
/// Examples of simulation specifications are found in the folder "sim_specs".
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulation specification file (several with --check)
    #[arg(required = true)]
    spec_files: Vec<PathBuf>,

    /// Path to the source directory, where the engine finds the key and
    /// certificates used for setting test connections
    #[arg(short = 'S', long)]
    source_dir: Option<PathBuf>,

    /// Runner configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Only check that the spec files parse, without running anything
    #[arg(long)]
    check: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command line arguments
    let args = Args::parse();

    // Load the runner configuration, if any
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RunnerConfig::default(),
    };

    // Command line beats configuration, both beat the "info" default
    let log_level = args
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Register the congestion control algorithms
    let registry = config.build_registry();
    info!(
        "Registered congestion control algorithms: {}",
        registry.names().collect::<Vec<_>>().join(", ")
    );

    if args.check {
        return Ok(if check_files(&args.spec_files, &registry) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // A real run takes exactly one spec file
    let [spec_file] = args.spec_files.as_slice() else {
        bail!("Unexpected arguments: expected exactly one spec file, use --check for several");
    };

    let source_dir = args
        .source_dir
        .clone()
        .or_else(|| config.source_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));

    Ok(run_file(spec_file, &source_dir, &registry, &mut io::stderr()))
}

/// Parse one spec file and hand it to the engine.
///
/// Parse failures and the engine report go to `diagnostics`; the status
/// lines go to stdout.
fn run_file(
    spec_file: &Path,
    source_dir: &Path,
    registry: &CcRegistry,
    diagnostics: &mut dyn Write,
) -> ExitCode {
    // Parse the spec file
    let spec = match load_spec_file(spec_file, registry) {
        Ok(spec) => spec,
        Err(SpecError::Open { source, .. }) => {
            let _ = writeln!(diagnostics, "Cannot open file <{}>: {}", spec_file.display(), source);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // Always name the failing line, whatever the log filter
            let _ = writeln!(diagnostics, "{}", e);
            println!("Error when processing file <{}>", spec_file.display());
            return ExitCode::FAILURE;
        }
    };

    // Run the engine and report its status
    let mut engine = DryRunEngine::new(source_dir);
    let ret = engine.run(&spec, diagnostics);
    println!("simspec ({}) returns {}", spec_file.display(), ret);

    if ret == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Parse every file in parallel; returns true if all of them parsed
fn check_files(spec_files: &[PathBuf], registry: &CcRegistry) -> bool {
    // Parse all files first, then report in command line order
    let results: Vec<_> = spec_files
        .par_iter()
        .map(|path| (path, load_spec_file(path, registry)))
        .collect();

    let mut failures = 0;
    for (path, result) in &results {
        match result {
            Ok(spec) => println!(
                "{}: ok ({} link segments)",
                path.display(),
                spec.nb_link_segments()
            ),
            Err(e) => {
                failures += 1;
                println!("{}: {}", path.display(), e);
            }
        }
    }

    info!("Checked {} spec files, {} failed", results.len(), failures);
    failures == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["simspec", "-S", "/src/picoquic", "sim_specs/short.txt"]);

        assert_eq!(args.spec_files, vec![PathBuf::from("sim_specs/short.txt")]);
        assert_eq!(args.source_dir, Some(PathBuf::from("/src/picoquic")));
        assert!(!args.check);
    }

    #[test]
    fn test_check_args() {
        let args = Args::parse_from(["simspec", "--check", "a.txt", "b.txt", "--log-level", "debug"]);

        assert!(args.check);
        assert_eq!(args.spec_files.len(), 2);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_spec_file_required() {
        assert!(Args::try_parse_from(["simspec"]).is_err());
    }

    #[test]
    fn test_check_files() {
        let registry = CcRegistry::with_defaults();

        let mut good = NamedTempFile::new().unwrap();
        write!(good, "latency: 10000\nlink_scenario: 10:U1;20:U2\n").unwrap();
        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, "latency: ten\n").unwrap();

        assert!(check_files(&[good.path().to_path_buf()], &registry));
        assert!(!check_files(
            &[good.path().to_path_buf(), bad.path().to_path_buf()],
            &registry
        ));
    }

    #[test]
    fn test_run_file_reports_failing_line() {
        let registry = CcRegistry::with_defaults();
        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, "latency: 10\njitter: fast\n").unwrap();

        let mut diagnostics = Vec::new();
        let code = run_file(bad.path(), Path::new(DEFAULT_SOURCE_DIR), &registry, &mut diagnostics);
        assert_eq!(code, ExitCode::FAILURE);

        let text = String::from_utf8(diagnostics).unwrap();
        assert!(text.contains("line 2"), "{}", text);
        assert!(text.contains("jitter"), "{}", text);
    }

    #[test]
    fn test_run_file_missing_and_good() {
        let registry = CcRegistry::with_defaults();

        let mut diagnostics = Vec::new();
        let code = run_file(
            Path::new("/nonexistent/spec.txt"),
            Path::new(DEFAULT_SOURCE_DIR),
            &registry,
            &mut diagnostics,
        );
        assert_eq!(code, ExitCode::FAILURE);
        assert!(String::from_utf8(diagnostics).unwrap().starts_with("Cannot open file"));

        let mut good = NamedTempFile::new().unwrap();
        write!(good, "nb_connections: 3\n").unwrap();
        let mut diagnostics = Vec::new();
        let code = run_file(good.path(), Path::new("/src/picoquic"), &registry, &mut diagnostics);
        assert_eq!(code, ExitCode::SUCCESS);

        let report: serde_json::Value = serde_json::from_slice(&diagnostics).unwrap();
        assert_eq!(report["spec"]["nb_connections"], 3);
    }
}
