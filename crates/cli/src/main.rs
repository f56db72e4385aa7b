mod grid_file;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use tilemend_core::classification::domain::defect_classifier::DefectClassifier;
use tilemend_core::pipeline::defect_merger::DefectMerger;
use tilemend_core::pipeline::infrastructure::sequential_merge_executor::SequentialMergeExecutor;
use tilemend_core::pipeline::infrastructure::threaded_merge_executor::ThreadedMergeExecutor;
use tilemend_core::pipeline::merge_executor::{MergeConfig, MergeExecutor};
use tilemend_core::pipeline::merge_logger::StdoutMergeLogger;
use tilemend_core::shared::constants::DEFAULT_TOLERANCE;

/// Merge per-tile defect detections into image-wide detections.
#[derive(Parser)]
#[command(name = "tilemend")]
struct Cli {
    /// Tile grid JSON file.
    input: PathBuf,

    /// Output JSON file (stdout if omitted).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pixel tolerance for proximity and mask-overlap merging.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE, allow_negative_numbers = true)]
    tolerance: i32,

    /// Fold each defect category on its own thread.
    #[arg(long)]
    threaded: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let grid = grid_file::read_grid(&cli.input)?;
    log::info!(
        "Loaded {} detections in {} tile rows from {}",
        grid.detection_count(),
        grid.row_count(),
        cli.input.display()
    );

    let executor: Box<dyn MergeExecutor> = if cli.threaded {
        Box::new(ThreadedMergeExecutor::new())
    } else {
        Box::new(SequentialMergeExecutor::new())
    };
    let mut merger = DefectMerger::new(
        DefectClassifier::default(),
        MergeConfig::new(cli.tolerance),
        executor,
        Box::new(StdoutMergeLogger::default()),
    );
    let merged = merger.merge(grid);

    match &cli.output {
        Some(path) => {
            grid_file::write_merged(File::create(path)?, &merged)?;
            log::info!("Output written to {}", path.display());
        }
        None => grid_file::write_merged(io::stdout().lock(), &merged)?,
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate_input(&cli.input)?;
    validate_tolerance(cli.tolerance)?;
    Ok(())
}

fn validate_input(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    Ok(())
}

fn validate_tolerance(tolerance: i32) -> Result<(), Box<dyn std::error::Error>> {
    if tolerance < 0 {
        return Err(format!("Tolerance must be non-negative, got {tolerance}").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let err = validate_input(&missing).unwrap_err();
        assert!(err.to_string().starts_with("Input file not found"));
    }

    #[test]
    fn test_existing_input_is_accepted() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_input(file.path()).is_ok());
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let err = validate_tolerance(-1).unwrap_err();
        assert_eq!(err.to_string(), "Tolerance must be non-negative, got -1");
    }

    #[test]
    fn test_zero_and_default_tolerance_are_accepted() {
        assert!(validate_tolerance(0).is_ok());
        assert!(validate_tolerance(DEFAULT_TOLERANCE).is_ok());
    }

    #[test]
    fn test_cli_parses_negative_tolerance_then_validation_fails() {
        let cli = Cli::try_parse_from(["tilemend", "grid.json", "--tolerance", "-3"]).unwrap();
        assert_eq!(cli.tolerance, -3);
        assert!(!cli.threaded);
        assert!(validate_tolerance(cli.tolerance).is_err());
    }
}
