use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod benchmark;
pub mod blocks;
pub mod check;
pub mod cost;
pub mod error;
pub mod instance;
pub mod parse;
pub mod solution;
pub mod time_limit;
pub mod verifier;

pub use benchmark::BenchmarkTable;
pub use error::{Error, ReadError, VerificationError};
pub use instance::Instance;
pub use solution::Solution;
pub use time_limit::BenchmarkLookup;
pub use verifier::{Report, Verifier};

/// Why a solution file fails, including problems with the files themselves
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to open {kind} file {path}: {source}")]
    Io {
        kind: &'static str,
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to read instance file {path}: {source}")]
    Instance { path: String, source: ReadError },

    #[error(transparent)]
    Benchmark(#[from] benchmark::BenchmarkError),

    #[error("Read error {path}:{source}")]
    Read { path: String, source: ReadError },

    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),
}

pub struct Config {
    pub instance: PathBuf,
    pub solution: PathBuf,
    pub benchmarks: PathBuf,
}

impl Config {
    /// Uses `solution` if given, else `out_<instance name>.txt` in `solution_dir`,
    /// which defaults to the directory of the instance
    pub fn new(
        instance: PathBuf,
        solution_dir: Option<PathBuf>,
        solution: Option<PathBuf>,
        benchmarks: PathBuf,
    ) -> Config {
        let solution =
            solution.unwrap_or_else(|| solution_path(&instance, solution_dir.as_deref()));
        Config {
            instance,
            solution,
            benchmarks,
        }
    }
}

pub fn solution_path(instance: &Path, solution_dir: Option<&Path>) -> PathBuf {
    let base = instance
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = solution_dir
        .or_else(|| instance.parent())
        .unwrap_or_else(|| Path::new(""));
    dir.join(format!("out_{base}.txt"))
}

fn read_file(kind: &'static str, path: &Path) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::Io {
        kind,
        path: path.display().to_string(),
        source,
    })
}

/// Verifies the solution file named by `config`, returning a report per solution block
pub fn run(config: &Config) -> Result<Vec<Report>, RunError> {
    let instance_text = read_file("instance", &config.instance)?;
    let solution_text = read_file("solution", &config.solution)?;

    info!("Reading instance from file {:?}", config.instance);
    let instance: Instance = instance_text.parse().map_err(|source| RunError::Instance {
        path: config.instance.display().to_string(),
        source,
    })?;
    info!("Number of nodes: {}", instance.num_sites);
    info!("Number of days: {}", instance.num_days);
    info!("Number of vehicles: {}", instance.num_vehicles);
    info!("Vehicle capacity: {}", instance.capacity);
    log::debug!("{}", instance);

    let benchmarks = BenchmarkTable::read_from_file(&config.benchmarks)?;
    info!("Read {} benchmark scores", benchmarks.len());

    info!("Reading solution from file {:?}", config.solution);
    Verifier::new(&instance, &benchmarks)
        .verify(&solution_text)
        .map_err(|err| match err {
            Error::Read(source) => RunError::Read {
                path: config.solution.display().to_string(),
                source,
            },
            Error::Verification(err) => RunError::Verification(err),
        })
}
