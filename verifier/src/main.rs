use clap::Parser;
use std::path::PathBuf;
use std::process;

/// Verifies solutions of DIMACS IRP instances
#[derive(Parser, Debug)]
#[clap(name = "verify", version)]
struct Args {
    /// Instance file
    instance: PathBuf,

    /// Directory containing the solution file out_<instance name>.txt [default: instance directory]
    solution_dir: Option<PathBuf>,

    /// Solution file to use instead of the one derived from the instance name
    #[clap(long)]
    solution: Option<PathBuf>,

    /// JSON file mapping processor names to single-threaded benchmark scores
    #[clap(long)]
    benchmarks: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = verifier::Config::new(
        args.instance,
        args.solution_dir,
        args.solution,
        args.benchmarks,
    );

    match verifier::run(&config) {
        Ok(reports) => {
            for report in reports.iter() {
                println!(
                    "Solution passes: total cost {:.2}, time {} seconds within limit of {:.1} seconds",
                    report.costs.total(),
                    report.solution.time,
                    report.time_limit
                );
            }
        }
        Err(e) => {
            println!("{}", e);
            process::exit(2);
        }
    }
}
