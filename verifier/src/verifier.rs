use crate::blocks::{self, Block};
use crate::check::{self, Costs};
use crate::error::Result;
use crate::instance::Instance;
use crate::parse::Parser;
use crate::solution::Solution;
use crate::time_limit::{self, BenchmarkLookup};
use log::{debug, info, warn};

/// A solution that passed all checks
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub solution: Solution,
    pub commentary: Vec<String>,
    pub costs: Costs,
    pub time_limit: f64,
}

pub struct Verifier<'a> {
    instance: &'a Instance,
    benchmarks: &'a dyn BenchmarkLookup,
}

impl<'a> Verifier<'a> {
    pub fn new(instance: &'a Instance, benchmarks: &'a dyn BenchmarkLookup) -> Self {
        Verifier {
            instance,
            benchmarks,
        }
    }

    /// Parses and checks a single solution block; the simulation state is local to this call
    pub fn verify_block(&self, block: &Block<'_>) -> Result<Report> {
        let commentary: Vec<String> = block
            .commentary
            .iter()
            .map(|(_, line)| line.to_string())
            .collect();
        for line in commentary.iter() {
            info!("{}", line);
        }

        let solution = Parser::new(self.instance, &block.lines).parse()?;
        info!(
            "Solution with transportation cost {}, inventory cost {:.2} at customers and {:.2} at depot, total cost {:.2}",
            solution.cost_transportation,
            solution.cost_inventory_customers,
            solution.cost_inventory_depot,
            solution.cost
        );
        info!("Used processor {} for {} seconds", solution.processor, solution.time);
        debug!("Routes: {:?}", solution.schedule);

        let costs = check::check(self.instance, &solution)?;
        let time_limit = time_limit::check(&solution, self.benchmarks)?;

        Ok(Report {
            solution,
            commentary,
            costs,
            time_limit,
        })
    }

    /// Verifies every solution in `text`, stopping at the first block that fails
    pub fn verify(&self, text: &str) -> Result<Vec<Report>> {
        let blocks = blocks::split(text);
        info!("Verifying {} solution block(s)", blocks.len());

        let mut reports = Vec::with_capacity(blocks.len());
        for (b, block) in blocks.iter().enumerate() {
            match self.verify_block(block) {
                Ok(report) => reports.push(report),
                Err(err) => {
                    if blocks.len() > 1 {
                        warn!("Solution block {} of {} fails", b + 1, blocks.len());
                    }
                    return Err(err);
                }
            }
        }
        Ok(reports)
    }

    /// Verifies every solution in `text` independently and reports all outcomes
    pub fn verify_each(&self, text: &str) -> Vec<Result<Report>> {
        blocks::split(text)
            .iter()
            .map(|block| self.verify_block(block))
            .collect()
    }
}
