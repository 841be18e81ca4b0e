use crate::instance::{Level, SiteId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub customer: SiteId,
    pub quantity: Level,
}

/// Stops of one vehicle on one day; the depot at both ends is implicit
pub type Route = Vec<Delivery>;

/// Routes indexed by day, then by vehicle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule(pub Vec<Vec<Route>>);

impl Schedule {
    pub fn days(&self) -> impl Iterator<Item = &[Route]> {
        self.0.iter().map(Vec::as_slice)
    }
}

/// Level wide enough to add up any number of delivered quantities without overflow
pub type Volume = i128;

pub fn volume(route: &[Delivery]) -> Volume {
    route
        .iter()
        .map(|delivery| Volume::from(delivery.quantity))
        .sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub schedule: Schedule,
    pub cost_transportation: i64,
    pub cost_inventory_customers: f64,
    pub cost_inventory_depot: f64,
    pub cost: f64,
    pub processor: String,
    pub time: f64,
}

impl Solution {
    pub fn route(&self, t: usize, v: usize) -> &Route {
        &self.schedule.0[t][v]
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (t, day_schedule) in self.schedule.0.iter().enumerate() {
            writeln!(f, "Day {}", t + 1)?;
            for (route_idx, route) in day_schedule.iter().enumerate() {
                write!(f, "Route {}: 0 - ", route_idx + 1)?;
                for delivery in route.iter() {
                    write!(f, "{} ( {} ) - ", delivery.customer, delivery.quantity)?;
                }
                writeln!(f, "0")?;
            }
        }

        // Costs
        writeln!(f, "{}", self.cost_transportation)?;
        writeln!(f, "{}", self.cost_inventory_customers)?;
        writeln!(f, "{}", self.cost_inventory_depot)?;
        writeln!(f, "{}", self.cost)?;

        // Meta
        writeln!(f, "{}", self.processor)?;
        writeln!(f, "{}", self.time)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(customer: SiteId, quantity: Level) -> Delivery {
        Delivery { customer, quantity }
    }

    #[test]
    fn sums_route_volume() {
        assert_eq!(volume(&[]), 0);
        assert_eq!(volume(&[delivery(1, 10), delivery(4, 5)]), 15);
        assert_eq!(
            volume(&[delivery(1, Level::MAX), delivery(2, 1)]),
            Volume::from(Level::MAX) + 1
        );
    }

    #[test]
    fn writes_solution_format() {
        let solution = Solution {
            schedule: Schedule(vec![
                vec![vec![delivery(4, 5)], vec![]],
                vec![vec![], vec![delivery(2, 10), delivery(1, 10)]],
            ]),
            cost_transportation: 73,
            cost_inventory_customers: 8.0,
            cost_inventory_depot: 138.5,
            cost: 219.5,
            processor: "Intel Core i5-10210U @ 1.60GHz".to_string(),
            time: 12.5,
        };

        let expected = "\
Day 1
Route 1: 0 - 4 ( 5 ) - 0
Route 2: 0 - 0
Day 2
Route 1: 0 - 0
Route 2: 0 - 2 ( 10 ) - 1 ( 10 ) - 0
73
8
138.5
219.5
Intel Core i5-10210U @ 1.60GHz
12.5
";
        assert_eq!(solution.to_string(), expected);
    }
}
