use crate::cost::approx_equal;
use crate::error::{CostCategory, VerificationError};
use crate::instance::{Instance, SiteLabel};
use crate::solution::{volume, Delivery, Route, Solution, Volume};
use log::debug;

/// Costs recomputed from the routes
#[derive(Debug, Clone, PartialEq)]
pub struct Costs {
    pub transportation: i64,
    pub inventory_customers: f64,
    pub inventory_depot: f64,
}

impl Costs {
    pub fn total(&self) -> f64 {
        self.transportation as f64 + self.inventory_customers + self.inventory_depot
    }
}

/// Inventory simulation state, owned by a single verification
struct Simulation<'a> {
    instance: &'a Instance,
    inventory: Vec<Volume>,
    cost_inventory: Vec<f64>,
    cost_transportation: i64,
}

impl<'a> Simulation<'a> {
    fn new(instance: &'a Instance) -> Self {
        Simulation {
            instance,
            inventory: instance
                .sites
                .iter()
                .map(|site| Volume::from(site.inventory_start))
                .collect(),
            cost_inventory: vec![0.; instance.num_sites],
            cost_transportation: 0,
        }
    }

    // a violation here means the instance is invalid, not the solution
    fn check_start_levels(&self) -> Result<(), VerificationError> {
        for (i, site) in self.instance.sites.iter().enumerate() {
            let level = site.inventory_start;
            if level < site.inventory_min {
                return Err(VerificationError::StartBelowMinimum {
                    site: SiteLabel(i),
                    level,
                    min: site.inventory_min,
                });
            }
            if level > site.inventory_max {
                return Err(VerificationError::StartAboveMaximum {
                    site: SiteLabel(i),
                    level,
                    max: site.inventory_max,
                });
            }
        }
        Ok(())
    }

    fn tour_length(&self, route: &[Delivery]) -> i64 {
        let mut length: i64 = 0;
        let mut last = 0;
        for delivery in route {
            length = length.saturating_add(self.instance.distance(last, delivery.customer));
            last = delivery.customer;
        }
        length.saturating_add(self.instance.distance(last, 0))
    }

    fn simulate_day(&mut self, day: usize, routes: &[Route]) -> Result<(), VerificationError> {
        let instance = self.instance;

        // each customer receives at most one delivery
        let mut deliveries = vec![0; instance.num_sites];
        for delivery in routes.iter().flatten() {
            deliveries[delivery.customer] += 1;
        }
        if let Some((i, &count)) = deliveries.iter().enumerate().find(|(_, n)| **n > 1) {
            return Err(VerificationError::DuplicateDelivery {
                day,
                site: SiteLabel(i),
                count,
            });
        }

        for (r, route) in routes.iter().enumerate() {
            self.cost_transportation = self
                .cost_transportation
                .saturating_add(self.tour_length(route));

            let load = volume(route);
            if load > Volume::from(instance.capacity) {
                return Err(VerificationError::CapacityExceeded {
                    day,
                    route: r + 1,
                    volume: load,
                    capacity: instance.capacity,
                });
            }
        }

        // deliveries, checking the upper level limit
        for (r, route) in routes.iter().enumerate() {
            for delivery in route {
                let i = delivery.customer;
                self.inventory[i] += Volume::from(delivery.quantity);
                self.inventory[0] -= Volume::from(delivery.quantity);
                if self.inventory[i] > Volume::from(instance.site(i).inventory_max) {
                    return Err(VerificationError::AboveMaximum {
                        day,
                        route: r + 1,
                        site: SiteLabel(i),
                        quantity: delivery.quantity,
                        level: self.inventory[i],
                        max: instance.site(i).inventory_max,
                    });
                }
            }
        }

        // daily change (production at depot, consumption at customers), checking the lower level limit
        for (i, site) in instance.sites.iter().enumerate() {
            self.inventory[i] += Volume::from(site.inventory_change);
            if self.inventory[i] < Volume::from(site.inventory_min) {
                return Err(VerificationError::BelowMinimum {
                    day,
                    site: SiteLabel(i),
                    level: self.inventory[i],
                    min: site.inventory_min,
                });
            }
        }

        for (i, site) in instance.sites.iter().enumerate() {
            self.cost_inventory[i] += site.inventory_cost * self.inventory[i] as f64;
        }

        debug!("Day {day}: inventory levels {:?}", self.inventory);
        Ok(())
    }

    fn costs(&self) -> Costs {
        Costs {
            transportation: self.cost_transportation,
            inventory_customers: self
                .instance
                .all_customers()
                .map(|i| self.cost_inventory[i])
                .sum(),
            inventory_depot: self.cost_inventory[0],
        }
    }
}

fn reconcile(costs: &Costs, solution: &Solution) -> Result<(), VerificationError> {
    if costs.transportation != solution.cost_transportation {
        return Err(VerificationError::TransportationCost {
            computed: costs.transportation,
            reported: solution.cost_transportation,
        });
    }

    let figures = [
        (
            CostCategory::InventoryCustomers,
            costs.inventory_customers,
            solution.cost_inventory_customers,
        ),
        (
            CostCategory::InventoryDepot,
            costs.inventory_depot,
            solution.cost_inventory_depot,
        ),
        (CostCategory::Total, costs.total(), solution.cost),
    ];
    for (category, computed, reported) in figures {
        if !approx_equal(computed, reported) {
            return Err(VerificationError::CostMismatch {
                category,
                computed,
                reported,
            });
        }
    }
    Ok(())
}

/// Replays the solution day by day and reconciles the reported costs.
///
/// On each day all deliveries are applied before the daily production and
/// consumption, and holding costs are charged on the levels after that change.
/// The first violated rule is returned.
pub fn check(instance: &Instance, solution: &Solution) -> Result<Costs, VerificationError> {
    let mut simulation = Simulation::new(instance);
    simulation.check_start_levels()?;

    for (t, routes) in solution.schedule.days().enumerate() {
        simulation.simulate_day(t + 1, routes)?;
    }

    let costs = simulation.costs();
    debug!("Computed costs: {:?}", costs);
    reconcile(&costs, solution)?;
    Ok(costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Level;
    use crate::instance::tests::small;
    use crate::parse::tests::SOLUTION;
    use crate::solution::Schedule;

    fn solution() -> Solution {
        Solution::parse(&small(), SOLUTION).unwrap()
    }

    fn delivery(customer: usize, quantity: Level) -> Delivery {
        Delivery { customer, quantity }
    }

    /// Replaces the routes of day 1 and returns the first error
    fn first_day_error(instance: &Instance, routes: Vec<Route>) -> VerificationError {
        let mut solution = solution();
        let mut days = solution.schedule.0;
        days[0] = routes;
        solution.schedule = Schedule(days);
        check(instance, &solution).unwrap_err()
    }

    fn two_vehicles() -> Instance {
        let mut instance = small();
        instance.num_vehicles = 2;
        instance
    }

    mod simulation {
        use super::*;

        #[test]
        fn accepts_consistent_solution() {
            let costs = check(&small(), &solution()).unwrap();
            assert_eq!(costs.transportation, 73);
            assert!(approx_equal(costs.inventory_customers, 8.0));
            assert!(approx_equal(costs.inventory_depot, 138.0));
            assert!(approx_equal(costs.total(), 219.0));
        }

        #[test]
        fn empty_route_costs_nothing() {
            let instance = small();
            let simulation = Simulation::new(&instance);
            assert_eq!(simulation.tour_length(&[]), 0);
            assert_eq!(simulation.tour_length(&[delivery(4, 5)]), 10);
        }

        #[test]
        fn rejects_duplicate_delivery_across_routes() {
            let mut instance = two_vehicles();
            instance.capacity = 100;
            let err = first_day_error(
                &instance,
                vec![vec![delivery(3, 0)], vec![delivery(3, 0)]],
            );
            assert_eq!(
                err,
                VerificationError::DuplicateDelivery {
                    day: 1,
                    site: SiteLabel(3),
                    count: 2
                }
            );
        }

        #[test]
        fn allows_same_customer_on_different_days() {
            // customer 4 is served on every day of the fixture
            assert!(check(&small(), &solution()).is_ok());
        }

        #[test]
        fn accepts_volume_at_capacity() {
            let instance = small();
            // days 3 and 4 load exactly 25 units
            assert_eq!(instance.capacity, 25);
            assert!(check(&instance, &solution()).is_ok());
        }

        #[test]
        fn rejects_volume_above_capacity() {
            let mut instance = small();
            instance.capacity = 24;
            let err = check(&instance, &solution()).unwrap_err();
            assert_eq!(
                err,
                VerificationError::CapacityExceeded {
                    day: 3,
                    route: 1,
                    volume: 25,
                    capacity: 24
                }
            );
        }

        #[test]
        fn accepts_delivery_up_to_maximum_level() {
            let instance = small();
            let err = first_day_error(&instance, vec![vec![delivery(4, 10)]]);
            // reaching the maximum level of customer 4 is fine, only the holding costs change
            assert!(matches!(
                err,
                VerificationError::CostMismatch {
                    category: CostCategory::InventoryCustomers,
                    ..
                }
            ));
        }

        #[test]
        fn rejects_delivery_above_maximum_level() {
            let instance = small();
            let err = first_day_error(&instance, vec![vec![delivery(4, 11)]]);
            assert_eq!(
                err,
                VerificationError::AboveMaximum {
                    day: 1,
                    route: 1,
                    site: SiteLabel(4),
                    quantity: 11,
                    level: 11,
                    max: 10
                }
            );
        }

        #[test]
        fn rejects_route_volume_beyond_integer_range() {
            let instance = two_vehicles();
            let err = first_day_error(
                &instance,
                vec![vec![delivery(1, Level::MAX), delivery(2, 1)], vec![]],
            );
            assert_eq!(
                err,
                VerificationError::CapacityExceeded {
                    day: 1,
                    route: 1,
                    volume: Volume::from(Level::MAX) + 1,
                    capacity: 25
                }
            );
        }

        #[test]
        fn keeps_levels_exact_beyond_integer_range() {
            let mut instance = two_vehicles();
            instance.capacity = Level::MAX;
            instance.sites[1].inventory_max = Level::MAX;
            instance.sites[1].inventory_start = 10;
            let err = first_day_error(
                &instance,
                vec![vec![delivery(1, Level::MAX)], vec![]],
            );
            assert_eq!(
                err,
                VerificationError::AboveMaximum {
                    day: 1,
                    route: 1,
                    site: SiteLabel(1),
                    quantity: Level::MAX,
                    level: Volume::from(Level::MAX) + 10,
                    max: Level::MAX
                }
            );
        }

        #[test]
        fn rejects_stockout() {
            let instance = small();
            let err = first_day_error(&instance, vec![vec![]]);
            assert_eq!(
                err,
                VerificationError::BelowMinimum {
                    day: 1,
                    site: SiteLabel(4),
                    level: -5,
                    min: 0
                }
            );
        }

        #[test]
        fn rejects_depot_overdraw() {
            let mut instance = small();
            instance.sites[0].inventory_start = 30;
            instance.sites[0].inventory_change = 0;
            let err = check(&instance, &solution()).unwrap_err();
            assert_eq!(
                err,
                VerificationError::BelowMinimum {
                    day: 3,
                    site: SiteLabel(0),
                    level: -15,
                    min: 0
                }
            );
        }

        #[test]
        fn rejects_invalid_start_level() {
            let mut instance = small();
            instance.sites[2].inventory_start = 31;
            let err = check(&instance, &solution()).unwrap_err();
            assert_eq!(
                err,
                VerificationError::StartAboveMaximum {
                    site: SiteLabel(2),
                    level: 31,
                    max: 30
                }
            );

            instance.sites[2].inventory_start = -1;
            let err = check(&instance, &solution()).unwrap_err();
            assert!(matches!(
                err,
                VerificationError::StartBelowMinimum { .. }
            ));
        }
    }

    mod reconciliation {
        use super::*;

        #[test]
        fn requires_exact_transportation_cost() {
            let mut solution = solution();
            solution.cost_transportation = 74;
            assert_eq!(
                check(&small(), &solution).unwrap_err(),
                VerificationError::TransportationCost {
                    computed: 73,
                    reported: 74
                }
            );
        }

        fn mismatch(solution: &Solution) -> CostCategory {
            match check(&small(), solution).unwrap_err() {
                VerificationError::CostMismatch { category, .. } => category,
                err => panic!("unexpected error {err}"),
            }
        }

        #[test]
        fn names_customer_inventory_cost() {
            let mut solution = solution();
            solution.cost_inventory_customers = 8.01;
            assert_eq!(mismatch(&solution), CostCategory::InventoryCustomers);
        }

        #[test]
        fn names_depot_inventory_cost() {
            let mut solution = solution();
            solution.cost_inventory_depot = 137.99;
            assert_eq!(mismatch(&solution), CostCategory::InventoryDepot);
        }

        #[test]
        fn names_total_cost() {
            let mut solution = solution();
            solution.cost = 219.01;
            assert_eq!(mismatch(&solution), CostCategory::Total);
        }

        #[test]
        fn tolerates_sub_cent_differences() {
            let mut solution = solution();
            solution.cost_inventory_depot = 138.004;
            solution.cost = 218.996;
            assert!(check(&small(), &solution).is_ok());
        }
    }
}
