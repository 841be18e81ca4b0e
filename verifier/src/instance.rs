use crate::cost;
use crate::error::{ReadError, ReadErrorKind};
use std::fmt;
use std::str::FromStr;

pub type SiteId = usize;
pub type Level = i64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    pub fn distance(&self, other: &Self) -> i64 {
        cost::rounded_distance(self, other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Human-readable name of a site: the depot or a numbered customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteLabel(pub SiteId);

impl fmt::Display for SiteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "depot"),
            i => write!(f, "customer {}", i),
        }
    }
}

/// Inventory data of the depot or a customer.
///
/// `inventory_change` is positive for the depot (production) and negative for
/// customers (consumption), so a day is simulated by adding it to every site.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub position: Position,
    pub inventory_start: Level,
    pub inventory_min: Level,
    pub inventory_max: Level,
    pub inventory_change: Level,
    pub inventory_cost: f64,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at {} w/ levels {}:{}:{}, daily change {}, daily cost {}",
            self.position,
            self.inventory_min,
            self.inventory_start,
            self.inventory_max,
            self.inventory_change,
            self.inventory_cost
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub num_sites: usize,
    pub num_days: usize,
    pub capacity: Level,
    pub num_vehicles: usize,
    /// Indexed by site; the depot is at index 0
    pub sites: Vec<Site>,
}

/// Whitespace-separated fields of one instance line
struct Fields<'a> {
    lineno: usize,
    fields: Vec<&'a str>,
    next: usize,
}

impl<'a> Fields<'a> {
    fn new(lineno: usize, line: &'a str, expected: usize) -> Result<Self, ReadError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != expected {
            return Err(ReadError::new(
                lineno,
                ReadErrorKind::FieldCount {
                    expected,
                    found: fields.len(),
                },
            ));
        }
        Ok(Fields {
            lineno,
            fields,
            next: 0,
        })
    }

    fn take(&mut self) -> &'a str {
        let field = self.fields[self.next];
        self.next += 1;
        field
    }

    fn int<T: FromStr>(&mut self, what: &'static str) -> Result<T, ReadError> {
        let lineno = self.lineno;
        let field = self.take();
        field.parse().map_err(|_| {
            ReadError::new(
                lineno,
                ReadErrorKind::NotAnInteger {
                    what,
                    found: field.to_string(),
                },
            )
        })
    }

    fn float(&mut self, what: &'static str) -> Result<f64, ReadError> {
        let lineno = self.lineno;
        let field = self.take();
        field.parse().map_err(|_| {
            ReadError::new(
                lineno,
                ReadErrorKind::NotAFloat {
                    what,
                    found: field.to_string(),
                },
            )
        })
    }
}

impl Instance {
    pub fn all_days(&self) -> impl Iterator<Item = usize> {
        0..self.num_days
    }

    pub fn all_customers(&self) -> impl Iterator<Item = SiteId> {
        1..self.num_sites
    }

    pub fn site(&self, i: SiteId) -> &Site {
        &self.sites[i]
    }

    pub fn depot(&self) -> &Site {
        &self.sites[0]
    }

    pub fn distance(&self, i: SiteId, j: SiteId) -> i64 {
        self.sites[i].position.distance(&self.sites[j].position)
    }
}

impl FromStr for Instance {
    type Err = ReadError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

        let missing = |lineno: usize, expected: &str| {
            ReadError::new(
                lineno,
                ReadErrorKind::MissingLine {
                    expected: expected.to_string(),
                },
            )
        };

        let (lineno, line) = lines
            .next()
            .ok_or_else(|| missing(1, "problem dimensions"))?;
        let mut meta = Fields::new(lineno, line, 4)?;
        let num_sites: usize = meta.int("number of nodes")?;
        let num_days: usize = meta.int("number of days")?;
        let capacity: Level = meta.int("vehicle capacity")?;
        let num_vehicles: usize = meta.int("number of vehicles")?;

        let (lineno, line) = lines.next().ok_or_else(|| missing(2, "depot data"))?;
        if num_sites == 0 {
            return Err(ReadError::new(
                lineno,
                ReadErrorKind::NodeCount {
                    expected: 0,
                    found: 1,
                },
            ));
        }
        let mut depot = Fields::new(lineno, line, 6)?;
        depot.int::<usize>("depot index")?;
        let x = depot.float("depot x coordinate")?;
        let y = depot.float("depot y coordinate")?;
        let start: Level = depot.int("depot start level")?;
        let production: Level = depot.int("depot daily production")?;
        let cost = depot.float("depot daily cost")?;

        let max = Level::try_from(num_days)
            .ok()
            .and_then(|days| production.checked_mul(days))
            .and_then(|total| start.checked_add(total))
            .ok_or_else(|| {
                ReadError::new(
                    lineno,
                    ReadErrorKind::Overflow {
                        what: "depot maximum level",
                    },
                )
            })?;

        let mut sites = Vec::with_capacity(num_sites);
        sites.push(Site {
            position: Position::new(x, y),
            inventory_start: start,
            inventory_min: 0,
            inventory_max: max,
            inventory_change: production,
            inventory_cost: cost,
        });

        let mut last_lineno = lineno;
        for (lineno, line) in lines {
            last_lineno = lineno;
            if line.trim().is_empty() {
                continue;
            }
            if sites.len() == num_sites {
                return Err(ReadError::new(
                    lineno,
                    ReadErrorKind::NodeCount {
                        expected: num_sites,
                        found: sites.len() + 1,
                    },
                ));
            }

            let mut customer = Fields::new(lineno, line, 8)?;
            customer.int::<usize>("customer index")?;
            let x = customer.float("customer x coordinate")?;
            let y = customer.float("customer y coordinate")?;
            let start: Level = customer.int("customer start level")?;
            let max: Level = customer.int("customer maximum level")?;
            let min: Level = customer.int("customer minimum level")?;
            let consumption: Level = customer.int("customer daily consumption")?;
            let cost = customer.float("customer daily cost")?;

            sites.push(Site {
                position: Position::new(x, y),
                inventory_start: start,
                inventory_min: min,
                inventory_max: max,
                inventory_change: -consumption,
                inventory_cost: cost,
            });
        }

        if sites.len() != num_sites {
            return Err(ReadError::new(
                last_lineno,
                ReadErrorKind::NodeCount {
                    expected: num_sites,
                    found: sites.len(),
                },
            ));
        }

        Ok(Instance {
            num_sites,
            num_days,
            capacity,
            num_vehicles,
            sites,
        })
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Instance with {} customers for {} days with {} vehicles of capacity {}:",
            self.num_sites - 1,
            self.num_days,
            self.num_vehicles,
            self.capacity
        )?;
        for (i, site) in self.sites.iter().enumerate() {
            writeln!(f, "    {} {}", SiteLabel(i), site)?
        }
        Ok(())
    }
}
