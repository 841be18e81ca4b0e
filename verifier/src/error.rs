use crate::instance::SiteLabel;
use crate::solution::Volume;
use std::fmt;
use thiserror::Error;

/// A structural problem in instance or solution text, located at a 1-based line
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{line}: {kind}")]
pub struct ReadError {
    pub line: usize,
    pub kind: ReadErrorKind,
}

impl ReadError {
    pub fn new(line: usize, kind: ReadErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadErrorKind {
    #[error("missing line; expected {expected}")]
    MissingLine { expected: String },

    #[error("expected {expected}, got '{found}'")]
    Unexpected { expected: String, found: String },

    #[error("expected (integral) {what}, got '{found}'")]
    NotAnInteger { what: &'static str, found: String },

    #[error("expected {what}, got '{found}'")]
    NotAFloat { what: &'static str, found: String },

    #[error("customer {customer} does not exist")]
    UnknownCustomer { customer: usize },

    #[error("route is too short to be valid; use '0 - 0' for an empty route")]
    RouteTooShort,

    #[error("route does not start at depot")]
    RouteNotFromDepot,

    #[error("route does not end at depot")]
    RouteNotToDepot,

    #[error("route is invalid, check format!")]
    IncompleteStop,

    #[error("line contains unexpected junk '{junk}', no more data expected")]
    TrailingJunk { junk: String },

    #[error("expected {expected} fields, got {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("expected {expected} nodes, got {found}")]
    NodeCount { expected: usize, found: usize },

    #[error("{what} is out of range")]
    Overflow { what: &'static str },
}

/// The cost figures reconciled with two-decimal tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostCategory {
    InventoryCustomers,
    InventoryDepot,
    Total,
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostCategory::InventoryCustomers => write!(f, "inventory cost at customers"),
            CostCategory::InventoryDepot => write!(f, "inventory cost at depot"),
            CostCategory::Total => write!(f, "total solution cost"),
        }
    }
}

/// A well-formed solution that violates a rule of the problem.
///
/// Day and route numbers are 1-based, as in the solution text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerificationError {
    #[error("Start inventory level of {site} < minimum inventory level ({level} < {min})")]
    StartBelowMinimum { site: SiteLabel, level: i64, min: i64 },

    #[error("Start inventory level of {site} > maximum inventory level ({level} > {max})")]
    StartAboveMaximum { site: SiteLabel, level: i64, max: i64 },

    #[error("Day {day}: {site} is delivered {count} times, expected <= 1")]
    DuplicateDelivery {
        day: usize,
        site: SiteLabel,
        count: usize,
    },

    #[error("Day {day}: Route {route}: Capacity is exceeded: got {volume}, expected <= {capacity}")]
    CapacityExceeded {
        day: usize,
        route: usize,
        volume: Volume,
        capacity: i64,
    },

    #[error("Day {day}: Route {route}: {site} is delivered {quantity} units, new level is {level}, expecting <= {max}")]
    AboveMaximum {
        day: usize,
        route: usize,
        site: SiteLabel,
        quantity: i64,
        level: Volume,
        max: i64,
    },

    #[error("Day {day}: new level of {site} becomes {level} units, expecting >= {min}")]
    BelowMinimum {
        day: usize,
        site: SiteLabel,
        level: Volume,
        min: i64,
    },

    #[error("total transportation cost is {computed}, but solution states {reported}")]
    TransportationCost { computed: i64, reported: i64 },

    #[error("{category} is {computed:.2}, but solution states {reported:.2}")]
    CostMismatch {
        category: CostCategory,
        computed: f64,
        reported: f64,
    },

    #[error("processor '{processor}' is unknown")]
    UnknownProcessor { processor: String },

    #[error("time limit exceeded: solution time is {time} seconds, limit is {limit} seconds")]
    TimeLimitExceeded { time: f64, limit: f64 },
}

/// Everything that makes a solution fail, apart from I/O
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Read error {0}")]
    Read(#[from] ReadError),

    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),
}

pub type Result<T> = std::result::Result<T, Error>;
