//! Reader for the solution text format.
//!
//! ```text
//! Day 1
//! Route 1: 0 - 3 ( 12 ) - 1 ( 7 ) - 0
//! Route 2: 0 - 0
//! Day 2
//! ...
//! <total transportation cost>
//! <total inventory cost at customers>
//! <total inventory cost at depot>
//! <total solution cost>
//! <processor>
//! <solution time in seconds>
//! ```

use crate::error::{ReadError, ReadErrorKind};
use crate::instance::{Instance, Level};
use crate::solution::{Delivery, Route, Schedule, Solution};
use std::str::FromStr;

/// A line of text together with its 1-based line number in the input
pub type NumberedLine<'a> = (usize, &'a str);

pub fn numbered_lines(text: &str) -> Vec<NumberedLine<'_>> {
    text.lines().enumerate().map(|(i, line)| (i + 1, line)).collect()
}

fn integer<T: FromStr>(lineno: usize, what: &'static str, token: &str) -> Result<T, ReadError> {
    token.parse().map_err(|_| {
        ReadError::new(
            lineno,
            ReadErrorKind::NotAnInteger {
                what,
                found: token.to_string(),
            },
        )
    })
}

fn float(lineno: usize, what: &'static str, token: &str) -> Result<f64, ReadError> {
    token.parse().map_err(|_| {
        ReadError::new(
            lineno,
            ReadErrorKind::NotAFloat {
                what,
                found: token.to_string(),
            },
        )
    })
}

/// Cursor over the space-separated tokens of a route
struct Tokens<'a> {
    lineno: usize,
    tokens: &'a [&'a str],
    next: usize,
}

impl<'a> Tokens<'a> {
    fn new(lineno: usize, tokens: &'a [&'a str]) -> Self {
        Tokens {
            lineno,
            tokens,
            next: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.next >= self.tokens.len()
    }

    fn advance(&mut self) -> Result<&'a str, ReadError> {
        let token = *self
            .tokens
            .get(self.next)
            .ok_or_else(|| ReadError::new(self.lineno, ReadErrorKind::IncompleteStop))?;
        self.next += 1;
        Ok(token)
    }

    fn literal(&mut self, literal: &str, expected: &str) -> Result<(), ReadError> {
        let token = self.advance()?;
        if token != literal {
            return Err(ReadError::new(
                self.lineno,
                ReadErrorKind::Unexpected {
                    expected: expected.to_string(),
                    found: token.to_string(),
                },
            ));
        }
        Ok(())
    }

    fn integer<T: FromStr>(&mut self, what: &'static str) -> Result<T, ReadError> {
        let token = self.advance()?;
        integer(self.lineno, what, token)
    }
}

/// Reads one solution from numbered lines, checking it against the instance dimensions
pub struct Parser<'a> {
    instance: &'a Instance,
    lines: &'a [NumberedLine<'a>],
    next: usize,
    lineno: usize,
}

impl<'a> Parser<'a> {
    pub fn new(instance: &'a Instance, lines: &'a [NumberedLine<'a>]) -> Self {
        Parser {
            instance,
            lines,
            next: 0,
            lineno: 0,
        }
    }

    fn err(&self, kind: ReadErrorKind) -> ReadError {
        ReadError::new(self.lineno, kind)
    }

    fn next_line(&mut self, expected: &str) -> Result<&'a str, ReadError> {
        match self.lines.get(self.next) {
            Some(&(lineno, line)) => {
                self.next += 1;
                self.lineno = lineno;
                Ok(line)
            }
            None => {
                self.lineno += 1;
                Err(self.err(ReadErrorKind::MissingLine {
                    expected: expected.to_string(),
                }))
            }
        }
    }

    fn unexpected(&self, expected: String, found: &str) -> ReadError {
        self.err(ReadErrorKind::Unexpected {
            expected,
            found: found.to_string(),
        })
    }

    pub fn parse(mut self) -> Result<Solution, ReadError> {
        let mut days = Vec::with_capacity(self.instance.num_days);
        for t in self.instance.all_days() {
            days.push(self.parse_day(t + 1)?);
        }

        let expected = "total transportation cost";
        let line = self.next_line(expected)?;
        let cost_transportation: i64 = integer(self.lineno, expected, line.trim())?;

        let expected = "total inventory cost at customers";
        let line = self.next_line(expected)?;
        let cost_inventory_customers = float(self.lineno, expected, line.trim())?;

        let expected = "total inventory cost at depot";
        let line = self.next_line(expected)?;
        let cost_inventory_depot = float(self.lineno, expected, line.trim())?;

        let expected = "total solution cost";
        let line = self.next_line(expected)?;
        let cost = float(self.lineno, expected, line.trim())?;

        let processor = self.next_line("processor")?.to_string();

        let expected = "solution time in seconds";
        let line = self.next_line(expected)?;
        let time = float(self.lineno, expected, line.trim())?;

        for &(lineno, line) in &self.lines[self.next..] {
            if !line.trim().is_empty() {
                return Err(ReadError::new(
                    lineno,
                    ReadErrorKind::TrailingJunk {
                        junk: line.to_string(),
                    },
                ));
            }
        }

        Ok(Solution {
            schedule: Schedule(days),
            cost_transportation,
            cost_inventory_customers,
            cost_inventory_depot,
            cost,
            processor,
            time,
        })
    }

    fn parse_day(&mut self, day: usize) -> Result<Vec<Route>, ReadError> {
        let expected = format!("'Day {day}'");
        let line = self.next_line(&expected)?;
        let data: Vec<&str> = line.split(' ').collect();
        if data.len() != 2 || data[0] != "Day" || data[1] != day.to_string() {
            return Err(self.unexpected(expected, line));
        }

        let mut routes = Vec::with_capacity(self.instance.num_vehicles);
        for v in 0..self.instance.num_vehicles {
            routes.push(self.parse_route(v + 1)?);
        }
        Ok(routes)
    }

    fn parse_route(&mut self, route: usize) -> Result<Route, ReadError> {
        let expected = format!("'Route {route}: <route>'");
        let line = self.next_line(&expected)?;
        let data: Vec<&str> = line.split(": ").collect();
        if data.len() != 2 {
            return Err(self.unexpected(expected, line));
        }

        let left: Vec<&str> = data[0].split(' ').collect();
        if left.len() != 2 || left[0] != "Route" || left[1] != route.to_string() {
            return Err(self.unexpected(expected, line));
        }

        let tokens: Vec<&str> = data[1].split(' ').collect();
        if tokens.len() < 3 {
            return Err(self.err(ReadErrorKind::RouteTooShort));
        }
        if tokens[0] != "0" {
            return Err(self.err(ReadErrorKind::RouteNotFromDepot));
        }
        if tokens[tokens.len() - 1] != "0" {
            return Err(self.err(ReadErrorKind::RouteNotToDepot));
        }

        let mut cursor = Tokens::new(self.lineno, &tokens[1..tokens.len() - 1]);
        cursor.literal("-", "first node delimiter '-'")?;

        let mut stops = Route::new();
        while !cursor.is_empty() {
            let customer: usize = cursor.integer("customer in route")?;
            if customer >= self.instance.num_sites {
                return Err(self.err(ReadErrorKind::UnknownCustomer { customer }));
            }
            cursor.literal("(", "'(' in route")?;
            let quantity: Level = cursor.integer("delivered quantity in route")?;
            cursor.literal(")", "')' in route")?;
            cursor.literal("-", "'-' delimiter in route")?;
            stops.push(Delivery { customer, quantity });
        }
        Ok(stops)
    }
}

impl Solution {
    /// Reads a single solution from `text`
    pub fn parse(instance: &Instance, text: &str) -> Result<Solution, ReadError> {
        let lines = numbered_lines(text);
        Parser::new(instance, &lines).parse()
    }
}
