//! Splitting of solution files that hold several solutions.
//!
//! A file whose first character is the comment marker may contain any number
//! of solutions back-to-back, each starting with a `Day 1` line. Comment lines
//! are collected per block and never reach the solution parser.

use crate::parse::{numbered_lines, NumberedLine};

pub const COMMENT_MARKER: char = '#';

const BLOCK_START: &str = "Day 1";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block<'a> {
    pub lines: Vec<NumberedLine<'a>>,
    pub commentary: Vec<NumberedLine<'a>>,
}

pub fn is_multi_solution(text: &str) -> bool {
    text.starts_with(COMMENT_MARKER)
}

/// Splits `text` into solution blocks, keeping the original line numbers
pub fn split(text: &str) -> Vec<Block<'_>> {
    let lines = numbered_lines(text);
    if !is_multi_solution(text) {
        return vec![Block {
            lines,
            commentary: Vec::new(),
        }];
    }

    let mut blocks = Vec::new();
    let mut current = Block::default();
    for (lineno, line) in lines {
        if line.starts_with(COMMENT_MARKER) {
            current.commentary.push((lineno, line));
            continue;
        }
        if line == BLOCK_START && !current.lines.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
        current.lines.push((lineno, line));
    }
    blocks.push(current);
    blocks
}
