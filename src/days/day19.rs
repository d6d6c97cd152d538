use itertools::Itertools;
use regex::Regex;

use crate::error::ParseError;
use crate::input::{numbered_lines, split_sections};
use crate::{Answers, Puzzle, RunConfig};

pub struct LinenLayout;

fn parse_towels(text: &str) -> Result<Vec<&str>, ParseError> {
    let towels: Vec<&str> = text
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|towel| !towel.is_empty())
        .collect();
    if let Some(bad) = towels
        .iter()
        .find(|towel| !towel.chars().all(|ch| "wubrg".contains(ch)))
    {
        return Err(ParseError::malformed(1, format!("unknown stripe colour in {bad:?}")));
    }
    if towels.is_empty() {
        return Err(ParseError::Missing("towel patterns"));
    }
    Ok(towels)
}

/// Matches designs built by concatenating towels.
fn towel_matcher(towels: &[&str]) -> Result<Regex, ParseError> {
    let alternatives = towels.iter().map(|towel| regex::escape(towel)).join("|");
    let pattern = format!("^(?:{alternatives})+$");
    Regex::new(&pattern).map_err(|err| ParseError::malformed(1, err.to_string()))
}

/// Number of distinct towel sequences spelling `design`.
fn arrangements(design: &str, towels: &[&str]) -> i64 {
    let design = design.as_bytes();
    let mut ways = vec![0i64; design.len() + 1];
    ways[0] = 1;
    for end in 1..=design.len() {
        let count = towels
            .iter()
            .filter(|towel| design[..end].ends_with(towel.as_bytes()))
            .map(|towel| ways[end - towel.len()])
            .sum();
        ways[end] = count;
    }
    ways[design.len()]
}

impl Puzzle for LinenLayout {
    fn day(&self) -> u8 {
        19
    }

    fn title(&self) -> &'static str {
        "Linen Layout"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let (towels, designs) = split_sections(input);
        let towels = parse_towels(towels)?;
        let matcher = towel_matcher(&towels)?;

        let designs: Vec<&str> = numbered_lines(designs).map(|(_, design)| design).collect();
        let possible = designs.iter().filter(|design| matcher.is_match(design)).count();
        let total: i64 = designs
            .iter()
            .map(|design| arrangements(design, &towels))
            .sum();
        Ok(Answers::new(possible, total))
    }
}
