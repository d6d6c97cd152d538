use rustc_hash::FxHashSet;

use crate::error::ParseError;
use crate::input::{numbered_lines, separated_numbers, split_sections};
use crate::{Answers, Puzzle, RunConfig};

pub struct PrintQueue;

/// Page pairs `(before, after)` that must appear in that order.
struct Rules(FxHashSet<(u32, u32)>);

impl Rules {
    fn parse(text: &str) -> Result<Self, ParseError> {
        let mut pairs = FxHashSet::default();
        for (line, rule) in numbered_lines(text) {
            match separated_numbers::<u32>(rule, '|', line)?[..] {
                [before, after] => {
                    pairs.insert((before, after));
                }
                _ => return Err(ParseError::malformed(line, "expected a rule like 47|53")),
            }
        }
        Ok(Self(pairs))
    }

    /// Pages of one update rearranged so every applicable rule holds, or
    /// `None` when the rules among these pages form a cycle. Pages with no
    /// rule between them keep their relative order.
    fn reorder(&self, pages: &[u32]) -> Option<Vec<u32>> {
        let mut remaining = pages.to_vec();
        let mut ordered = Vec::with_capacity(pages.len());
        while !remaining.is_empty() {
            let next = remaining.iter().position(|&page| {
                remaining
                    .iter()
                    .all(|&other| !self.0.contains(&(other, page)))
            })?;
            ordered.push(remaining.remove(next));
        }
        Some(ordered)
    }

    fn is_ordered(&self, pages: &[u32]) -> bool {
        pages
            .iter()
            .enumerate()
            .all(|(i, &a)| pages[i + 1..].iter().all(|&b| !self.0.contains(&(b, a))))
    }
}

fn middle(pages: &[u32]) -> i64 {
    pages.get(pages.len() / 2).map_or(0, |&page| page as i64)
}

impl Puzzle for PrintQueue {
    fn day(&self) -> u8 {
        5
    }

    fn title(&self) -> &'static str {
        "Print Queue"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let (rules, updates) = split_sections(input);
        let rules = Rules::parse(rules)?;

        let mut ordered = 0;
        let mut reordered = 0;
        for (line, update) in numbered_lines(updates) {
            let pages = separated_numbers::<u32>(update, ',', line)?;
            if rules.is_ordered(&pages) {
                ordered += middle(&pages);
            } else {
                let pages = rules
                    .reorder(&pages)
                    .ok_or(ParseError::malformed(line, "page rules form a cycle"))?;
                reordered += middle(&pages);
            }
        }
        Ok(Answers::new(ordered, reordered))
    }
}
