use std::sync::OnceLock;

use regex::Regex;

use crate::error::ParseError;
use crate::{Answers, Puzzle, RunConfig};

pub struct MullItOver;

fn instruction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)")
            .expect("static regex is valid")
    })
}

/// Sums every `mul(a,b)`; with `toggles`, `don't()` disables them until the
/// next `do()`.
fn scan(memory: &str, toggles: bool) -> i64 {
    let mut enabled = true;
    let mut total = 0;
    for caps in instruction_re().captures_iter(memory) {
        match &caps[0] {
            "do()" => enabled = true,
            "don't()" => enabled = !toggles,
            _ if enabled => {
                // at most three digits each, always fits
                let a: i64 = caps[1].parse().unwrap_or(0);
                let b: i64 = caps[2].parse().unwrap_or(0);
                total += a * b;
            }
            _ => {}
        }
    }
    total
}

impl Puzzle for MullItOver {
    fn day(&self) -> u8 {
        3
    }

    fn title(&self) -> &'static str {
        "Mull It Over"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        Ok(Answers::new(scan(input, false), scan(input, true)))
    }
}
