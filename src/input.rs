//! Reading and splitting raw puzzle input.
//!
//! Puzzle inputs are small text blocks read in one go from standard input.
//! Some puzzles carry two blocks separated by a blank line (a map followed by
//! instructions, rules followed by updates).

use std::io::Read;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ParseError;

/// Reads all of standard input.
pub fn read_stdin() -> std::io::Result<String> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

/// Splits input at the first blank line.
///
/// Returns the text before it and the remainder after it. Windows line
/// endings are tolerated. When there is no blank line the second section is
/// empty.
pub fn split_sections(input: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in input.split_inclusive('\n') {
        if line.trim().is_empty() {
            return (&input[..offset], &input[offset + line.len()..]);
        }
        offset += line.len();
    }
    (input, "")
}

/// Non-empty lines with their 1-based line numbers.
pub fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parses a single number, attaching the line number on failure.
pub fn parse_number<T: FromStr>(text: &str, line: usize) -> Result<T, ParseError> {
    text.trim().parse().map_err(|_| ParseError::InvalidNumber {
        text: text.trim().to_string(),
        line,
    })
}

/// Parses every whitespace-separated token of `text` as a number.
pub fn whitespace_numbers<T: FromStr>(text: &str, line: usize) -> Result<Vec<T>, ParseError> {
    text.split_whitespace()
        .map(|token| parse_number(token, line))
        .collect()
}

/// Parses every `sep`-separated token of `text` as a number.
pub fn separated_numbers<T: FromStr>(
    text: &str,
    sep: char,
    line: usize,
) -> Result<Vec<T>, ParseError> {
    text.split(sep).map(|token| parse_number(token, line)).collect()
}

fn signed_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+").expect("static regex is valid"))
}

/// Extracts every (optionally negative) integer embedded in `text`,
/// ignoring the surrounding punctuation.
pub fn signed_numbers(text: &str, line: usize) -> Result<Vec<i64>, ParseError> {
    signed_number_re()
        .find_iter(text)
        .map(|m| parse_number(m.as_str(), line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sections_at_blank_line() {
        let (map, moves) = split_sections("##\n#@\n\n<>\n^v\n");
        assert_eq!(map, "##\n#@\n");
        assert_eq!(moves, "<>\n^v\n");
    }

    #[test]
    fn test_split_sections_without_blank_line() {
        let (first, rest) = split_sections("a\nb\n");
        assert_eq!(first, "a\nb\n");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_split_sections_crlf() {
        let (first, rest) = split_sections("a\r\n\r\nb\r\n");
        assert_eq!(first, "a\r\n");
        assert_eq!(rest, "b\r\n");
    }

    #[test]
    fn test_signed_numbers_ignore_punctuation() {
        let numbers = signed_numbers("p=0,4 v=3,-3", 1).unwrap();
        assert_eq!(numbers, [0, 4, 3, -3]);
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = whitespace_numbers::<i64>("1 2 x", 4).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                text: "x".to_string(),
                line: 4
            }
        );
    }

    #[test]
    fn test_numbered_lines_skip_blanks() {
        let lines: Vec<_> = numbered_lines("a\n\nb\n").collect();
        assert_eq!(lines, [(1, "a"), (3, "b")]);
    }
}
