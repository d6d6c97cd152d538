use crate::error::ParseError;
use crate::{Answers, Puzzle, RunConfig};

pub struct DiskFragmenter;

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    len: usize,
}

/// Alternating file and free-space runs.
struct DiskMap {
    files: Vec<Span>,
    gaps: Vec<Span>,
}

impl DiskMap {
    fn parse(input: &str) -> Result<Self, ParseError> {
        let mut files = Vec::new();
        let mut gaps = Vec::new();
        let mut start = 0;
        for (index, ch) in input.trim_end().chars().enumerate() {
            let len = ch.to_digit(10).ok_or(ParseError::UnexpectedChar {
                ch,
                line: 1,
                column: index + 1,
            })? as usize;
            let span = Span { start, len };
            if index % 2 == 0 {
                files.push(span);
            } else {
                gaps.push(span);
            }
            start += len;
        }
        if files.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Self { files, gaps })
    }

    fn blocks(&self) -> Vec<Option<usize>> {
        let end = self.files.last().map_or(0, |span| span.start + span.len);
        let mut blocks = vec![None; end];
        for (id, span) in self.files.iter().enumerate() {
            blocks[span.start..span.start + span.len].fill(Some(id));
        }
        blocks
    }
}

/// Moves single blocks from the end into the leftmost free block.
fn compact_blocks(disk: &DiskMap) -> i64 {
    let mut blocks = disk.blocks();
    let (mut left, mut right) = (0, blocks.len());
    while left < right {
        if blocks[left].is_some() {
            left += 1;
        } else if blocks[right - 1].is_none() {
            right -= 1;
        } else {
            blocks.swap(left, right - 1);
            left += 1;
            right -= 1;
        }
    }
    blocks
        .iter()
        .enumerate()
        .filter_map(|(pos, id)| id.map(|id| (pos * id) as i64))
        .sum()
}

/// Moves whole files, highest id first, into the leftmost gap that fits.
fn compact_files(disk: &DiskMap) -> i64 {
    let mut files = disk.files.clone();
    let mut gaps = disk.gaps.clone();

    for file in files.iter_mut().rev() {
        let (start, len) = (file.start, file.len);
        let Some(gap) = gaps
            .iter_mut()
            .take_while(|gap| gap.start < start)
            .find(|gap| gap.len >= len)
        else {
            continue;
        };
        file.start = gap.start;
        gap.start += len;
        gap.len -= len;
    }

    files
        .iter()
        .enumerate()
        .map(|(id, span)| {
            (span.start..span.start + span.len)
                .map(|pos| (pos * id) as i64)
                .sum::<i64>()
        })
        .sum()
}

impl Puzzle for DiskFragmenter {
    fn day(&self) -> u8 {
        9
    }

    fn title(&self) -> &'static str {
        "Disk Fragmenter"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let disk = DiskMap::parse(input)?;
        Ok(Answers::new(compact_blocks(&disk), compact_files(&disk)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example() {
        let answers = DiskFragmenter
            .solve("2333133121414131402\n", &RunConfig::default())
            .unwrap();
        assert_eq!(answers, Answers::new(1928i64, 2858i64));
    }

    #[test]
    fn test_blocks_layout() {
        let disk = DiskMap::parse("12345").unwrap();
        let layout: String = disk
            .blocks()
            .iter()
            .map(|id| id.map_or('.', |id| char::from(b'0' + id as u8)))
            .collect();
        assert_eq!(layout, "0..111....22222");
    }

    #[test]
    fn test_non_digit_rejected() {
        assert!(matches!(
            DiskMap::parse("12a"),
            Err(ParseError::UnexpectedChar { ch: 'a', column: 3, .. })
        ));
    }
}
