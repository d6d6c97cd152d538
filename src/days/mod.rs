//! Registry of daily solvers.

use crate::Puzzle;

mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod day11;
mod day12;
mod day13;
mod day14;
mod day15;
mod day16;
mod day18;
mod day19;

pub use day01::HistorianHysteria;
pub use day02::RedNosedReports;
pub use day03::MullItOver;
pub use day04::CeresSearch;
pub use day05::PrintQueue;
pub use day06::GuardGallivant;
pub use day07::BridgeRepair;
pub use day08::ResonantCollinearity;
pub use day09::DiskFragmenter;
pub use day10::HoofIt;
pub use day11::PlutonianPebbles;
pub use day12::GardenGroups;
pub use day13::ClawContraption;
pub use day14::RestroomRedoubt;
pub use day15::WarehouseWoes;
pub use day16::ReindeerMaze;
pub use day18::RamRun;
pub use day19::LinenLayout;

/// Every available solver, in calendar order.
pub static PUZZLES: &[&dyn Puzzle] = &[
    &HistorianHysteria,
    &RedNosedReports,
    &MullItOver,
    &CeresSearch,
    &PrintQueue,
    &GuardGallivant,
    &BridgeRepair,
    &ResonantCollinearity,
    &DiskFragmenter,
    &HoofIt,
    &PlutonianPebbles,
    &GardenGroups,
    &ClawContraption,
    &RestroomRedoubt,
    &WarehouseWoes,
    &ReindeerMaze,
    &RamRun,
    &LinenLayout,
];

/// Looks up the solver for `day`.
pub fn find(day: u8) -> Option<&'static dyn Puzzle> {
    PUZZLES.iter().copied().find(|puzzle| puzzle.day() == day)
}
