//! Availability matrix: unit status counts per block and floor

use super::entities::{PropertyStatus, ProjectStructure};
use serde::Serialize;

/// Status counts for one group of properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub available: usize,
    pub booked: usize,
    pub sold: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: PropertyStatus) {
        match status {
            PropertyStatus::Available => self.available += 1,
            PropertyStatus::Booked => self.booked += 1,
            PropertyStatus::Sold => self.sold += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.available + self.booked + self.sold
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.available += other.available;
        self.booked += other.booked;
        self.sold += other.sold;
    }

    /// Share of sold and booked properties, in whole percent
    pub fn occupancy_percent(&self) -> u32 {
        match self.total() {
            0 => 0,
            total => ((self.booked + self.sold) * 100 / total) as u32,
        }
    }
}

/// One floor row of the matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorRow {
    pub block: String,
    pub floor: String,
    pub counts: StatusCounts,
}

/// Unit status counts for a whole project
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AvailabilityMatrix {
    pub rows: Vec<FloorRow>,
    pub houses: StatusCounts,
    pub totals: StatusCounts,
}

impl AvailabilityMatrix {
    pub fn from_structure(structure: &ProjectStructure) -> Self {
        let mut matrix = AvailabilityMatrix::default();

        for block in &structure.blocks {
            for floor in &block.floors {
                let mut counts = StatusCounts::default();
                for unit in &floor.units {
                    counts.record(unit.status);
                }
                matrix.totals.merge(&counts);
                matrix.rows.push(FloorRow {
                    block: block.name.clone(),
                    floor: floor.name.clone(),
                    counts,
                });
            }
        }

        for house in &structure.houses {
            matrix.houses.record(house.status);
        }
        let houses = matrix.houses;
        matrix.totals.merge(&houses);
        matrix
    }

    pub fn is_empty(&self) -> bool {
        self.totals.total() == 0
    }
}
