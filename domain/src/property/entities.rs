//! Project and structure entities
//!
//! These are client-side views of server-owned records. Nothing here mutates
//! a status; the backend is authoritative.

use crate::core::error::DomainError;
use crate::core::ids::{BlockId, FloorId, HouseId, ProjectId, UnitId};
use crate::core::money::Money;
use serde::{Deserialize, Serialize};

/// Kind of development a project is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Residential,
    Commercial,
    Mixed,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Residential => "residential",
            ProjectType::Commercial => "commercial",
            ProjectType::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential" => Ok(ProjectType::Residential),
            "commercial" => Ok(ProjectType::Commercial),
            "mixed" => Ok(ProjectType::Mixed),
            other => Err(DomainError::unknown("project type", other)),
        }
    }
}

/// Sale status shared by units and houses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Booked,
    Sold,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Booked => "booked",
            PropertyStatus::Sold => "sold",
        }
    }

    /// Only available properties may be put into a wizard selection.
    pub fn is_selectable(&self) -> bool {
        matches!(self, PropertyStatus::Available)
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PropertyStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(PropertyStatus::Available),
            "booked" => Ok(PropertyStatus::Booked),
            "sold" => Ok(PropertyStatus::Sold),
            other => Err(DomainError::unknown("property status", other)),
        }
    }
}

/// A real-estate project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub has_blocks: bool,
    #[serde(default)]
    pub has_houses: bool,
}

impl Project {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId(id),
            name: name.into(),
            project_type: ProjectType::default(),
            location: String::new(),
            has_blocks: false,
            has_houses: false,
        }
    }

    pub fn with_blocks(mut self) -> Self {
        self.has_blocks = true;
        self
    }

    pub fn with_houses(mut self) -> Self {
        self.has_houses = true;
        self
    }

    pub fn with_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// A saleable unit (apartment, shop, office) on a floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    /// Display number such as `A-101`
    pub number: String,
    #[serde(default)]
    pub unit_type: String,
    /// Covered area in square feet
    #[serde(default)]
    pub size: f64,
    pub price: Money,
    pub status: PropertyStatus,
}

/// A floor of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// A block (tower, building) of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

/// A stand-alone house of a non-block project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    pub number: String,
    #[serde(default)]
    pub house_type: String,
    #[serde(default)]
    pub size: f64,
    pub price: Money,
    pub status: PropertyStatus,
}

/// The hierarchical decomposition of a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStructure {
    #[serde(default)]
    pub project_id: ProjectId,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub houses: Vec<House>,
}

impl ProjectStructure {
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn floor(&self, block: BlockId, floor: FloorId) -> Option<&Floor> {
        self.block(block)?.floors.iter().find(|f| f.id == floor)
    }

    /// All units of the project, in block and floor order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.blocks
            .iter()
            .flat_map(|b| b.floors.iter())
            .flat_map(|f| f.units.iter())
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units().find(|u| u.id == id)
    }

    pub fn unit_by_number(&self, number: &str) -> Option<&Unit> {
        self.units()
            .find(|u| u.number.eq_ignore_ascii_case(number.trim()))
    }

    pub fn house(&self, id: HouseId) -> Option<&House> {
        self.houses.iter().find(|h| h.id == id)
    }

    pub fn house_by_number(&self, number: &str) -> Option<&House> {
        self.houses
            .iter()
            .find(|h| h.number.eq_ignore_ascii_case(number.trim()))
    }
}

/// Which kind of property a selection refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Unit,
    House,
}

/// A reference to one selected property, unit or house
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyRef {
    Unit(UnitId),
    House(HouseId),
}

impl PropertyRef {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyRef::Unit(_) => PropertyKind::Unit,
            PropertyRef::House(_) => PropertyKind::House,
        }
    }

    pub fn raw_id(&self) -> u64 {
        match self {
            PropertyRef::Unit(id) => id.get(),
            PropertyRef::House(id) => id.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: u64, number: &str, status: PropertyStatus) -> Unit {
        Unit {
            id: UnitId(id),
            number: number.to_string(),
            unit_type: "2BHK".to_string(),
            size: 1100.0,
            price: Money::from_units(100_000),
            status,
        }
    }

    #[test]
    fn test_project_type_parse() {
        assert_eq!("Mixed".parse::<ProjectType>().unwrap(), ProjectType::Mixed);
        assert!("villa".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_only_available_is_selectable() {
        assert!(PropertyStatus::Available.is_selectable());
        assert!(!PropertyStatus::Booked.is_selectable());
        assert!(!PropertyStatus::Sold.is_selectable());
    }

    #[test]
    fn test_structure_lookup_by_number() {
        let structure = ProjectStructure {
            project_id: ProjectId(1),
            blocks: vec![Block {
                id: BlockId(1),
                name: "A".to_string(),
                floors: vec![Floor {
                    id: FloorId(10),
                    name: "Ground".to_string(),
                    units: vec![
                        unit(100, "A-001", PropertyStatus::Available),
                        unit(101, "A-002", PropertyStatus::Sold),
                    ],
                }],
            }],
            houses: vec![],
        };

        assert_eq!(structure.unit_by_number("a-002").unwrap().id, UnitId(101));
        assert_eq!(structure.units().count(), 2);
        assert!(structure.floor(BlockId(1), FloorId(10)).is_some());
        assert!(structure.floor(BlockId(2), FloorId(10)).is_none());
    }

    #[test]
    fn test_project_deserializes_with_defaults() {
        let project: Project =
            serde_json::from_str(r#"{"id": 3, "name": "Palm Residency", "has_blocks": true}"#)
                .unwrap();
        assert_eq!(project.project_type, ProjectType::Residential);
        assert!(project.has_blocks);
        assert!(!project.has_houses);
    }
}
