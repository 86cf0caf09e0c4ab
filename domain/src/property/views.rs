//! Derived views over fetched project data
//!
//! Every function here is pure: same inputs, same output. Callers that want
//! to avoid recomputation wrap them in a [`crate::wizard::memo::Memo`].

use super::entities::{Block, Floor, House, Project, ProjectStructure, Unit};
use crate::core::ids::{BlockId, FloorId};

/// Which property selectors apply to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorVisibility {
    /// Block, floor and unit selectors
    pub blocks: bool,
    /// House selector
    pub houses: bool,
}

impl SelectorVisibility {
    pub fn for_project(project: Option<&Project>) -> Self {
        match project {
            Some(p) => Self {
                blocks: p.has_blocks,
                houses: p.has_houses,
            },
            None => Self::default(),
        }
    }
}

/// Projects whose name or location contains `query`, ignoring case.
///
/// A blank query matches everything.
pub fn filter_projects<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.location.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Blocks of the selected project.
///
/// Empty when the project has no blocks or the structure belongs to a
/// different project.
pub fn blocks_for_project<'a>(structure: &'a ProjectStructure, project: &Project) -> &'a [Block] {
    if !project.has_blocks || structure.project_id != project.id {
        return &[];
    }
    &structure.blocks
}

/// Floors of one block
pub fn floors_for_block(structure: &ProjectStructure, block: BlockId) -> &[Floor] {
    structure
        .block(block)
        .map(|b| b.floors.as_slice())
        .unwrap_or(&[])
}

/// Units that can still be selected on the current block/floor cursor.
///
/// Without a block nothing is listed; without a floor every floor of the
/// block contributes.
pub fn available_units(
    structure: &ProjectStructure,
    block: Option<BlockId>,
    floor: Option<FloorId>,
) -> Vec<Unit> {
    let Some(block) = block.and_then(|id| structure.block(id)) else {
        return Vec::new();
    };

    block
        .floors
        .iter()
        .filter(|f| floor.is_none_or(|id| f.id == id))
        .flat_map(|f| f.units.iter())
        .filter(|u| u.status.is_selectable())
        .cloned()
        .collect()
}

/// Houses that can still be selected
pub fn available_houses(structure: &ProjectStructure, project: &Project) -> Vec<House> {
    if !project.has_houses || structure.project_id != project.id {
        return Vec::new();
    }
    structure
        .houses
        .iter()
        .filter(|h| h.status.is_selectable())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{HouseId, ProjectId, UnitId};
    use crate::core::money::Money;
    use crate::property::entities::PropertyStatus;

    fn unit(id: u64, status: PropertyStatus) -> Unit {
        Unit {
            id: UnitId(id),
            number: format!("U-{}", id),
            unit_type: "shop".to_string(),
            size: 400.0,
            price: Money::from_units(50_000),
            status,
        }
    }

    fn structure() -> ProjectStructure {
        ProjectStructure {
            project_id: ProjectId(1),
            blocks: vec![Block {
                id: BlockId(1),
                name: "Tower A".to_string(),
                floors: vec![
                    Floor {
                        id: FloorId(11),
                        name: "1st".to_string(),
                        units: vec![
                            unit(1, PropertyStatus::Available),
                            unit(2, PropertyStatus::Booked),
                        ],
                    },
                    Floor {
                        id: FloorId(12),
                        name: "2nd".to_string(),
                        units: vec![unit(3, PropertyStatus::Available), unit(4, PropertyStatus::Sold)],
                    },
                ],
            }],
            houses: vec![House {
                id: HouseId(9),
                number: "H-9".to_string(),
                house_type: "villa".to_string(),
                size: 2400.0,
                price: Money::from_units(300_000),
                status: PropertyStatus::Available,
            }],
        }
    }

    #[test]
    fn test_selectors_hidden_without_blocks() {
        let project = Project::new(1, "Green Villas").with_houses();
        let visibility = SelectorVisibility::for_project(Some(&project));
        assert!(!visibility.blocks);
        assert!(visibility.houses);
        assert!(blocks_for_project(&structure(), &project).is_empty());
    }

    #[test]
    fn test_no_project_no_selectors() {
        assert_eq!(
            SelectorVisibility::for_project(None),
            SelectorVisibility {
                blocks: false,
                houses: false
            }
        );
    }

    #[test]
    fn test_filter_projects_case_insensitive() {
        let projects = vec![
            Project::new(1, "Palm Residency").with_location("Lahore"),
            Project::new(2, "Ocean Towers").with_location("Karachi"),
        ];
        let hits = filter_projects(&projects, "PALM");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProjectId(1));

        assert_eq!(filter_projects(&projects, "karachi").len(), 1);
        assert_eq!(filter_projects(&projects, "  ").len(), 2);
        assert!(filter_projects(&projects, "zzz").is_empty());
    }

    #[test]
    fn test_available_units_by_floor() {
        let s = structure();
        let ids: Vec<_> = available_units(&s, Some(BlockId(1)), Some(FloorId(11)))
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![UnitId(1)]);
    }

    #[test]
    fn test_available_units_whole_block() {
        let s = structure();
        let ids: Vec<_> = available_units(&s, Some(BlockId(1)), None)
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![UnitId(1), UnitId(3)]);
        assert!(available_units(&s, None, None).is_empty());
        assert!(available_units(&s, Some(BlockId(99)), None).is_empty());
    }

    #[test]
    fn test_available_houses_requires_flag() {
        let s = structure();
        let with_houses = Project::new(1, "Mixed").with_blocks().with_houses();
        let without = Project::new(1, "Mixed").with_blocks();
        assert_eq!(available_houses(&s, &with_houses).len(), 1);
        assert!(available_houses(&s, &without).is_empty());
    }

    #[test]
    fn test_blocks_ignored_for_other_project() {
        let other = Project::new(2, "Elsewhere").with_blocks();
        assert!(blocks_for_project(&structure(), &other).is_empty());
        assert_eq!(floors_for_block(&structure(), BlockId(1)).len(), 2);
    }
}
