//! Project and property selection shared by every wizard

use crate::core::ids::{BlockId, FloorId, HouseId, UnitId};
use crate::core::money::Money;
use crate::property::entities::{House, Project, PropertyRef, Unit};
use crate::property::views::SelectorVisibility;
use crate::wizard::form::FieldError;
use crate::wizard::selection::SelectionList;

/// How many properties a wizard accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyArity {
    AtLeastOne,
    ExactlyOne,
}

/// Selected project, block/floor cursor, and selected units and houses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPicker {
    project: Option<Project>,
    block: Option<BlockId>,
    floor: Option<FloorId>,
    units: SelectionList<Unit>,
    houses: SelectionList<House>,
}

impl PropertyPicker {
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    pub fn floor(&self) -> Option<FloorId> {
        self.floor
    }

    pub fn units(&self) -> &SelectionList<Unit> {
        &self.units
    }

    pub fn houses(&self) -> &SelectionList<House> {
        &self.houses
    }

    pub fn visibility(&self) -> SelectorVisibility {
        SelectorVisibility::for_project(self.project.as_ref())
    }

    /// Select a project. Switching to a different project drops every
    /// selection made against the old project's structure.
    pub fn select_project(&mut self, project: Project) {
        let changed = self.project.as_ref().is_none_or(|p| p.id != project.id);
        if changed {
            self.block = None;
            self.floor = None;
            self.units.clear();
            self.houses.clear();
        }
        self.project = Some(project);
    }

    pub fn select_block(&mut self, block: Option<BlockId>) -> Result<(), FieldError> {
        if block.is_some() && !self.visibility().blocks {
            return Err(FieldError::new("block", "is not available for this project"));
        }
        if self.block != block {
            self.floor = None;
        }
        self.block = block;
        Ok(())
    }

    pub fn select_floor(&mut self, floor: Option<FloorId>) -> Result<(), FieldError> {
        if floor.is_some() && self.block.is_none() {
            return Err(FieldError::new("floor", "requires a block"));
        }
        self.floor = floor;
        Ok(())
    }

    pub fn add_unit(&mut self, unit: Unit, arity: PropertyArity) -> Result<(), FieldError> {
        if !self.visibility().blocks {
            return Err(FieldError::new("units", "project has no blocks"));
        }
        if !unit.status.is_selectable() {
            return Err(FieldError::new(
                "units",
                format!("{} is {}", unit.number, unit.status),
            ));
        }
        if arity == PropertyArity::ExactlyOne {
            self.units.clear();
            self.houses.clear();
        }
        self.units.add(unit);
        Ok(())
    }

    pub fn remove_unit(&mut self, id: UnitId) -> bool {
        self.units.remove(id)
    }

    pub fn add_house(&mut self, house: House, arity: PropertyArity) -> Result<(), FieldError> {
        if !self.visibility().houses {
            return Err(FieldError::new("houses", "project has no houses"));
        }
        if !house.status.is_selectable() {
            return Err(FieldError::new(
                "houses",
                format!("{} is {}", house.number, house.status),
            ));
        }
        if arity == PropertyArity::ExactlyOne {
            self.units.clear();
            self.houses.clear();
        }
        self.houses.add(house);
        Ok(())
    }

    pub fn remove_house(&mut self, id: HouseId) -> bool {
        self.houses.remove(id)
    }

    /// Units first, then houses, each in selection order
    pub fn selected(&self) -> Vec<PropertyRef> {
        self.units
            .keys()
            .into_iter()
            .map(PropertyRef::Unit)
            .chain(self.houses.keys().into_iter().map(PropertyRef::House))
            .collect()
    }

    pub fn selection_count(&self) -> usize {
        self.units.len() + self.houses.len()
    }

    /// Sum of the listed prices of every selected property
    pub fn selected_price(&self) -> Money {
        self.units
            .items()
            .iter()
            .map(|u| u.price)
            .chain(self.houses.items().iter().map(|h| h.price))
            .sum()
    }

    pub fn project_issues(&self) -> Vec<FieldError> {
        if self.project.is_some() {
            Vec::new()
        } else {
            vec![FieldError::required("project")]
        }
    }

    pub fn property_issues(&self, arity: PropertyArity) -> Vec<FieldError> {
        match (arity, self.selection_count()) {
            (_, 0) => vec![FieldError::new("properties", "select at least one unit or house")],
            (PropertyArity::ExactlyOne, n) if n > 1 => {
                vec![FieldError::new("properties", "select exactly one unit or house")]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::entities::PropertyStatus;

    fn unit(id: u64, status: PropertyStatus) -> Unit {
        Unit {
            id: UnitId(id),
            number: format!("A-{}", id),
            unit_type: String::new(),
            size: 0.0,
            price: Money::from_units(1000 * id as i64),
            status,
        }
    }

    fn house(id: u64) -> House {
        House {
            id: HouseId(id),
            number: format!("H-{}", id),
            house_type: String::new(),
            size: 0.0,
            price: Money::from_units(500),
            status: PropertyStatus::Available,
        }
    }

    fn block_project() -> Project {
        Project::new(1, "Towers").with_blocks()
    }

    #[test]
    fn test_changing_project_clears_selection() {
        let mut picker = PropertyPicker::default();
        picker.select_project(block_project());
        picker.select_block(Some(BlockId(1))).unwrap();
        picker
            .add_unit(unit(1, PropertyStatus::Available), PropertyArity::AtLeastOne)
            .unwrap();

        picker.select_project(block_project());
        assert_eq!(picker.selection_count(), 1, "same project keeps selection");

        picker.select_project(Project::new(2, "Other").with_blocks());
        assert_eq!(picker.selection_count(), 0);
        assert!(picker.block().is_none());
    }

    #[test]
    fn test_unit_requires_blocks_and_availability() {
        let mut picker = PropertyPicker::default();
        picker.select_project(Project::new(1, "Villas").with_houses());
        assert!(picker
            .add_unit(unit(1, PropertyStatus::Available), PropertyArity::AtLeastOne)
            .is_err());
        assert!(picker.select_block(Some(BlockId(1))).is_err());

        picker.select_project(block_project());
        let err = picker
            .add_unit(unit(2, PropertyStatus::Sold), PropertyArity::AtLeastOne)
            .unwrap_err();
        assert_eq!(err.message, "A-2 is sold");
    }

    #[test]
    fn test_exactly_one_replaces_previous_choice() {
        let mut picker = PropertyPicker::default();
        picker.select_project(Project::new(1, "Mixed").with_blocks().with_houses());
        picker
            .add_unit(unit(1, PropertyStatus::Available), PropertyArity::ExactlyOne)
            .unwrap();
        picker.add_house(house(5), PropertyArity::ExactlyOne).unwrap();
        assert_eq!(picker.selected(), vec![PropertyRef::House(HouseId(5))]);
        assert!(picker.property_issues(PropertyArity::ExactlyOne).is_empty());
    }

    #[test]
    fn test_property_issues() {
        let mut picker = PropertyPicker::default();
        picker.select_project(block_project());
        assert_eq!(picker.property_issues(PropertyArity::AtLeastOne).len(), 1);
        picker
            .add_unit(unit(1, PropertyStatus::Available), PropertyArity::AtLeastOne)
            .unwrap();
        picker
            .add_unit(unit(2, PropertyStatus::Available), PropertyArity::AtLeastOne)
            .unwrap();
        assert!(picker.property_issues(PropertyArity::AtLeastOne).is_empty());
        assert_eq!(picker.property_issues(PropertyArity::ExactlyOne).len(), 1);
        assert_eq!(picker.selected_price(), Money::from_units(3000));
    }

    #[test]
    fn test_selected_price_saturates() {
        let mut picker = PropertyPicker::default();
        picker.select_project(block_project());
        for id in 1..=2 {
            let mut huge = unit(id, PropertyStatus::Available);
            huge.price = serde_json::from_str("6e16").unwrap();
            picker.add_unit(huge, PropertyArity::AtLeastOne).unwrap();
        }
        assert_eq!(picker.selected_price(), Money::MAX);
    }

    #[test]
    fn test_floor_requires_block() {
        let mut picker = PropertyPicker::default();
        picker.select_project(block_project());
        assert!(picker.select_floor(Some(FloorId(3))).is_err());
        picker.select_block(Some(BlockId(1))).unwrap();
        picker.select_floor(Some(FloorId(3))).unwrap();
        picker.select_block(Some(BlockId(2))).unwrap();
        assert!(picker.floor().is_none());
    }
}
