//! Wizard session use case.
//!
//! Wraps a domain [`Wizard`] with the data it needs from the backend. The
//! project structure is fetched only once a project is selected and again
//! only when the selected project id changes. Unit and house listings are
//! memoized on the project and block/floor cursor.

use crate::ports::property_actions::{ActionError, PropertyActions};
use estatedesk_domain::{
    Block, BlockId, DomainError, FieldError, Floor, FloorId, House, Memo, PaymentPlanTemplate,
    ProjectId, ProjectStructure, PropertyForm, Unit, Wizard, WizardError, available_houses,
    available_units, blocks_for_project, floors_for_block,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while driving a wizard
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{0}")]
    Field(#[from] FieldError),

    #[error("{0}")]
    Wizard(#[from] WizardError),

    #[error("{0}")]
    Action(#[from] ActionError),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

type UnitKey = (ProjectId, Option<BlockId>, Option<FloorId>);

/// One open wizard plus the backend data its steps read
pub struct WizardSession<F: PropertyForm> {
    actions: Arc<dyn PropertyActions>,
    wizard: Wizard<F>,
    structure: Option<ProjectStructure>,
    templates: Option<Vec<PaymentPlanTemplate>>,
    units_view: Memo<UnitKey, Vec<Unit>>,
    houses_view: Memo<ProjectId, Vec<House>>,
}

impl<F: PropertyForm> WizardSession<F> {
    pub fn new(actions: Arc<dyn PropertyActions>) -> Result<Self, SessionError> {
        info!("Opening {} wizard", F::NAME);
        Ok(Self {
            actions,
            wizard: Wizard::new()?,
            structure: None,
            templates: None,
            units_view: Memo::new(),
            houses_view: Memo::new(),
        })
    }

    pub fn wizard(&self) -> &Wizard<F> {
        &self.wizard
    }

    pub fn into_wizard(self) -> Wizard<F> {
        self.wizard
    }

    /// Apply a field update, then load the structure if the project changed.
    pub async fn set_value(&mut self, field: F::Field) -> Result<(), SessionError> {
        debug!("{} step {}: {:?}", F::NAME, self.wizard.current_step(), field);
        self.wizard.set_value(field)?;
        self.sync_structure().await?;
        Ok(())
    }

    /// Fetch the selected project's structure unless it is already loaded.
    ///
    /// Returns `true` when a request was made.
    pub async fn sync_structure(&mut self) -> Result<bool, ActionError> {
        let Some(project_id) = self.wizard.form().picker().project().map(|p| p.id) else {
            self.structure = None;
            return Ok(false);
        };
        if self
            .structure
            .as_ref()
            .is_some_and(|s| s.project_id == project_id)
        {
            return Ok(false);
        }

        self.structure = None;
        self.units_view.invalidate();
        self.houses_view.invalidate();
        let structure = self.actions.get_project_structure(project_id).await?;
        debug!(
            "Loaded structure of project {}: {} blocks, {} houses",
            project_id,
            structure.blocks.len(),
            structure.houses.len()
        );
        self.structure = Some(structure);
        Ok(true)
    }

    pub fn structure(&self) -> Option<&ProjectStructure> {
        self.structure.as_ref()
    }

    /// Blocks of the selected project
    pub fn blocks(&self) -> &[Block] {
        match (self.structure.as_ref(), self.wizard.form().picker().project()) {
            (Some(structure), Some(project)) => blocks_for_project(structure, project),
            _ => &[],
        }
    }

    /// Floors of the selected block
    pub fn floors(&self) -> &[Floor] {
        match (self.structure.as_ref(), self.wizard.form().picker().block()) {
            (Some(structure), Some(block)) => floors_for_block(structure, block),
            _ => &[],
        }
    }

    /// Selectable units under the current block/floor cursor
    pub fn available_units(&mut self) -> &[Unit] {
        let Some(structure) = self.structure.as_ref() else {
            return &[];
        };
        let picker = self.wizard.form().picker();
        let (block, floor) = (picker.block(), picker.floor());
        self.units_view
            .get_or_compute((structure.project_id, block, floor), || {
                available_units(structure, block, floor)
            })
    }

    /// Selectable houses of the selected project
    pub fn available_houses(&mut self) -> &[House] {
        let (Some(structure), Some(project)) =
            (self.structure.as_ref(), self.wizard.form().picker().project())
        else {
            return &[];
        };
        self.houses_view
            .get_or_compute(project.id, || available_houses(structure, project))
    }

    /// Payment plan templates, fetched on first use
    pub async fn templates(&mut self) -> Result<&[PaymentPlanTemplate], ActionError> {
        if self.templates.is_none() {
            let templates = self.actions.fetch_payment_plan_templates().await?;
            debug!("Loaded {} payment plan templates", templates.len());
            self.templates = Some(templates);
        }
        Ok(self.templates.as_deref().unwrap_or_default())
    }

    pub fn next(&mut self) -> Result<usize, WizardError> {
        self.wizard.next()
    }

    pub fn previous(&mut self) -> bool {
        self.wizard.previous()
    }

    pub fn go_to(&mut self, step: usize) -> Result<usize, WizardError> {
        self.wizard.go_to(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::mock_actions::MockActions;
    use estatedesk_domain::{
        HouseId, Money, Percentage, PlanFrequency, Project, PropertySaleField, PropertySaleForm,
        PropertyStatus, TemplateId, UnitId,
    };

    fn unit(id: u64, status: PropertyStatus) -> Unit {
        Unit {
            id: UnitId(id),
            number: format!("A-{}", id),
            unit_type: String::new(),
            size: 0.0,
            price: Money::from_units(100),
            status,
        }
    }

    fn towers() -> Project {
        Project::new(1, "Towers").with_blocks()
    }

    fn mock() -> Arc<MockActions> {
        let towers_structure = ProjectStructure {
            project_id: ProjectId(1),
            blocks: vec![Block {
                id: BlockId(10),
                name: "A".to_string(),
                floors: vec![
                    Floor {
                        id: FloorId(100),
                        name: "Ground".to_string(),
                        units: vec![unit(1, PropertyStatus::Available), unit(2, PropertyStatus::Sold)],
                    },
                    Floor {
                        id: FloorId(101),
                        name: "First".to_string(),
                        units: vec![unit(3, PropertyStatus::Available)],
                    },
                ],
            }],
            houses: Vec::new(),
        };
        let villas_structure = ProjectStructure {
            project_id: ProjectId(2),
            blocks: Vec::new(),
            houses: vec![House {
                id: HouseId(7),
                number: "H-7".to_string(),
                house_type: String::new(),
                size: 0.0,
                price: Money::from_units(500),
                status: PropertyStatus::Available,
            }],
        };
        Arc::new(MockActions {
            structures: [(ProjectId(1), towers_structure), (ProjectId(2), villas_structure)]
                .into_iter()
                .collect(),
            templates: vec![PaymentPlanTemplate {
                id: TemplateId(1),
                name: "Monthly 12".to_string(),
                installment_count: 12,
                down_payment_percentage: Percentage::from_whole(10).unwrap_or_default(),
                frequency: PlanFrequency::Monthly,
            }],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_structure_fetched_only_on_project_change() {
        let actions = mock();
        let mut session = WizardSession::<PropertySaleForm>::new(actions.clone()).unwrap();
        assert!(session.blocks().is_empty());
        assert_eq!(actions.count("get_project_structure"), 0);

        session.set_value(PropertySaleField::Project(towers())).await.unwrap();
        session.set_value(PropertySaleField::Project(towers())).await.unwrap();
        session.set_value(PropertySaleField::Block(Some(BlockId(10)))).await.unwrap();
        assert_eq!(actions.count("get_project_structure"), 1);
        assert_eq!(session.blocks().len(), 1);
        assert_eq!(session.floors().len(), 2);

        session
            .set_value(PropertySaleField::Project(Project::new(2, "Villas").with_houses()))
            .await
            .unwrap();
        assert_eq!(actions.count("get_project_structure"), 2);
        assert!(session.blocks().is_empty());
        assert_eq!(session.available_houses().len(), 1);
    }

    #[tokio::test]
    async fn test_unit_listing_memoized_on_cursor() {
        let mut session = WizardSession::<PropertySaleForm>::new(mock()).unwrap();
        session.set_value(PropertySaleField::Project(towers())).await.unwrap();
        session.set_value(PropertySaleField::Block(Some(BlockId(10)))).await.unwrap();

        let ids: Vec<_> = session.available_units().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![UnitId(1), UnitId(3)]);
        session.available_units();
        assert_eq!(session.units_view.computations(), 1);

        session.set_value(PropertySaleField::Floor(Some(FloorId(101)))).await.unwrap();
        assert_eq!(session.available_units().len(), 1);
        assert_eq!(session.units_view.computations(), 2);
    }

    #[tokio::test]
    async fn test_failed_structure_fetch_reported() {
        let mut session = WizardSession::<PropertySaleForm>::new(mock()).unwrap();
        let err = session
            .set_value(PropertySaleField::Project(Project::new(9, "Ghost").with_blocks()))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Action(ActionError::NotFound(_))));
        assert!(session.structure().is_none());
        // the selection itself stands
        assert!(session.wizard().form().picker.project().is_some());
    }

    #[tokio::test]
    async fn test_templates_loaded_once() {
        let actions = mock();
        let mut session = WizardSession::<PropertySaleForm>::new(actions.clone()).unwrap();
        assert_eq!(session.templates().await.unwrap().len(), 1);
        session.templates().await.unwrap();
        assert_eq!(actions.count("fetch_payment_plan_templates"), 1);
    }
}
