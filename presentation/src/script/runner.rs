//! Wizard script runner
//!
//! Opens a wizard session, resolves each named record through the backend
//! and applies the script step by step, calling `next` after every step
//! exactly as a user clicking through the wizard would. The first step that
//! refuses to advance stops the run with its field errors.

use super::error::ScriptError;
use super::model::{ScriptTerms, WizardKind, WizardScript};
use estatedesk_application::{
    CatalogUseCase, Notifier, PropertyActions, SessionError, Submission, SubmissionReceipt,
    SubmitError, SubmitWizardUseCase, WizardSession,
};
use estatedesk_domain::{
    BlockId, Buyer, BuyerId, ContractField, ContractForm, FloorId, House, Money,
    OfferLetterField, OfferLetterForm, PaymentPlanTemplate, PaymentSchedule, Project,
    PropertyArity, PropertyForm, PropertySaleField, PropertySaleForm, StepStatus,
    TenantAssignmentField, TenantAssignmentForm, Unit, Wizard, WizardError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Field constructors for the project and property steps every wizard shares
trait ScriptedForm: PropertyForm {
    const ARITY: PropertyArity;

    fn project_field(project: Project) -> Self::Field;
    fn block_field(block: Option<BlockId>) -> Self::Field;
    fn floor_field(floor: Option<FloorId>) -> Self::Field;
    fn unit_field(unit: Unit) -> Self::Field;
    fn house_field(house: House) -> Self::Field;
}

/// Field constructors for wizards with a payment plan
trait PlannedForm: ScriptedForm {
    fn template(template: PaymentPlanTemplate) -> Self::Field;
    fn installments(count: u32) -> Self::Field;
    fn down_payment(raw: String) -> Self::Field;
}

impl ScriptedForm for PropertySaleForm {
    const ARITY: PropertyArity = PropertyArity::AtLeastOne;

    fn project_field(project: Project) -> PropertySaleField {
        PropertySaleField::Project(project)
    }
    fn block_field(block: Option<BlockId>) -> PropertySaleField {
        PropertySaleField::Block(block)
    }
    fn floor_field(floor: Option<FloorId>) -> PropertySaleField {
        PropertySaleField::Floor(floor)
    }
    fn unit_field(unit: Unit) -> PropertySaleField {
        PropertySaleField::AddUnit(unit)
    }
    fn house_field(house: House) -> PropertySaleField {
        PropertySaleField::AddHouse(house)
    }
}

impl PlannedForm for PropertySaleForm {
    fn template(template: PaymentPlanTemplate) -> PropertySaleField {
        PropertySaleField::PaymentPlanTemplate(template)
    }
    fn installments(count: u32) -> PropertySaleField {
        PropertySaleField::InstallmentCount(count)
    }
    fn down_payment(raw: String) -> PropertySaleField {
        PropertySaleField::DownPaymentPercentage(raw)
    }
}

impl ScriptedForm for ContractForm {
    const ARITY: PropertyArity = PropertyArity::ExactlyOne;

    fn project_field(project: Project) -> ContractField {
        ContractField::Project(project)
    }
    fn block_field(block: Option<BlockId>) -> ContractField {
        ContractField::Block(block)
    }
    fn floor_field(floor: Option<FloorId>) -> ContractField {
        ContractField::Floor(floor)
    }
    fn unit_field(unit: Unit) -> ContractField {
        ContractField::Unit(unit)
    }
    fn house_field(house: House) -> ContractField {
        ContractField::House(house)
    }
}

impl PlannedForm for ContractForm {
    fn template(template: PaymentPlanTemplate) -> ContractField {
        ContractField::PaymentPlanTemplate(template)
    }
    fn installments(count: u32) -> ContractField {
        ContractField::InstallmentCount(count)
    }
    fn down_payment(raw: String) -> ContractField {
        ContractField::DownPaymentPercentage(raw)
    }
}

impl ScriptedForm for OfferLetterForm {
    const ARITY: PropertyArity = PropertyArity::AtLeastOne;

    fn project_field(project: Project) -> OfferLetterField {
        OfferLetterField::Project(project)
    }
    fn block_field(block: Option<BlockId>) -> OfferLetterField {
        OfferLetterField::Block(block)
    }
    fn floor_field(floor: Option<FloorId>) -> OfferLetterField {
        OfferLetterField::Floor(floor)
    }
    fn unit_field(unit: Unit) -> OfferLetterField {
        OfferLetterField::AddUnit(unit)
    }
    fn house_field(house: House) -> OfferLetterField {
        OfferLetterField::AddHouse(house)
    }
}

impl PlannedForm for OfferLetterForm {
    fn template(template: PaymentPlanTemplate) -> OfferLetterField {
        OfferLetterField::PaymentPlanTemplate(template)
    }
    fn installments(count: u32) -> OfferLetterField {
        OfferLetterField::InstallmentCount(count)
    }
    fn down_payment(raw: String) -> OfferLetterField {
        OfferLetterField::DownPaymentPercentage(raw)
    }
}

impl ScriptedForm for TenantAssignmentForm {
    const ARITY: PropertyArity = PropertyArity::ExactlyOne;

    fn project_field(project: Project) -> TenantAssignmentField {
        TenantAssignmentField::Project(project)
    }
    fn block_field(block: Option<BlockId>) -> TenantAssignmentField {
        TenantAssignmentField::Block(block)
    }
    fn floor_field(floor: Option<FloorId>) -> TenantAssignmentField {
        TenantAssignmentField::Floor(floor)
    }
    fn unit_field(unit: Unit) -> TenantAssignmentField {
        TenantAssignmentField::Unit(unit)
    }
    fn house_field(house: House) -> TenantAssignmentField {
        TenantAssignmentField::House(house)
    }
}

/// A wizard walked to its final step, ready to submit
#[derive(Debug)]
pub enum PreparedWizard {
    PropertySale(Wizard<PropertySaleForm>),
    Contract(Wizard<ContractForm>),
    OfferLetter(Wizard<OfferLetterForm>),
    TenantAssignment(Wizard<TenantAssignmentForm>),
}

impl PreparedWizard {
    pub fn name(&self) -> &'static str {
        match self {
            PreparedWizard::PropertySale(w) => w.name(),
            PreparedWizard::Contract(w) => w.name(),
            PreparedWizard::OfferLetter(w) => w.name(),
            PreparedWizard::TenantAssignment(w) => w.name(),
        }
    }

    pub fn progress(&self) -> Vec<StepStatus> {
        match self {
            PreparedWizard::PropertySale(w) => w.progress(),
            PreparedWizard::Contract(w) => w.progress(),
            PreparedWizard::OfferLetter(w) => w.progress(),
            PreparedWizard::TenantAssignment(w) => w.progress(),
        }
    }

    /// Payload without sending it
    pub fn prepare(&self, submit: &SubmitWizardUseCase) -> Result<Submission, WizardError> {
        match self {
            PreparedWizard::PropertySale(w) => submit.prepare(w),
            PreparedWizard::Contract(w) => submit.prepare(w),
            PreparedWizard::OfferLetter(w) => submit.prepare(w),
            PreparedWizard::TenantAssignment(w) => submit.prepare(w),
        }
    }

    pub async fn submit(
        &self,
        submit: &SubmitWizardUseCase,
        notifier: &dyn Notifier,
    ) -> Result<SubmissionReceipt, SubmitError> {
        match self {
            PreparedWizard::PropertySale(w) => submit.execute(w, notifier).await,
            PreparedWizard::Contract(w) => submit.execute(w, notifier).await,
            PreparedWizard::OfferLetter(w) => submit.execute(w, notifier).await,
            PreparedWizard::TenantAssignment(w) => submit.execute(w, notifier).await,
        }
    }

    /// Payment schedule preview, for wizards that carry a payment plan
    pub fn schedule(&self) -> Option<PaymentSchedule> {
        match self {
            PreparedWizard::PropertySale(w) => w.form().plan.schedule(w.form().list_price()),
            PreparedWizard::Contract(w) => w.form().plan.schedule(w.form().sale_price()),
            PreparedWizard::OfferLetter(w) => w.form().plan.schedule(w.form().offer_price()),
            PreparedWizard::TenantAssignment(_) => None,
        }
    }

    /// Lease length in months and monthly rent, for tenant assignments
    pub fn lease(&self) -> Option<(u32, Money)> {
        match self {
            PreparedWizard::TenantAssignment(w) => {
                Some((w.form().lease_months()?, w.form().monthly_rent?))
            }
            _ => None,
        }
    }
}

/// Drives wizards from scripts
pub struct ScriptRunner {
    actions: Arc<dyn PropertyActions>,
    catalog: CatalogUseCase,
}

impl ScriptRunner {
    pub fn new(actions: Arc<dyn PropertyActions>) -> Self {
        Self {
            catalog: CatalogUseCase::new(actions.clone()),
            actions,
        }
    }

    /// Walk the script's wizard to its final step.
    pub async fn run(&self, script: &WizardScript) -> Result<PreparedWizard, ScriptError> {
        info!("Running {} script for project '{}'", script.wizard, script.project);
        Ok(match script.wizard {
            WizardKind::PropertySale => PreparedWizard::PropertySale(self.property_sale(script).await?),
            WizardKind::Contract => PreparedWizard::Contract(self.contract(script).await?),
            WizardKind::OfferLetter => PreparedWizard::OfferLetter(self.offer_letter(script).await?),
            WizardKind::TenantAssignment => {
                PreparedWizard::TenantAssignment(self.tenant_assignment(script).await?)
            }
        })
    }

    async fn property_sale(
        &self,
        script: &WizardScript,
    ) -> Result<Wizard<PropertySaleForm>, ScriptError> {
        let mut session = self.open::<PropertySaleForm>(script).await?;
        self.pick_properties(&mut session, script).await?;

        let buyers = self.resolve_buyers(script).await?;
        for buyer in &buyers {
            session.set_value(PropertySaleField::AddBuyer(buyer.clone())).await?;
        }
        for (id, percentage) in shares(script, &buyers)? {
            session.set_value(PropertySaleField::BuyerShare(id, percentage)).await?;
        }
        advance(&mut session)?;

        let terms = &script.terms;
        if let Some(name) = &script.agent {
            let agent = self.catalog.find_agent(name).await?;
            session.set_value(PropertySaleField::Agent(Some(agent))).await?;
        }
        if let Some(kind) = terms.commission_type {
            session.set_value(PropertySaleField::CommissionType(kind)).await?;
        }
        if let Some(raw) = &terms.commission {
            session.set_value(PropertySaleField::CommissionValue(raw.clone())).await?;
        }
        if let Some(raw) = &terms.list_price {
            session.set_value(PropertySaleField::ListPrice(raw.clone())).await?;
        }
        apply_plan(&mut session, terms).await?;
        advance(&mut session)?;

        Ok(session.into_wizard())
    }

    async fn contract(&self, script: &WizardScript) -> Result<Wizard<ContractForm>, ScriptError> {
        let mut session = self.open::<ContractForm>(script).await?;
        self.pick_properties(&mut session, script).await?;

        if let Some(name) = &script.owner {
            let owner = self.catalog.find_owner(name).await?;
            session.set_value(ContractField::Owner(Some(owner))).await?;
        }
        let buyers = self.resolve_buyers(script).await?;
        for buyer in &buyers {
            session.set_value(ContractField::AddBuyer(buyer.clone())).await?;
        }
        for (id, percentage) in shares(script, &buyers)? {
            session.set_value(ContractField::BuyerShare(id, percentage)).await?;
        }
        advance(&mut session)?;

        let terms = &script.terms;
        if let Some(raw) = &terms.contract_date {
            session.set_value(ContractField::ContractDate(raw.clone())).await?;
        }
        if let Some(raw) = &terms.sale_price {
            session.set_value(ContractField::SalePrice(raw.clone())).await?;
        }
        apply_plan(&mut session, terms).await?;
        advance(&mut session)?;

        Ok(session.into_wizard())
    }

    async fn offer_letter(
        &self,
        script: &WizardScript,
    ) -> Result<Wizard<OfferLetterForm>, ScriptError> {
        let mut session = self.open::<OfferLetterForm>(script).await?;
        self.pick_properties(&mut session, script).await?;

        if !script.shares.is_empty() {
            warn!("Offer letters do not split ownership; ignoring [shares]");
        }
        for buyer in self.resolve_buyers(script).await? {
            session.set_value(OfferLetterField::AddBuyer(buyer)).await?;
        }
        advance(&mut session)?;

        let terms = &script.terms;
        if let Some(raw) = &terms.offer_price {
            session.set_value(OfferLetterField::OfferPrice(raw.clone())).await?;
        }
        apply_plan(&mut session, terms).await?;
        if let Some(raw) = &terms.issue_date {
            session.set_value(OfferLetterField::IssueDate(raw.clone())).await?;
        }
        if let Some(raw) = &terms.valid_until {
            session.set_value(OfferLetterField::ValidUntil(raw.clone())).await?;
        }
        if let Some(notes) = &terms.notes {
            session.set_value(OfferLetterField::Notes(notes.clone())).await?;
        }
        advance(&mut session)?;

        Ok(session.into_wizard())
    }

    async fn tenant_assignment(
        &self,
        script: &WizardScript,
    ) -> Result<Wizard<TenantAssignmentForm>, ScriptError> {
        let mut session = self.open::<TenantAssignmentForm>(script).await?;
        self.pick_properties(&mut session, script).await?;

        let tenants = self.resolve_buyers(script).await?;
        for tenant in &tenants {
            session.set_value(TenantAssignmentField::AddTenant(tenant.clone())).await?;
        }
        let terms = &script.terms;
        if let Some(email) = &terms.primary_tenant {
            let id = party_id(&tenants, email)?;
            session.set_value(TenantAssignmentField::PrimaryTenant(id)).await?;
        }
        advance(&mut session)?;

        if let Some(raw) = &terms.lease_start {
            session.set_value(TenantAssignmentField::LeaseStart(raw.clone())).await?;
        }
        if let Some(raw) = &terms.lease_end {
            session.set_value(TenantAssignmentField::LeaseEnd(raw.clone())).await?;
        }
        if let Some(raw) = &terms.monthly_rent {
            session.set_value(TenantAssignmentField::MonthlyRent(raw.clone())).await?;
        }
        if let Some(raw) = &terms.security_deposit {
            session.set_value(TenantAssignmentField::SecurityDeposit(raw.clone())).await?;
        }
        if let Some(day) = terms.rent_due_day {
            session.set_value(TenantAssignmentField::RentDueDay(day)).await?;
        }
        advance(&mut session)?;

        Ok(session.into_wizard())
    }

    /// Open a session and complete the project step
    async fn open<F: ScriptedForm>(
        &self,
        script: &WizardScript,
    ) -> Result<WizardSession<F>, ScriptError> {
        let mut session = WizardSession::<F>::new(self.actions.clone())?;
        let project = self.catalog.find_project(&script.project).await?;
        debug!("Resolved project '{}' to #{}", script.project, project.id);
        session.set_value(F::project_field(project)).await?;
        advance(&mut session)?;
        Ok(session)
    }

    /// Set the block/floor cursor, add the named units and houses, then advance
    async fn pick_properties<F: ScriptedForm>(
        &self,
        session: &mut WizardSession<F>,
        script: &WizardScript,
    ) -> Result<(), ScriptError> {
        let count = script.property_count();
        if F::ARITY == PropertyArity::ExactlyOne && count > 1 {
            return Err(ScriptError::TooManyProperties {
                wizard: F::NAME,
                count,
            });
        }

        if let Some(name) = &script.block {
            let block = session
                .blocks()
                .iter()
                .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
                .map(|b| b.id)
                .ok_or_else(|| unknown("block", name))?;
            session.set_value(F::block_field(Some(block))).await?;
        }
        if let Some(name) = &script.floor {
            let floor = session
                .floors()
                .iter()
                .find(|f| f.name.eq_ignore_ascii_case(name.trim()))
                .map(|f| f.id)
                .ok_or_else(|| unknown("floor", name))?;
            session.set_value(F::floor_field(Some(floor))).await?;
        }

        for number in &script.units {
            let unit = session
                .structure()
                .and_then(|s| s.unit_by_number(number.trim()))
                .cloned()
                .ok_or_else(|| unknown("unit", number))?;
            session.set_value(F::unit_field(unit)).await?;
        }
        for number in &script.houses {
            let house = session
                .structure()
                .and_then(|s| s.house_by_number(number.trim()))
                .cloned()
                .ok_or_else(|| unknown("house", number))?;
            session.set_value(F::house_field(house)).await?;
        }

        advance(session)
    }

    async fn resolve_buyers(&self, script: &WizardScript) -> Result<Vec<Buyer>, ScriptError> {
        let mut buyers = Vec::with_capacity(script.buyers.len());
        for email in &script.buyers {
            buyers.push(self.catalog.find_buyer(email).await?);
        }
        Ok(buyers)
    }
}

/// Apply the template first so explicit counts and percentages override it
async fn apply_plan<F: PlannedForm>(
    session: &mut WizardSession<F>,
    terms: &ScriptTerms,
) -> Result<(), ScriptError> {
    if let Some(name) = &terms.template {
        let wanted = name.trim().to_lowercase();
        let template = session
            .templates()
            .await?
            .iter()
            .find(|t| t.name.to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| ScriptError::UnknownTemplate(name.clone()))?;
        session.set_value(F::template(template)).await?;
    }
    if let Some(count) = terms.installments {
        session.set_value(F::installments(count)).await?;
    }
    if let Some(raw) = &terms.down_payment {
        session.set_value(F::down_payment(raw.clone())).await?;
    }
    Ok(())
}

fn advance<F: PropertyForm>(session: &mut WizardSession<F>) -> Result<(), ScriptError> {
    match session.next() {
        Ok(step) => {
            debug!("{} advanced to step {}", F::NAME, step);
            Ok(())
        }
        Err(WizardError::StepIncomplete {
            step,
            title,
            errors,
        }) => Err(ScriptError::Blocked {
            step,
            title,
            errors,
        }),
        Err(e) => Err(SessionError::from(e).into()),
    }
}

fn shares(script: &WizardScript, buyers: &[Buyer]) -> Result<Vec<(BuyerId, u32)>, ScriptError> {
    script
        .shares
        .iter()
        .map(|(email, percentage)| Ok((party_id(buyers, email)?, *percentage)))
        .collect()
}

fn party_id(parties: &[Buyer], email: &str) -> Result<BuyerId, ScriptError> {
    parties
        .iter()
        .find(|b| b.email.eq_ignore_ascii_case(email.trim()))
        .map(|b| b.id)
        .ok_or_else(|| ScriptError::UnknownParty(email.to_string()))
}

fn unknown(kind: &'static str, name: &str) -> ScriptError {
    ScriptError::UnknownProperty {
        kind,
        name: name.to_string(),
    }
}
