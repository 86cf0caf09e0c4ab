//! Submit wizard use case.
//!
//! Flattens a finished wizard into its action payload and sends it. The
//! outcome is surfaced exactly once through the [`Notifier`]: the server's
//! message when it sent one, a generic fallback otherwise. Failures are not
//! retried and the wizard is left untouched, still on its final step with
//! every selection intact.

use crate::ports::notifier::Notifier;
use crate::ports::property_actions::{ActionError, PropertyActions, SubmissionReceipt};
use crate::ports::submission_log::{NoSubmissionLogger, SubmissionLogger, SubmissionRecord};
use estatedesk_domain::{
    ContractPayload, OfferLetterPayload, PropertySalePayload, TenantAssignmentPayload, Wizard,
    WizardError, WizardForm,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when submitting a wizard
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("{0}")]
    Wizard(#[from] WizardError),

    #[error("{0}")]
    Action(#[from] ActionError),

    #[error("Could not encode payload: {0}")]
    Encode(String),
}

/// A payload bound for one backend action
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    PropertySale(PropertySalePayload),
    Contract(ContractPayload),
    OfferLetter(OfferLetterPayload),
    TenantAssignment(TenantAssignmentPayload),
}

impl Submission {
    /// Backend action name
    pub fn action(&self) -> &'static str {
        match self {
            Submission::PropertySale(_) => "createPropertySale",
            Submission::Contract(_) => "createContract",
            Submission::OfferLetter(_) => "createOfferLetter",
            Submission::TenantAssignment(_) => "createTenantAssignment",
        }
    }

    /// Human label used in toasts
    pub fn label(&self) -> &'static str {
        match self {
            Submission::PropertySale(_) => "Property sale",
            Submission::Contract(_) => "Contract",
            Submission::OfferLetter(_) => "Offer letter",
            Submission::TenantAssignment(_) => "Tenant assignment",
        }
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Submission::PropertySale(p) => serde_json::to_value(p),
            Submission::Contract(p) => serde_json::to_value(p),
            Submission::OfferLetter(p) => serde_json::to_value(p),
            Submission::TenantAssignment(p) => serde_json::to_value(p),
        }
    }

    async fn send(&self, actions: &dyn PropertyActions) -> Result<SubmissionReceipt, ActionError> {
        match self {
            Submission::PropertySale(p) => actions.create_property_sale(p).await,
            Submission::Contract(p) => actions.create_contract(p).await,
            Submission::OfferLetter(p) => actions.create_offer_letter(p).await,
            Submission::TenantAssignment(p) => actions.create_tenant_assignment(p).await,
        }
    }
}

impl From<PropertySalePayload> for Submission {
    fn from(payload: PropertySalePayload) -> Self {
        Submission::PropertySale(payload)
    }
}

impl From<ContractPayload> for Submission {
    fn from(payload: ContractPayload) -> Self {
        Submission::Contract(payload)
    }
}

impl From<OfferLetterPayload> for Submission {
    fn from(payload: OfferLetterPayload) -> Self {
        Submission::OfferLetter(payload)
    }
}

impl From<TenantAssignmentPayload> for Submission {
    fn from(payload: TenantAssignmentPayload) -> Self {
        Submission::TenantAssignment(payload)
    }
}

/// Use case for sending a finished wizard to the backend
pub struct SubmitWizardUseCase {
    actions: Arc<dyn PropertyActions>,
    logger: Arc<dyn SubmissionLogger>,
}

impl SubmitWizardUseCase {
    pub fn new(actions: Arc<dyn PropertyActions>) -> Self {
        Self {
            actions,
            logger: Arc::new(NoSubmissionLogger),
        }
    }

    /// Create with a submission audit log.
    pub fn with_logger(mut self, logger: Arc<dyn SubmissionLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Build the payload without sending it.
    pub fn prepare<F>(&self, wizard: &Wizard<F>) -> Result<Submission, WizardError>
    where
        F: WizardForm,
        F::Payload: Into<Submission>,
    {
        wizard.submit().map(Into::into)
    }

    pub async fn execute<F>(
        &self,
        wizard: &Wizard<F>,
        notifier: &dyn Notifier,
    ) -> Result<SubmissionReceipt, SubmitError>
    where
        F: WizardForm,
        F::Payload: Into<Submission>,
    {
        let submission = match self.prepare(wizard) {
            Ok(submission) => submission,
            Err(e) => {
                notifier.on_error(&e.to_string());
                return Err(e.into());
            }
        };
        let payload = encoded(submission.to_json(), submission.label(), notifier)?;

        info!("Submitting {} ({})", submission.label(), submission.action());
        notifier.on_request_start(submission.action());
        let result = submission.send(self.actions.as_ref()).await;
        notifier.on_request_end();

        match result {
            Ok(receipt) => {
                let message = receipt
                    .message
                    .clone()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("{} created successfully", submission.label()));
                self.logger.log(SubmissionRecord::new(
                    submission.action(),
                    payload,
                    true,
                    Some(message.clone()),
                ));
                notifier.on_success(&message);
                Ok(receipt)
            }
            Err(error) => {
                warn!("{} failed: {}", submission.action(), error);
                let message = error.server_message().map(str::to_string).unwrap_or_else(|| {
                    format!(
                        "Failed to create {}. Please try again.",
                        submission.label().to_lowercase()
                    )
                });
                self.logger.log(SubmissionRecord::new(
                    submission.action(),
                    payload,
                    false,
                    Some(error.to_string()),
                ));
                notifier.on_error(&message);
                Err(error.into())
            }
        }
    }
}

/// Unwrap an encoded payload, toasting the generic failure when encoding failed
fn encoded(
    payload: Result<Value, serde_json::Error>,
    label: &str,
    notifier: &dyn Notifier,
) -> Result<Value, SubmitError> {
    payload.map_err(|e| {
        warn!("Could not encode {} payload: {}", label, e);
        notifier.on_error(&format!(
            "Failed to create {}. Please try again.",
            label.to_lowercase()
        ));
        SubmitError::Encode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::mock_actions::{MockActions, RecordingNotifier};
    use estatedesk_domain::{
        Buyer, House, HouseId, Money, OfferLetterField, OfferLetterForm, Project, PropertyStatus,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryLog {
        records: Mutex<Vec<SubmissionRecord>>,
    }

    impl SubmissionLogger for MemoryLog {
        fn log(&self, record: SubmissionRecord) {
            self.records.lock().unwrap().push(record);
        }
    }

    fn finished_offer() -> Wizard<OfferLetterForm> {
        let mut wizard = Wizard::<OfferLetterForm>::new().unwrap();
        wizard
            .set_value(OfferLetterField::Project(Project::new(3, "Villas").with_houses()))
            .unwrap();
        wizard.next().unwrap();
        wizard
            .set_value(OfferLetterField::AddHouse(House {
                id: HouseId(4),
                number: "H-4".to_string(),
                house_type: String::new(),
                size: 0.0,
                price: Money::from_units(250_000),
                status: PropertyStatus::Available,
            }))
            .unwrap();
        wizard.next().unwrap();
        wizard
            .set_value(OfferLetterField::AddBuyer(Buyer::new(1, "Ana", "ana@x.test")))
            .unwrap();
        wizard.next().unwrap();
        for field in [
            OfferLetterField::DownPaymentPercentage("100".into()),
            OfferLetterField::InstallmentCount(0),
            OfferLetterField::IssueDate("2026-10-16".into()),
            OfferLetterField::ValidUntil("2026-10-30".into()),
        ] {
            wizard.set_value(field).unwrap();
        }
        wizard.next().unwrap();
        wizard
    }

    #[tokio::test]
    async fn test_success_toast_uses_server_message() {
        let actions = Arc::new(MockActions::default().with_mutation_result(Ok(
            SubmissionReceipt::new(Some(55), Some("Offer letter OL-55 issued".to_string())),
        )));
        let log = Arc::new(MemoryLog::default());
        let use_case = SubmitWizardUseCase::new(actions.clone()).with_logger(log.clone());
        let notifier = RecordingNotifier::default();

        let receipt = use_case.execute(&finished_offer(), &notifier).await.unwrap();
        assert_eq!(receipt.id, Some(55));
        assert_eq!(notifier.events(), vec!["success:Offer letter OL-55 issued"]);
        assert_eq!(actions.calls(), vec!["create_offer_letter:3"]);

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "createOfferLetter");
        assert_eq!(records[0].payload["house_ids"], serde_json::json!([4]));
        assert!(records[0].success);
    }

    #[tokio::test]
    async fn test_failure_surfaces_once_without_retry() {
        let actions = Arc::new(
            MockActions::default()
                .with_mutation_result(Err(ActionError::Rejected(Some("House H-4 is booked".into())))),
        );
        let use_case = SubmitWizardUseCase::new(actions.clone());
        let notifier = RecordingNotifier::default();
        let wizard = finished_offer();

        let err = use_case.execute(&wizard, &notifier).await.unwrap_err();
        assert!(matches!(err, SubmitError::Action(ActionError::Rejected(_))));
        assert_eq!(notifier.events(), vec!["error:House H-4 is booked"]);
        assert_eq!(actions.count("create_offer_letter"), 1);
        assert!(wizard.is_terminal());
        assert_eq!(wizard.form().picker.houses().len(), 1);
    }

    #[tokio::test]
    async fn test_generic_fallback_message() {
        let actions = Arc::new(
            MockActions::default().with_mutation_result(Err(ActionError::Transport("reset".into()))),
        );
        let use_case = SubmitWizardUseCase::new(actions);
        let notifier = RecordingNotifier::default();
        use_case.execute(&finished_offer(), &notifier).await.unwrap_err();
        assert_eq!(
            notifier.events(),
            vec!["error:Failed to create offer letter. Please try again."]
        );
    }

    #[tokio::test]
    async fn test_not_sent_before_final_step() {
        let actions = Arc::new(MockActions::default());
        let use_case = SubmitWizardUseCase::new(actions.clone());
        let mut wizard = finished_offer();
        wizard.previous();

        let err = use_case
            .execute(&wizard, &RecordingNotifier::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Wizard(WizardError::NotAtFinalStep { current: 4, total: 5 })
        ));
        assert!(actions.calls().is_empty());
    }

    #[test]
    fn test_encode_failure_is_toasted() {
        let notifier = RecordingNotifier::default();
        let broken = serde_json::from_str::<Value>("{").map(|_| Value::Null);

        let err = encoded(broken, "Contract", &notifier).unwrap_err();
        assert!(matches!(err, SubmitError::Encode(_)));
        assert_eq!(
            notifier.events(),
            vec!["error:Failed to create contract. Please try again."]
        );
    }

    #[test]
    fn test_prepare_names_action() {
        let use_case = SubmitWizardUseCase::new(Arc::new(MockActions::default()));
        let submission = use_case.prepare(&finished_offer()).unwrap();
        assert_eq!(submission.action(), "createOfferLetter");
        assert_eq!(submission.to_json().unwrap()["offer_price"], serde_json::json!(250000.0));
    }
}
