//! Domain layer for estatedesk
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Structure
//!
//! A project decomposes into blocks → floors → units, or into houses. Unit
//! and house status is owned by the backend; only `available` properties
//! can be picked.
//!
//! ## Wizard
//!
//! Every deal is entered through a multi-step wizard: a single form object,
//! a declarative list of steps gating forward navigation, and a payload
//! produced only from the final step.
//!
//! - **Property sale**: units/houses × co-owning buyers, agent, payment plan
//! - **Contract**: one property, owner, buyers, contract date, sale price
//! - **Offer letter**: properties, buyers, offer price, validity window
//! - **Tenant assignment**: one property, tenants, lease terms

pub mod commercial;
pub mod core;
pub mod document;
pub mod forms;
pub mod ownership;
pub mod party;
pub mod property;
pub mod wizard;

// Re-export commonly used types
pub use commercial::{
    schedule::{Installment, PaymentSchedule},
    terms::{AgentCommission, CommissionType, PaymentPlanTemplate, PaymentPlanTerms, PlanFrequency},
};
pub use core::{
    error::DomainError,
    ids::{
        AgentId, BlockId, BuyerId, DocumentId, FloorId, HouseId, OwnerId, ProjectId, TemplateId,
        UnitId,
    },
    money::Money,
    percentage::Percentage,
};
pub use document::entities::{DocumentFilter, DocumentKind, DocumentRecord, DocumentStatus};
pub use forms::{
    PropertyForm,
    contract::{ContractField, ContractForm, ContractPayload},
    offer_letter::{OfferLetterField, OfferLetterForm, OfferLetterPayload},
    picker::{PropertyArity, PropertyPicker},
    property_sale::{PropertySaleField, PropertySaleForm, PropertySalePayload},
    tenant_assignment::{TenantAssignmentField, TenantAssignmentForm, TenantAssignmentPayload},
};
pub use ownership::{CoOwnership, OwnershipShare, distribute_evenly};
pub use party::entities::{Agent, Buyer, Owner, TenantUser};
pub use property::{
    availability::{AvailabilityMatrix, FloorRow, StatusCounts},
    entities::{
        Block, Floor, House, Project, ProjectStructure, ProjectType, PropertyKind, PropertyRef,
        PropertyStatus, Unit,
    },
    views::{
        SelectorVisibility, available_houses, available_units, blocks_for_project,
        filter_projects, floors_for_block,
    },
};
pub use wizard::{
    engine::{StepDefinition, StepStatus, Wizard, WizardError},
    form::{FieldError, ValidationErrors, WizardForm},
    memo::Memo,
    selection::{Keyed, SelectionList},
    sequencer::StepSequencer,
};
