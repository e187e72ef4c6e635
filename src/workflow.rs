//! Orchestration of the contract-creation flow.
//!
//! Each creation attempt runs a fixed sequence: resolve-or-create the
//! property and seller records, create the folder, link records under
//! folder-family roles, attach contract-specific data, create the contract.
//! Steps run strictly in order with each output feeding the next; any
//! remote failure aborts the remainder without rolling back completed
//! steps. Ledger entries written by completed steps remain, so a retried
//! run skips already-created records. Folder creation is the exception: it
//! has no find-or-create guard, so a retry after a late failure creates a
//! duplicate folder remotely. The first recorded folder keeps winning
//! lookups.

use anyhow::{Context, Result};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bodies::{
    self, ContractBody, ContractQuestions, ContractRecords, RecordBody, TimestampMs,
};
use crate::catalog::PropertyListing;
use crate::client::{NotaryApi, RoleLinks};
use crate::config::BridgeConfig;
use crate::ledger::{AssociationKind, Ledger};

/// Fixed external key for the demo seller contact.
pub const SELLER_EXTERNAL_ID: &str = "external_app_vendeur_1";
/// Fixed external key for the demo visitor contact (viewing slips).
pub const VISITOR_EXTERNAL_ID: &str = "external_app_visiteur_1";
/// Fixed external key for the demo offering party (purchase offers).
pub const OFFERER_EXTERNAL_ID: &str = "external_app_offrant_1";

const ROLE_PROPERTY_SOLD: &str = "BIEN_VENDU";
const ROLE_SELLER: &str = "VENDEUR";
const ROLE_PROPERTY_LEASED: &str = "BIEN_LOUE";
const ROLE_LESSOR: &str = "BAILLEUR";

/// Folder type chosen by the user for one creation flow, together with the
/// contract model to create inside it. Fully consumed by the flow, never
/// persisted.
#[derive(Debug, Clone)]
pub struct ContractSelection {
    pub folder_type_id: String,
    pub contract_model_id: String,
    pub contract_model_label: String,
}

/// Known folder families and the roles they link records under.
///
/// The remote catalog can list more types than these; an unknown type id
/// parses to `None` and the flow links no records for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderFamily {
    SaleExisting,
    SaleLifeAnnuity,
    SaleProfessional,
    Rental,
    RentalCommercial,
}

impl FolderFamily {
    pub fn from_type_id(id: &str) -> Option<Self> {
        match id {
            "OPERATION__IMMOBILIER__VENTE_ANCIEN" => Some(FolderFamily::SaleExisting),
            "OPERATION__IMMOBILIER__VENTE_VIAGER" => Some(FolderFamily::SaleLifeAnnuity),
            "OPERATION__IMMOBILIER__VENTE_BIEN_PROFESSIONNEL" => {
                Some(FolderFamily::SaleProfessional)
            }
            "OPERATION__IMMOBILIER__LOCATION" => Some(FolderFamily::Rental),
            "OPERATION__IMMOBILIER__LOCATION_COMMERCIAL" => Some(FolderFamily::RentalCommercial),
            _ => None,
        }
    }

    /// Role map attaching the property and primary contact to a folder.
    pub fn role_links(self, property_record_id: i64, contact_record_id: i64) -> RoleLinks {
        let (property_role, contact_role) = match self {
            FolderFamily::SaleExisting
            | FolderFamily::SaleLifeAnnuity
            | FolderFamily::SaleProfessional => (ROLE_PROPERTY_SOLD, ROLE_SELLER),
            FolderFamily::Rental | FolderFamily::RentalCommercial => {
                (ROLE_PROPERTY_LEASED, ROLE_LESSOR)
            }
        };
        let mut roles = RoleLinks::new();
        roles.insert(property_role.to_string(), vec![property_record_id]);
        roles.insert(contact_role.to_string(), vec![contact_record_id]);
        roles
    }
}

/// Contract models that carry model-specific answers and records. Every
/// other model id creates a bare contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractModel {
    ViewingSlip,
    PurchaseOffer,
    Generic,
}

impl ContractModel {
    pub fn from_model_id(id: &str) -> Self {
        match id {
            "IMMOBILIER_VENTE_ANCIEN_BON_VISITE" => ContractModel::ViewingSlip,
            "IMMOBILIER_VENTE_ANCIEN_OFFRE_ACHAT" => ContractModel::PurchaseOffer,
            _ => ContractModel::Generic,
        }
    }
}

/// Explicit workflow state, decoupled from any rendering concern.
/// `Completed` and `Error` return to `Idle` on explicit dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStatus {
    Idle,
    Loading,
    Completed,
    Error,
}

/// What a successful flow hands back to the presentation layer.
#[derive(Debug, Clone)]
pub struct CreationOutcome {
    pub operation_id: i64,
    pub contract_id: i64,
    /// Deep link into the vendor's contract-drafting screen.
    pub contract_link: String,
}

/// Sequences ledger lookups, client calls, and ledger updates for one
/// creation flow at a time. Single logical thread of control: the caller
/// must not start a second flow while one is `Loading`.
pub struct Orchestrator<'a> {
    client: &'a dyn NotaryApi,
    ledger: &'a mut Ledger,
    config: &'a BridgeConfig,
    status: CreationStatus,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        client: &'a dyn NotaryApi,
        ledger: &'a mut Ledger,
        config: &'a BridgeConfig,
    ) -> Self {
        Orchestrator {
            client,
            ledger,
            config,
            status: CreationStatus::Idle,
        }
    }

    pub fn status(&self) -> CreationStatus {
        self.status
    }

    /// Return to `Idle` after a terminal state has been surfaced.
    pub fn dismiss(&mut self) {
        if matches!(self.status, CreationStatus::Completed | CreationStatus::Error) {
            self.status = CreationStatus::Idle;
        }
    }

    /// Run the full creation flow for one listing and selection.
    ///
    /// On failure the flow stops where it failed: records and folders
    /// created by earlier steps stay on the remote service and in the
    /// ledger.
    pub fn run_creation(
        &mut self,
        listing: &PropertyListing,
        selection: &ContractSelection,
    ) -> Result<CreationOutcome> {
        self.status = CreationStatus::Loading;
        tracing::info!(
            listing = %listing.id,
            folder_type = %selection.folder_type_id,
            contract_model = %selection.contract_model_id,
            "contract creation started"
        );
        match self.create_contract_flow(listing, selection) {
            Ok(outcome) => {
                self.status = CreationStatus::Completed;
                tracing::info!(
                    operation_id = outcome.operation_id,
                    contract_id = outcome.contract_id,
                    "contract creation completed"
                );
                Ok(outcome)
            }
            Err(err) => {
                self.status = CreationStatus::Error;
                tracing::error!(error = %err, "contract creation failed");
                Err(err)
            }
        }
    }

    fn create_contract_flow(
        &mut self,
        listing: &PropertyListing,
        selection: &ContractSelection,
    ) -> Result<CreationOutcome> {
        let property_body = bodies::property_record_body(self.config, listing);
        let property_record_id = self.find_or_create_record(&listing.id, &property_body)?;

        let seller_body = bodies::seller_contact_body(self.config);
        let seller_record_id = self.find_or_create_record(SELLER_EXTERNAL_ID, &seller_body)?;

        // No find-or-create here: a folder is always created, and the
        // association is appended unconditionally. Since lookups return the
        // first match, an earlier folder keeps winning lookups afterwards.
        let operation_request =
            bodies::operation_body(self.config, listing, &selection.folder_type_id);
        let operation = self.client.create_operation(&operation_request)?;
        if self
            .ledger
            .lookup(AssociationKind::Operation, &listing.id)
            .is_some()
        {
            tracing::warn!(
                listing = %listing.id,
                operation_id = operation.id,
                "listing already had a folder association; the new folder is a remote duplicate"
            );
        }
        self.ledger
            .record(AssociationKind::Operation, &listing.id, operation.id)?;

        match FolderFamily::from_type_id(&selection.folder_type_id) {
            Some(family) => {
                let roles = family.role_links(property_record_id, seller_record_id);
                self.client.link_operation_records(operation.id, &roles)?;
            }
            None => {
                tracing::warn!(
                    folder_type = %selection.folder_type_id,
                    "unknown folder type, linking no records"
                );
            }
        }

        let (questions, records) = self.contract_specific_data(&selection.contract_model_id)?;

        let contract = self.client.create_contract(&ContractBody {
            operation_id: operation.id,
            label: selection.contract_model_label.clone(),
            model_id: selection.contract_model_id.clone(),
            user_id: self.config.user_id,
            questions,
            records,
        })?;

        Ok(CreationOutcome {
            operation_id: operation.id,
            contract_id: contract.id,
            contract_link: contract.link,
        })
    }

    /// Ledger-guarded record creation: at most one remote record per
    /// external id across all runs.
    fn find_or_create_record(&mut self, external_id: &str, body: &RecordBody) -> Result<i64> {
        if let Some(remote_id) = self.ledger.lookup(AssociationKind::Record, external_id) {
            tracing::debug!(external_id, remote_id, "record already associated");
            return Ok(remote_id);
        }
        let created = self.client.create_record(body)?;
        self.ledger
            .record(AssociationKind::Record, external_id, created.id)?;
        Ok(created.id)
    }

    /// Model-specific answers and record associations, resolving the extra
    /// role-specific contact where the model requires one.
    fn contract_specific_data(
        &mut self,
        contract_model_id: &str,
    ) -> Result<(ContractQuestions, ContractRecords)> {
        match ContractModel::from_model_id(contract_model_id) {
            ContractModel::ViewingSlip => {
                let body = bodies::visitor_contact_body(self.config);
                let visitor_id = self.find_or_create_record(VISITOR_EXTERNAL_ID, &body)?;
                Ok((
                    bodies::viewing_slip_questions(current_epoch_ms()?),
                    ContractRecords {
                        visiteur: Some(vec![visitor_id]),
                        ..ContractRecords::default()
                    },
                ))
            }
            ContractModel::PurchaseOffer => {
                let body = bodies::offerer_contact_body(self.config);
                let offerer_id = self.find_or_create_record(OFFERER_EXTERNAL_ID, &body)?;
                Ok((
                    bodies::purchase_offer_questions(current_epoch_ms()?),
                    ContractRecords {
                        offrant: Some(vec![offerer_id]),
                        ..ContractRecords::default()
                    },
                ))
            }
            ContractModel::Generic => {
                Ok((ContractQuestions::default(), ContractRecords::default()))
            }
        }
    }
}

fn current_epoch_ms() -> Result<TimestampMs> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("compute timestamp")?
        .as_millis();
    TimestampMs::try_from(millis).context("timestamp out of range")
}
