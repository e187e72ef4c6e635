//! Thin typed client for the remote notary-contract API.
//!
//! One method per external capability, each a single request/response pair:
//! no retry, no per-call timeout override, no batching. Failures (transport
//! errors and non-success statuses alike) surface as [`BridgeError::Remote`]
//! without interpreting status codes; the orchestrator is the only consumer
//! that reacts to them.
//!
//! The [`NotaryApi`] trait is the seam the orchestrator is written against,
//! so tests substitute an in-memory fake for the HTTP implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bodies::{ContractBody, OperationBody, RecordBody};
use crate::error::BridgeError;

/// Record ids grouped by role name (`VENDEUR`, `BIEN_VENDU`, ...), the wire
/// shape of the folder-association call.
pub type RoleLinks = BTreeMap<String, Vec<i64>>;

/// A created property or contact record. Keep `id` associated with the
/// external entity to avoid duplicates on later runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCreated {
    pub id: i64,
    /// Self-login link to the record's main screen.
    pub link: String,
}

/// A created folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationCreated {
    pub id: i64,
    #[serde(rename = "organizationId")]
    pub organization_id: i64,
    #[serde(rename = "type")]
    pub operation_type: String,
    pub link: String,
}

/// A created contract. `link` opens the vendor's drafting screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractCreated {
    pub id: i64,
    pub link: String,
}

/// One entry of the organization's operation-type catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationType {
    pub id: String,
    pub label: String,
    pub contracts: Vec<ContractModelRef>,
}

/// A contract model available inside an operation type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractModelRef {
    #[serde(rename = "modelId")]
    pub model_id: String,
    pub label: String,
}

/// A one-time navigation link into the vendor UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginLink {
    pub link: String,
}

/// The six logical operations the bridge needs from the remote service.
pub trait NotaryApi {
    /// Create a property or contact record.
    fn create_record(&self, body: &RecordBody) -> Result<RecordCreated, BridgeError>;

    /// Create a folder. Agency and agent records are attached server-side
    /// by default and need not be created here.
    fn create_operation(&self, body: &OperationBody) -> Result<OperationCreated, BridgeError>;

    /// Associate previously created records to a folder under named roles.
    /// Completed record fields enrich the folder's contract clauses.
    fn link_operation_records(
        &self,
        operation_id: i64,
        roles: &RoleLinks,
    ) -> Result<(), BridgeError>;

    /// Create a contract inside a folder, optionally with model-specific
    /// answers and record associations.
    fn create_contract(&self, body: &ContractBody) -> Result<ContractCreated, BridgeError>;

    /// Catalog of operation types and contract models for an organization.
    /// Read-only, no side effects.
    fn list_operation_types(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OperationType>, BridgeError>;

    /// One-time login link into a given folder for a given user.
    fn login_link(&self, user_id: i64, operation_id: i64) -> Result<LoginLink, BridgeError>;
}

/// `NotaryApi` over HTTP with a static `x-api-key` credential per request.
pub struct HttpNotaryClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl HttpNotaryClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        HttpNotaryClient {
            agent: ureq::Agent::new_with_defaults(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, BridgeError> {
        let url = format!("{}{}", self.base_url, path);
        let mut response = self
            .agent
            .post(&url)
            .header("x-api-key", self.api_key.as_str())
            .send_json(body)
            .map_err(|err| BridgeError::remote(operation, err))?;
        response
            .body_mut()
            .read_json::<T>()
            .map_err(|err| BridgeError::remote(operation, err))
    }
}

impl NotaryApi for HttpNotaryClient {
    fn create_record(&self, body: &RecordBody) -> Result<RecordCreated, BridgeError> {
        let created: RecordCreated = self.post_json("create_record", "/records", body)?;
        tracing::info!(record_id = created.id, "record created");
        Ok(created)
    }

    fn create_operation(&self, body: &OperationBody) -> Result<OperationCreated, BridgeError> {
        let created: OperationCreated =
            self.post_json("create_operation", "/operations", body)?;
        tracing::info!(
            operation_id = created.id,
            operation_type = %created.operation_type,
            "operation created"
        );
        Ok(created)
    }

    fn link_operation_records(
        &self,
        operation_id: i64,
        roles: &RoleLinks,
    ) -> Result<(), BridgeError> {
        let url = format!("{}/operations/{operation_id}/records", self.base_url);
        self.agent
            .post(&url)
            .header("x-api-key", self.api_key.as_str())
            .send_json(roles)
            .map_err(|err| BridgeError::remote("link_operation_records", err))?;
        tracing::info!(operation_id, roles = roles.len(), "records linked to operation");
        Ok(())
    }

    fn create_contract(&self, body: &ContractBody) -> Result<ContractCreated, BridgeError> {
        let created: ContractCreated =
            self.post_json("create_contract", "/contracts", body)?;
        tracing::info!(contract_id = created.id, "contract created");
        Ok(created)
    }

    fn list_operation_types(
        &self,
        organization_id: i64,
    ) -> Result<Vec<OperationType>, BridgeError> {
        let url = format!("{}/organizations/operations", self.base_url);
        let mut response = self
            .agent
            .get(&url)
            .query("organizationId", organization_id.to_string())
            .header("x-api-key", self.api_key.as_str())
            .call()
            .map_err(|err| BridgeError::remote("list_operation_types", err))?;
        response
            .body_mut()
            .read_json::<Vec<OperationType>>()
            .map_err(|err| BridgeError::remote("list_operation_types", err))
    }

    fn login_link(&self, user_id: i64, operation_id: i64) -> Result<LoginLink, BridgeError> {
        let url = format!("{}/login", self.base_url);
        let mut response = self
            .agent
            .get(&url)
            .query("userId", user_id.to_string())
            .query("operationId", operation_id.to_string())
            .header("x-api-key", self.api_key.as_str())
            .call()
            .map_err(|err| BridgeError::remote("login_link", err))?;
        response
            .body_mut()
            .read_json::<LoginLink>()
            .map_err(|err| BridgeError::remote("login_link", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_type_catalog_deserializes() {
        let raw = r#"[
            {
                "id": "OPERATION__IMMOBILIER__VENTE_ANCIEN",
                "label": "Vente ancien",
                "contracts": [
                    {"modelId": "IMMOBILIER_VENTE_ANCIEN_BON_VISITE", "label": "Bon de visite"},
                    {"modelId": "IMMOBILIER_VENTE_ANCIEN_OFFRE_ACHAT", "label": "Offre d'achat"}
                ]
            }
        ]"#;
        let types: Vec<OperationType> = serde_json::from_str(raw).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].contracts.len(), 2);
        assert_eq!(
            types[0].contracts[0].model_id,
            "IMMOBILIER_VENTE_ANCIEN_BON_VISITE"
        );
    }

    #[test]
    fn role_links_serialize_as_flat_object() {
        let mut roles = RoleLinks::new();
        roles.insert("BIEN_VENDU".to_string(), vec![101]);
        roles.insert("VENDEUR".to_string(), vec![102]);
        let value = serde_json::to_value(&roles).unwrap();
        assert_eq!(value["BIEN_VENDU"][0], 101);
        assert_eq!(value["VENDEUR"][0], 102);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpNotaryClient::new("https://example.invalid/api/v1/", "key");
        assert_eq!(client.base_url, "https://example.invalid/api/v1");
    }
}
