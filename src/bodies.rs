//! Request-body builders for the remote contract API.
//!
//! The field vocabulary here is the external service's wire format (French
//! question identifiers) and must not be renamed. Only the fields a typical
//! external tool completes are modeled; the full list is in the vendor API
//! documentation under `GET /records/description`.
//!
//! Builders are pure: no I/O, no ledger lookups, no clock reads. The
//! orchestrator owns sequencing and passes timestamps in.

use serde::Serialize;

use crate::catalog::PropertyListing;
use crate::config::BridgeConfig;

/// Epoch milliseconds, the service's timestamp format.
pub type TimestampMs = i64;

/// Record type for an apartment lot (the demo maps every listing to one).
pub const RECORD_TYPE_HOUSING_LOT: &str = "RECORD__BIEN__LOT_HABITATION";

/// Record type for a natural person.
pub const RECORD_TYPE_NATURAL_PERSON: &str = "RECORD__PERSONNE__PHYSIQUE";

/// The service's boolean vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Oui,
    Non,
}

/// Nested postal address, shared by property and contact records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rue: Option<String>,
    #[serde(rename = "codePostal", skip_serializing_if = "Option::is_none")]
    pub code_postal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ville: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pays: Option<String>,
}

/// Body for `POST /records`. A record is either a property or a contact.
#[derive(Debug, Clone, Serialize)]
pub struct RecordBody {
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(rename = "creatorId")]
    pub creator_id: i64,
    #[serde(rename = "organizationId")]
    pub organization_id: i64,
    pub questions: RecordQuestions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecordQuestions {
    Property(PropertyQuestions),
    Contact(ContactQuestions),
}

/// Commonly completed fields of a property record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyQuestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Closed vocabulary depending on the record type, e.g.
    /// `nature_bien_appartement`, `nature_bien_garage`, `nature_bien_autre`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature_bien: Option<String>,
    /// `oui` when a tenant is or was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation_statut: Option<YesNo>,
    /// `location_bail` or `occupation_gratuit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesurage_carrez_statut: Option<YesNo>,
    /// Carrez surface in m2, required when the carrez status is `oui`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesurage_carrez_superficie: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_habitable: Option<u32>,
}

/// Commonly completed fields of a natural-person contact record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactQuestions {
    /// `femme` or `homme`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prenoms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informations_personnelles_date_naissance: Option<TimestampMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informations_personnelles_ville_naissance: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informations_personnelles_nationalite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informations_personnelles_resident_fiscal: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub informations_personnelles_profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adresse: Option<Address>,
    /// International format, e.g. `+33612345678`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

/// Body for `POST /operations` (a folder grouping records and contracts).
#[derive(Debug, Clone, Serialize)]
pub struct OperationBody {
    /// Operation type id, selected by the user from the organization catalog.
    #[serde(rename = "type")]
    pub operation_type: String,
    #[serde(rename = "creatorId")]
    pub creator_id: i64,
    #[serde(rename = "organizationId")]
    pub organization_id: i64,
    /// Folder name; the service applies its default nomenclature when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub questions: MandateQuestions,
}

/// Folder-scoped mandate questions. Fields that a given folder type does
/// not use are ignored by the service, so one builder covers sale and
/// rental folders alike.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MandateQuestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_tapuscrit: Option<YesNo>,
    /// `exclusif`, `semi`, `simple`, or `gestion`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_numero: Option<String>,
    /// `mandat_semi_agence_unique` or `mandat_semi_honoraire_reduits`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_semi_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_cadastre: Option<YesNo>,
    /// `recherche_pourcentage` or `recherche_fixe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_vente_calcul: Option<String>,
    /// `honoraires_charge_vendeur`, `honoraires_charge_acquereur`, or
    /// `honoraires_charge_double`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_honoraires_charge: Option<String>,
    /// Mandate duration in months.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_duree: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_duree_recondution: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_duree_recondution_totale: Option<u32>,
    /// `personnelles` or `professionnelles`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandant_statut: Option<String>,
    /// Visit report frequency: `systematique`, `hebdomadaire`, or
    /// `frequence_autre`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_frequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_recommande_electronique: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandat_signature_electronique: Option<YesNo>,
    /// Sale price in euros, furniture included, seller fees not deducted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prix_vente_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_client_vendeur: Option<YesNo>,
    /// `cni`, `passeport`, or `sejour`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece_identite_vendeur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_age_vendeur_simple: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_luxe_vendeur_simple: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_observation_vendeur: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_prix_vendeur_simple: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_revenus_vendeur_simple: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_politique_vendeur_simple: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_profession_vendeur_simple: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_operation_anormale_vendeur: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracfin_localisation_vendeur_simple: Option<YesNo>,
}

/// Body for `POST /contracts`.
///
/// A folder can hold several purchase offers or viewing slips, each with a
/// different offering party or visitor, so contract-specific records are
/// attached here rather than on the folder.
#[derive(Debug, Clone, Serialize)]
pub struct ContractBody {
    #[serde(rename = "operationId")]
    pub operation_id: i64,
    pub label: String,
    /// Contract model id from the organization catalog.
    #[serde(rename = "type")]
    pub model_id: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(skip_serializing_if = "ContractQuestions::is_empty")]
    pub questions: ContractQuestions,
    #[serde(skip_serializing_if = "ContractRecords::is_empty")]
    pub records: ContractRecords,
}

/// Contract-model-specific answers. Only the viewing-slip and
/// purchase-offer models carry any.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContractQuestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_visite: Option<TimestampMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visite_electronique: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_developpee: Option<YesNo>,
    /// Offered price in euros.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_prix: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_apport: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_apport_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_emprunt: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_emprunt_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_date_validite: Option<TimestampMs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offre_date_extreme_signature: Option<TimestampMs>,
}

impl ContractQuestions {
    pub fn is_empty(&self) -> bool {
        *self == ContractQuestions::default()
    }
}

/// Records attached per contract, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContractRecords {
    #[serde(rename = "OFFRANT", skip_serializing_if = "Option::is_none")]
    pub offrant: Option<Vec<i64>>,
    #[serde(rename = "VISITEUR", skip_serializing_if = "Option::is_none")]
    pub visiteur: Option<Vec<i64>>,
}

impl ContractRecords {
    pub fn is_empty(&self) -> bool {
        self.offrant.is_none() && self.visiteur.is_none()
    }
}

/// Property record body for a listing. The lot details beyond the address,
/// surface, and price are representative sample data.
pub fn property_record_body(config: &BridgeConfig, listing: &PropertyListing) -> RecordBody {
    RecordBody {
        record_type: RECORD_TYPE_HOUSING_LOT.to_string(),
        creator_id: config.user_id,
        organization_id: config.organization_id,
        questions: RecordQuestions::Property(PropertyQuestions {
            adresse: Some(Address {
                numero: None,
                rue: Some(listing.address.street.clone()),
                code_postal: Some(listing.address.zip_code.clone()),
                ville: Some(listing.address.city.clone()),
                pays: Some(listing.address.country.clone()),
            }),
            numero_lot: Some("A1".to_string()),
            designation: Some("Appartement 1".to_string()),
            nature_bien: Some("nature_bien_appartement".to_string()),
            occupation_statut: Some(YesNo::Oui),
            occupation_location: Some("location_bail".to_string()),
            mesurage_carrez_statut: Some(YesNo::Oui),
            mesurage_carrez_superficie: Some(listing.surface),
            surface_habitable: Some(80),
        }),
    }
}

/// Natural-person contact record with the shared sample identity details.
pub fn natural_person_body(
    config: &BridgeConfig,
    last_name: &str,
    first_names: &str,
    email: &str,
) -> RecordBody {
    RecordBody {
        record_type: RECORD_TYPE_NATURAL_PERSON.to_string(),
        creator_id: config.user_id,
        organization_id: config.organization_id,
        questions: RecordQuestions::Contact(ContactQuestions {
            sexe: Some("homme".to_string()),
            nom: Some(last_name.to_string()),
            prenoms: Some(first_names.to_string()),
            informations_personnelles_date_naissance: Some(569_977_200_000),
            informations_personnelles_ville_naissance: Some("Paris".to_string()),
            informations_personnelles_nationalite: Some("FR".to_string()),
            informations_personnelles_resident_fiscal: Some(YesNo::Oui),
            informations_personnelles_profession: Some("Professeur".to_string()),
            email: Some(email.to_string()),
            adresse: Some(Address {
                numero: None,
                rue: Some("1 rue de Rivoli".to_string()),
                code_postal: Some("75001".to_string()),
                ville: Some("Paris".to_string()),
                pays: Some("France".to_string()),
            }),
            telephone: Some("+33612345678".to_string()),
        }),
    }
}

pub fn seller_contact_body(config: &BridgeConfig) -> RecordBody {
    natural_person_body(config, "Doe", "Jean-Michel", "john.doe@gmail.com")
}

pub fn visitor_contact_body(config: &BridgeConfig) -> RecordBody {
    natural_person_body(config, "Visiteur", "Jean", "jean-visiteur@gmail.com")
}

pub fn offerer_contact_body(config: &BridgeConfig) -> RecordBody {
    natural_person_body(config, "Offrant", "Jean", "jean-offrant@gmail.com")
}

/// Folder body for a listing. Unused questions are ignored by the service,
/// so the mandate block is not conditioned on the folder type.
pub fn operation_body(
    config: &BridgeConfig,
    listing: &PropertyListing,
    operation_type_id: &str,
) -> OperationBody {
    OperationBody {
        operation_type: operation_type_id.to_string(),
        creator_id: config.user_id,
        organization_id: config.organization_id,
        label: None,
        questions: MandateQuestions {
            mandat_tapuscrit: Some(YesNo::Non),
            mandat_type: Some("semi".to_string()),
            mandat_numero: Some("8".to_string()),
            mandat_semi_conditions: Some("mandat_semi_agence_unique".to_string()),
            mandat_cadastre: Some(YesNo::Non),
            mandat_vente_calcul: Some("recherche_fixe".to_string()),
            mandat_honoraires_charge: Some("honoraires_charge_vendeur".to_string()),
            mandat_duree: Some(3),
            mandat_duree_recondution: Some(9),
            mandat_duree_recondution_totale: Some(12),
            mandant_statut: Some("personnelles".to_string()),
            mandat_frequence: Some("systematique".to_string()),
            mandat_recommande_electronique: Some(YesNo::Oui),
            mandat_signature_electronique: Some(YesNo::Oui),
            prix_vente_total: Some(listing.price),
            presence_client_vendeur: Some(YesNo::Oui),
            piece_identite_vendeur: Some("cni".to_string()),
            tracfin_age_vendeur_simple: Some(YesNo::Oui),
            tracfin_luxe_vendeur_simple: Some(YesNo::Oui),
            tracfin_observation_vendeur: Some(YesNo::Oui),
            tracfin_prix_vendeur_simple: Some(YesNo::Oui),
            tracfin_revenus_vendeur_simple: Some(YesNo::Oui),
            tracfin_politique_vendeur_simple: Some(YesNo::Oui),
            tracfin_profession_vendeur_simple: Some(YesNo::Oui),
            tracfin_operation_anormale_vendeur: Some(YesNo::Oui),
            tracfin_localisation_vendeur_simple: Some(YesNo::Oui),
        },
    }
}

/// Answers specific to a viewing-slip contract.
pub fn viewing_slip_questions(now_ms: TimestampMs) -> ContractQuestions {
    ContractQuestions {
        date_visite: Some(now_ms),
        visite_electronique: Some(YesNo::Oui),
        ..ContractQuestions::default()
    }
}

/// Answers specific to a purchase-offer contract. Financial terms are
/// representative sample data.
pub fn purchase_offer_questions(now_ms: TimestampMs) -> ContractQuestions {
    ContractQuestions {
        offre_developpee: Some(YesNo::Oui),
        offre_prix: Some(100_000),
        offre_apport: Some(YesNo::Oui),
        offre_apport_total: Some(50_000),
        offre_emprunt: Some(YesNo::Oui),
        offre_emprunt_total: Some(50_000),
        offre_date_validite: Some(now_ms),
        offre_date_extreme_signature: Some(now_ms),
        ..ContractQuestions::default()
    }
}
