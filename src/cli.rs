//! CLI argument parsing for the bridge demo.
//!
//! The CLI is intentionally thin: it resolves configuration and wires the
//! orchestrator, ledger, and client together without embedding any flow
//! logic itself.

use clap::{Parser, Subcommand};

/// Root CLI entrypoint for the notary-bridge demo.
#[derive(Parser, Debug)]
#[command(
    name = "nbridge",
    version,
    about = "Bridge an external listings tool to the MyNotary contract API",
    after_help = "Commands:\n  list                 List property listings and their folder status\n  types                List operation types and contract models for the organization\n  create               Create a folder and contract for a listing\n  open                 Print a login link into a listing's existing folder\n  reset                Clear the local association ledger\n\nExamples:\n  nbridge list --json\n  nbridge types\n  nbridge create --listing external_app_house_1 \\\n      --folder-type OPERATION__IMMOBILIER__VENTE_ANCIEN \\\n      --contract-model IMMOBILIER_VENTE_ANCIEN_BON_VISITE\n  nbridge open --listing external_app_house_1\n  nbridge reset",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    List(ListArgs),
    Types(TypesArgs),
    Create(CreateArgs),
    Open(OpenArgs),
    Reset(ResetArgs),
}

/// List the demo property catalog with folder status.
#[derive(Parser, Debug)]
#[command(about = "List property listings and their folder status")]
pub struct ListArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Query the organization's operation-type catalog.
#[derive(Parser, Debug)]
#[command(about = "List available operation types and contract models")]
pub struct TypesArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Run the full contract-creation flow for one listing.
#[derive(Parser, Debug)]
#[command(about = "Create the folder and contract for a listing")]
pub struct CreateArgs {
    /// External identifier of the listing, e.g. external_app_house_1
    #[arg(long, value_name = "ID")]
    pub listing: String,

    /// Operation type id, e.g. OPERATION__IMMOBILIER__VENTE_ANCIEN
    #[arg(long, value_name = "TYPE")]
    pub folder_type: String,

    /// Contract model id, e.g. IMMOBILIER_VENTE_ANCIEN_BON_VISITE
    #[arg(long, value_name = "MODEL")]
    pub contract_model: String,

    /// Contract label shown in the vendor UI; defaults to the model id
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,
}

/// Print a one-time login link into a listing's folder.
#[derive(Parser, Debug)]
#[command(about = "Print a login link into a listing's existing folder")]
pub struct OpenArgs {
    /// External identifier of the listing
    #[arg(long, value_name = "ID")]
    pub listing: String,
}

/// Clear the association ledger. Every remote entity created so far will
/// be created again on the next flow.
#[derive(Parser, Debug)]
#[command(about = "Clear the local association ledger")]
pub struct ResetArgs {}
