use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;

mod bodies;
mod catalog;
mod cli;
mod client;
mod config;
mod error;
mod ledger;
mod workflow;

use catalog::{find_listing, sample_listings};
use cli::{Command, CreateArgs, ListArgs, OpenArgs, RootArgs, TypesArgs};
use client::{HttpNotaryClient, NotaryApi};
use config::BridgeConfig;
use error::BridgeError;
use ledger::{AssociationKind, Ledger};
use workflow::{ContractSelection, Orchestrator};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    let config = BridgeConfig::load()?;

    match args.command {
        Command::List(args) => cmd_list(&config, &args),
        Command::Types(args) => cmd_types(&config, &args),
        Command::Create(args) => cmd_create(&config, &args),
        Command::Open(args) => cmd_open(&config, &args),
        Command::Reset(_) => cmd_reset(&config),
    }
}

/// One row of `list` output: the listing plus its folder association.
#[derive(Serialize)]
struct ListingStatus {
    #[serde(flatten)]
    listing: catalog::PropertyListing,
    operation_id: Option<i64>,
}

fn cmd_list(config: &BridgeConfig, args: &ListArgs) -> Result<()> {
    let ledger = Ledger::load(config.ledger_path.clone())?;
    let rows: Vec<ListingStatus> = sample_listings()
        .into_iter()
        .map(|listing| {
            let operation_id = ledger.lookup(AssociationKind::Operation, &listing.id);
            ListingStatus {
                listing,
                operation_id,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        let listing = &row.listing;
        println!(
            "{}  {} {} {}",
            listing.id, listing.address.street, listing.address.zip_code, listing.address.city
        );
        println!("  price: {} EUR, surface: {} m2", listing.price, listing.surface);
        match row.operation_id {
            Some(operation_id) => {
                println!("  folder: #{operation_id} (use `nbridge open --listing {}`)", listing.id);
            }
            None => println!("  folder: none (use `nbridge create --listing {}`)", listing.id),
        }
    }
    Ok(())
}

fn cmd_types(config: &BridgeConfig, args: &TypesArgs) -> Result<()> {
    let client = HttpNotaryClient::new(&config.base_url, &config.api_key);
    let types = client.list_operation_types(config.organization_id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    for operation_type in &types {
        println!("{}  ({})", operation_type.label, operation_type.id);
        for contract in &operation_type.contracts {
            println!("  {}  ({})", contract.label, contract.model_id);
        }
    }
    Ok(())
}

fn cmd_create(config: &BridgeConfig, args: &CreateArgs) -> Result<()> {
    let listings = sample_listings();
    let listing = find_listing(&listings, &args.listing)
        .ok_or_else(|| anyhow!("unknown listing: {}", args.listing))?;

    let mut ledger = Ledger::load(config.ledger_path.clone())?;
    // Mirrors the UI gating: once a folder exists for a listing, creation is
    // no longer offered for it. This also avoids the duplicate-folder gap on
    // the happy path.
    if let Some(operation_id) = ledger.lookup(AssociationKind::Operation, &listing.id) {
        return Err(anyhow!(
            "listing {} already has folder #{operation_id}; use `nbridge open` or `nbridge reset`",
            listing.id
        ));
    }

    let selection = ContractSelection {
        folder_type_id: args.folder_type.clone(),
        contract_model_id: args.contract_model.clone(),
        contract_model_label: args
            .label
            .clone()
            .unwrap_or_else(|| args.contract_model.clone()),
    };

    let client = HttpNotaryClient::new(&config.base_url, &config.api_key);
    let mut orchestrator = Orchestrator::new(&client, &mut ledger, config);

    println!("Creating contract for {}...", listing.id);
    let outcome = orchestrator.run_creation(&listing, &selection)?;

    println!("Folder #{} created.", outcome.operation_id);
    println!("Contract #{} created.", outcome.contract_id);
    println!("Finish drafting at: {}", outcome.contract_link);
    Ok(())
}

fn cmd_open(config: &BridgeConfig, args: &OpenArgs) -> Result<()> {
    let ledger = Ledger::load(config.ledger_path.clone())?;
    // The command is only meaningful once a creation flow has associated a
    // folder; reaching this without one is a gating defect, not a runtime
    // condition to recover from.
    let operation_id = ledger
        .lookup(AssociationKind::Operation, &args.listing)
        .ok_or_else(|| {
            BridgeError::Precondition(format!("no folder associated with listing {}", args.listing))
        })?;

    let client = HttpNotaryClient::new(&config.base_url, &config.api_key);
    let login = client.login_link(config.user_id, operation_id)?;
    println!("{}", login.link);
    Ok(())
}

fn cmd_reset(config: &BridgeConfig) -> Result<()> {
    let mut ledger = Ledger::load(config.ledger_path.clone())?;
    let removed = ledger.len();
    ledger.clear()?;
    println!("Cleared {removed} association(s).");
    Ok(())
}
