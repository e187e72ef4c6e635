//! Sample property catalog owned by the host application.
//!
//! In a real deployment these listings come from the business tool's own
//! database; the bridge only reads them and never writes them back.

use serde::Serialize;

/// A property listing as the external business tool stores it.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListing {
    pub id: String,
    pub address: ListingAddress,
    /// Sale price in euros.
    pub price: u32,
    /// Living surface in square meters.
    pub surface: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingAddress {
    pub street: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

/// The fixed demo catalog.
pub fn sample_listings() -> Vec<PropertyListing> {
    vec![
        PropertyListing {
            id: "external_app_house_1".to_string(),
            address: ListingAddress {
                street: "1 rue du pardis".to_string(),
                zip_code: "69002".to_string(),
                city: "Lyon".to_string(),
                country: "France".to_string(),
            },
            price: 185_000,
            surface: 45,
        },
        PropertyListing {
            id: "external_app_house_2".to_string(),
            address: ListingAddress {
                street: "9 rue du moulin".to_string(),
                zip_code: "69001".to_string(),
                city: "Lyon".to_string(),
                country: "France".to_string(),
            },
            price: 256_000,
            surface: 75,
        },
    ]
}

/// Look up a listing by its external identifier.
pub fn find_listing(listings: &[PropertyListing], id: &str) -> Option<PropertyListing> {
    listings.iter().find(|listing| listing.id == id).cloned()
}
