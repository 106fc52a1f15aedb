pub mod file;
pub mod http;
pub mod traits;

pub use file::JsonFileSource;
pub use http::HttpSource;
pub use traits::ListingSource;

use crate::error::CatalogError;
use crate::models::Listing;
use anyhow::Result;
use std::collections::HashSet;
use tracing::info;

/// Route the user is sent back to when a detail lookup fails
pub const SEARCH_ROUTE: &str = "/search";

/// Outcome of looking up a listing for its detail page
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<'a> {
    Found(&'a Listing),
    NotFound { id: String, back_to: &'static str },
}

/// Read-only listing collection, loaded once at start-up
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    /// Build a catalog, rejecting datasets where an id appears twice
    pub fn from_listings(listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if !seen.insert(listing.id.as_str()) {
                return Err(CatalogError::DuplicateId(listing.id.clone()));
            }
        }

        Ok(Self { listings })
    }

    /// Load the dataset from a source and validate it
    pub async fn load(source: &dyn ListingSource) -> Result<Self> {
        let listings = source.load().await?;
        let catalog = Self::from_listings(listings)?;

        info!(
            "Loaded {} listings from {} source",
            catalog.len(),
            source.source_name()
        );

        Ok(catalog)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Listing, CatalogError> {
        self.listings
            .iter()
            .find(|listing| listing.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Resolve the detail page for an id; unknown ids point back to search
    pub fn detail(&self, id: &str) -> DetailView<'_> {
        match self.get(id) {
            Ok(listing) => DetailView::Found(listing),
            Err(_) => DetailView::NotFound {
                id: id.to_string(),
                back_to: SEARCH_ROUTE,
            },
        }
    }
}
