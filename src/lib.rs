pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod format;
pub mod models;
pub mod sanitize;
pub mod transfer;

pub use catalog::{Catalog, DetailView, HttpSource, JsonFileSource, ListingSource};
pub use config::CatalogConfig;
pub use error::{CatalogError, ConfigError, PayloadError};
pub use favorites::{FavoritesChange, FavoritesStore, SubscriptionId};
pub use filter::{filter_listings, FilterCriteria, SearchFilter};
pub use models::{AddedDate, Coordinates, Listing, ListingDocument, PropertyType};
pub use transfer::{DataTransfer, DragPayload, DropOutcome, DropTarget, DropZone};
