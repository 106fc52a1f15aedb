use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use housing_catalog::catalog::{Catalog, DetailView, HttpSource, JsonFileSource, ListingSource};
use housing_catalog::config::{CatalogConfig, SearchDefaults};
use housing_catalog::favorites::FavoritesStore;
use housing_catalog::filter::SearchFilter;
use housing_catalog::format::{format_added_date, format_price, time_since_added};
use housing_catalog::models::Listing;
use housing_catalog::sanitize::{validate_number, validate_postcode};
use housing_catalog::transfer::{start_add_drag, DataTransfer, DropOutcome, DropTarget, DropZone};
use std::path::PathBuf;
use tracing::{info, warn};

/// Browse the listing catalog from the command line
#[derive(Debug, Parser)]
#[command(name = "housing-catalog", version)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset JSON file (overrides config)
    #[arg(long, conflicts_with = "url")]
    dataset: Option<PathBuf>,

    /// Dataset URL (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Property type, or "Any"
    #[arg(long = "type")]
    property_type: Option<String>,

    #[arg(long)]
    min_price: Option<String>,

    #[arg(long)]
    max_price: Option<String>,

    #[arg(long)]
    min_bedrooms: Option<String>,

    #[arg(long)]
    max_bedrooms: Option<String>,

    /// Postcode prefix, e.g. BR1
    #[arg(long)]
    postcode: Option<String>,

    /// Only listings added on or after this date (YYYY-MM-DD)
    #[arg(long)]
    added_after: Option<String>,

    /// Only listings added on or before this date (YYYY-MM-DD)
    #[arg(long)]
    added_before: Option<String>,

    /// Drag a listing into favorites for this session (repeatable)
    #[arg(long = "favorite")]
    favorites: Vec<String>,

    /// Show the detail view for one listing
    #[arg(long)]
    show: Option<String>,

    /// Write the filtered results as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    /// Filter flags, in the same shape as the config file's `[search]` table
    fn search_overrides(&self) -> SearchDefaults {
        SearchDefaults {
            property_type: self.property_type.clone(),
            min_price: self.min_price.clone(),
            max_price: self.max_price.clone(),
            min_bedrooms: self.min_bedrooms.clone(),
            max_bedrooms: self.max_bedrooms.clone(),
            postcode: self.postcode.clone(),
            date_after: self.added_after.clone(),
            date_before: self.added_before.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CatalogConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    if let Some(path) = &args.dataset {
        config.dataset.path = path.clone();
        config.dataset.url = None;
    }
    if let Some(url) = &args.url {
        config.dataset.url = Some(url.clone());
    }

    config.logging.init();

    info!("🏠 Housing Catalog");
    info!("==================");

    let source: Box<dyn ListingSource> = match &config.dataset.url {
        Some(url) => Box::new(HttpSource::new(url.as_str())?),
        None => Box::new(JsonFileSource::new(config.dataset.path.clone())),
    };
    let catalog = Catalog::load(source.as_ref()).await?;

    let overrides = args.search_overrides();
    for (flag, value) in [
        ("--min-price", &overrides.min_price),
        ("--max-price", &overrides.max_price),
        ("--min-bedrooms", &overrides.min_bedrooms),
        ("--max-bedrooms", &overrides.max_bedrooms),
    ] {
        if value.as_deref().is_some_and(|raw| !validate_number(raw)) {
            warn!("Ignoring {}: not a non-negative number", flag);
        }
    }
    if overrides.postcode.as_deref().is_some_and(|raw| !validate_postcode(raw)) {
        warn!("Postcode filter does not look like an outward code (e.g. BR1)");
    }

    let mut search = SearchFilter::new(catalog.listings().to_vec());
    config.search.apply(&mut search);
    overrides.apply(&mut search);

    if search.has_active_filters() {
        info!("Active filters: {:?}", search.criteria());
    }

    let today = Local::now().date_naive();
    let results = search.filtered();
    info!("\n✅ {} of {} listings match\n", results.len(), catalog.len());

    for (i, listing) in results.iter().enumerate() {
        print_card(i + 1, listing, today);
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} listings to {}", results.len(), path.display());
    }

    let mut favorites = FavoritesStore::new();
    favorites.subscribe(|_, members| info!("❤️  Favorites: {}", members.len()));
    let mut sidebar = DropZone::new(DropTarget::Favorites);

    for id in &args.favorites {
        let listing = match catalog.get(id) {
            Ok(listing) => listing,
            Err(err) => {
                warn!("Cannot favorite: {}", err);
                continue;
            }
        };

        let mut transfer = DataTransfer::new();
        start_add_drag(listing, &mut transfer)?;
        sidebar.drag_over(&transfer);
        if let DropOutcome::AlreadyFavorite(id) = sidebar.drop(&transfer, &mut favorites) {
            info!("{} is already a favorite", id);
        }
    }

    if favorites.favorites_count() > 0 {
        println!("Favorites ({}):", favorites.favorites_count());
        for listing in favorites.favorites() {
            println!(
                "  ❤️  {} - {} ({})",
                format_price(listing.price),
                listing.location,
                listing.id
            );
        }
        println!();
    }

    if let Some(id) = &args.show {
        match catalog.detail(id) {
            DetailView::Found(listing) => print_detail(listing, favorites.is_favorite(id)),
            DetailView::NotFound { id, back_to } => {
                println!("Property Not Found: '{}'", id);
                println!(
                    "The property you're looking for doesn't exist. Back to search: {}",
                    back_to
                );
            }
        }
    }

    Ok(())
}

fn print_card(position: usize, listing: &Listing, today: chrono::NaiveDate) {
    println!(
        "{}. {} - {} ({})",
        position,
        format_price(listing.price),
        listing.location,
        listing.property_type
    );
    println!(
        "   {} bed, {} bath, {}",
        listing.bedrooms, listing.bathrooms, listing.tenure
    );
    println!(
        "   Postcode: {}, added {}",
        listing.postcode,
        time_since_added(&listing.added, today)
    );
    println!("   ID: {}", listing.id);
    println!();
}

fn print_detail(listing: &Listing, is_favorite: bool) {
    println!("{} {}", format_price(listing.price), if is_favorite { "❤️" } else { "" });
    println!("{}", listing.location);
    println!(
        "{} | {} bed | {} bath | {} | {}",
        listing.property_type, listing.bedrooms, listing.bathrooms, listing.tenure, listing.postcode
    );
    println!("Added: {}", format_added_date(&listing.added));
    if let Some(coords) = listing.coordinates {
        println!("Map: {:.5}, {:.5}", coords.lat, coords.lng);
    }
    println!("Images: {}", listing.images.len());
    if let Some(floorplan) = &listing.floorplan {
        println!("Floorplan: {}", floorplan);
    }
    println!();
    println!("{}", listing.description);
}
