//! End-to-end tests over the bundled dataset: search, favorites and drag transfers.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use housing_catalog::catalog::{Catalog, DetailView, JsonFileSource, SEARCH_ROUTE};
use housing_catalog::favorites::FavoritesStore;
use housing_catalog::filter::SearchFilter;
use housing_catalog::models::PropertyType;
use housing_catalog::transfer::{
    start_add_drag, start_remove_drag, DataTransfer, DropOutcome, DropTarget, DropZone,
    ADD_CHANNEL_KEY,
};

fn dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/properties.json")
}

async fn bundled_catalog() -> Catalog {
    Catalog::load(&JsonFileSource::new(dataset_path()))
        .await
        .expect("bundled dataset should load")
}

#[tokio::test]
async fn bundled_dataset_loads_in_order() {
    let catalog = bundled_catalog().await;

    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.listings()[0].id, "prop1");
    assert!(catalog
        .listings()
        .iter()
        .all(|listing| listing.added.to_date().is_some()));
}

#[tokio::test]
async fn search_combines_every_field() {
    let catalog = bundled_catalog().await;
    let mut search = SearchFilter::new(catalog.listings().to_vec());

    search.set_type("Flat");
    let flats: Vec<_> = search.filtered().iter().map(|l| l.id.clone()).collect();
    assert_eq!(flats, ["prop2", "prop4", "prop6"]);

    search.set_postcode("br1");
    search.set_max_price("400000");
    let narrowed: Vec<_> = search.filtered().iter().map(|l| l.id.clone()).collect();
    assert_eq!(narrowed, ["prop4"]);

    search.set_date_after("2024-06-15");
    search.set_date_before("2024-06-15");
    assert_eq!(search.filtered().len(), 1);

    search.reset_filters();
    assert!(!search.has_active_filters());
    assert_eq!(search.filtered().len(), catalog.len());
}

#[tokio::test]
async fn bedroom_range_ignores_bathrooms() {
    let catalog = bundled_catalog().await;
    let mut search = SearchFilter::new(catalog.listings().to_vec());

    search.set_min_bedrooms("3");
    search.set_max_bedrooms("4");
    let ids: Vec<_> = search.filtered().iter().map(|l| l.id.clone()).collect();
    assert_eq!(ids, ["prop1", "prop3", "prop7"]);
    assert!(search
        .filtered()
        .iter()
        .all(|l| l.property_type == PropertyType::House));
}

#[tokio::test]
async fn drag_add_then_drag_remove() {
    let catalog = bundled_catalog().await;
    let listing = catalog.get("prop3").unwrap();

    let mut store = FavoritesStore::new();
    let badge = Rc::new(Cell::new(0usize));
    let view = Rc::clone(&badge);
    store.subscribe(move |_, members| view.set(members.len()));

    let mut sidebar = DropZone::new(DropTarget::Favorites);
    let mut transfer = DataTransfer::new();
    start_add_drag(listing, &mut transfer).unwrap();

    assert!(sidebar.drag_over(&transfer));
    assert_eq!(
        sidebar.drop(&transfer, &mut store),
        DropOutcome::Added("prop3".to_string())
    );
    assert!(store.is_favorite("prop3"));
    assert_eq!(store.favorites_count(), 1);
    assert_eq!(badge.get(), 1);

    let mut remove_zone = DropZone::new(DropTarget::RemoveZone);
    let mut transfer = DataTransfer::new();
    start_remove_drag(&listing.id, &mut transfer).unwrap();

    assert_eq!(
        remove_zone.drop(&transfer, &mut store),
        DropOutcome::Removed("prop3".to_string())
    );
    assert_eq!(store.favorites_count(), 0);
    assert_eq!(badge.get(), 0);
}

#[tokio::test]
async fn toggles_and_drops_share_one_store() {
    let catalog = bundled_catalog().await;
    let mut store = FavoritesStore::new();

    let first = catalog.get("prop1").unwrap();
    let second = catalog.get("prop5").unwrap();

    assert!(store.toggle_favorite(first));

    let mut transfer = DataTransfer::new();
    start_add_drag(first, &mut transfer).unwrap();
    assert_eq!(
        housing_catalog::transfer::drop_payload(DropTarget::Favorites, &transfer, &mut store),
        DropOutcome::AlreadyFavorite("prop1".to_string())
    );

    start_add_drag(second, &mut transfer).unwrap();
    housing_catalog::transfer::drop_payload(DropTarget::Favorites, &transfer, &mut store);

    let ids: Vec<_> = store.favorites().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["prop1", "prop5"]);

    store.clear_favorites();
    assert_eq!(store.favorites_count(), 0);
}

#[tokio::test]
async fn corrupt_drag_data_leaves_store_untouched() {
    let mut store = FavoritesStore::new();
    let mut sidebar = DropZone::new(DropTarget::Favorites);

    let mut transfer = DataTransfer::new();
    transfer.set_data(ADD_CHANNEL_KEY, r#"{"id": "prop1"}"#);

    assert!(!sidebar.drag_over(&transfer));
    assert_eq!(sidebar.drop(&transfer, &mut store), DropOutcome::Ignored);
    assert_eq!(store.favorites_count(), 0);
}

#[tokio::test]
async fn unknown_detail_id_is_not_found() {
    let catalog = bundled_catalog().await;

    assert_eq!(
        catalog.detail("prop404"),
        DetailView::NotFound {
            id: "prop404".to_string(),
            back_to: SEARCH_ROUTE,
        }
    );
}
