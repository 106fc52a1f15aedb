use crate::models::Listing;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// What changed in the favorites set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesChange {
    Added(String),
    Removed(String),
    Cleared,
}

/// Handle returned by [`FavoritesStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&FavoritesChange, &[Listing])>;

/// Session-scoped set of favorited listings.
///
/// Members keep insertion order and an id appears at most once. The store is
/// the only place the set is mutated; views read snapshots through
/// [`favorites`](Self::favorites) or receive them via subscriptions. Every
/// mutation that changes the set notifies subscribers before returning.
#[derive(Default)]
pub struct FavoritesStore {
    entries: Vec<Listing>,
    ids: HashSet<String>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listing; returns false when it was already a favorite
    pub fn add_favorite(&mut self, listing: &Listing) -> bool {
        if self.ids.contains(&listing.id) {
            debug!("Listing {} already in favorites", listing.id);
            return false;
        }

        self.ids.insert(listing.id.clone());
        self.entries.push(listing.clone());
        debug!(
            "Added {} to favorites ({} total)",
            listing.id,
            self.entries.len()
        );
        self.notify(FavoritesChange::Added(listing.id.clone()));
        true
    }

    /// Remove a listing by id; returns false when it was not a favorite
    pub fn remove_favorite(&mut self, id: &str) -> bool {
        if !self.ids.remove(id) {
            return false;
        }

        self.entries.retain(|listing| listing.id != id);
        debug!("Removed {} from favorites ({} total)", id, self.entries.len());
        self.notify(FavoritesChange::Removed(id.to_string()));
        true
    }

    /// Flip membership; returns whether the listing is a favorite afterwards
    pub fn toggle_favorite(&mut self, listing: &Listing) -> bool {
        if self.is_favorite(&listing.id) {
            self.remove_favorite(&listing.id);
            false
        } else {
            self.add_favorite(listing)
        }
    }

    pub fn clear_favorites(&mut self) {
        if self.entries.is_empty() {
            return;
        }

        let count = self.entries.len();
        self.entries.clear();
        self.ids.clear();
        debug!("Cleared {} favorites", count);
        self.notify(FavoritesChange::Cleared);
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn favorites_count(&self) -> usize {
        self.entries.len()
    }

    /// Current members in insertion order
    pub fn favorites(&self) -> &[Listing] {
        &self.entries
    }

    /// Register a view to be re-evaluated on every change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&FavoritesChange, &[Listing]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, change: FavoritesChange) {
        let entries = &self.entries;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&change, entries);
        }
    }
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("entries", &self.entries)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
