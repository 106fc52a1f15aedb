use crate::error::PayloadError;
use crate::favorites::FavoritesStore;
use crate::models::Listing;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Transfer-data key carrying a JSON listing for add-to-favorites drags
pub const ADD_CHANNEL_KEY: &str = "property";
/// Transfer-data key carrying a bare listing id for remove drags
pub const REMOVE_CHANNEL_KEY: &str = "removePropertyId";

/// String-keyed data attached to one drag gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    data: HashMap<String, String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, key: &str, value: impl Into<String>) {
        self.data.insert(key.to_string(), value.into());
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Which payload slot a transfer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Add,
    Remove,
}

impl Channel {
    pub fn key(self) -> &'static str {
        match self {
            Channel::Add => ADD_CHANNEL_KEY,
            Channel::Remove => REMOVE_CHANNEL_KEY,
        }
    }
}

/// Validated contents of a drag gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragPayload {
    Add { listing: Listing },
    Remove { id: String },
}

impl DragPayload {
    /// Read and validate the payload on one channel
    pub fn read(channel: Channel, transfer: &DataTransfer) -> Result<Self, PayloadError> {
        let key = channel.key();
        let raw = transfer.get_data(key).ok_or(PayloadError::Missing(key))?;

        match channel {
            Channel::Add => Ok(DragPayload::Add {
                listing: serde_json::from_str(raw)?,
            }),
            Channel::Remove => {
                let id = raw.trim();
                if id.is_empty() {
                    return Err(PayloadError::EmptyId);
                }
                Ok(DragPayload::Remove { id: id.to_string() })
            }
        }
    }

    /// Write the payload into its own channel
    pub fn write(&self, transfer: &mut DataTransfer) -> Result<(), PayloadError> {
        match self {
            DragPayload::Add { listing } => {
                transfer.set_data(ADD_CHANNEL_KEY, serde_json::to_string(listing)?);
            }
            DragPayload::Remove { id } => transfer.set_data(REMOVE_CHANNEL_KEY, id.as_str()),
        }
        Ok(())
    }

    pub fn channel(&self) -> Channel {
        match self {
            DragPayload::Add { .. } => Channel::Add,
            DragPayload::Remove { .. } => Channel::Remove,
        }
    }
}

/// Drag-start on a results card or detail page
pub fn start_add_drag(listing: &Listing, transfer: &mut DataTransfer) -> Result<(), PayloadError> {
    DragPayload::Add {
        listing: listing.clone(),
    }
    .write(transfer)
}

/// Drag-start on an entry in the favorites sidebar
pub fn start_remove_drag(id: &str, transfer: &mut DataTransfer) -> Result<(), PayloadError> {
    DragPayload::Remove { id: id.to_string() }.write(transfer)
}

/// Places a drag can be released over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The favorites sidebar; adds the dragged listing
    Favorites,
    /// The sidebar's remove zone; removes the dragged favorite
    RemoveZone,
}

impl DropTarget {
    pub fn channel(self) -> Channel {
        match self {
            DropTarget::Favorites => Channel::Add,
            DropTarget::RemoveZone => Channel::Remove,
        }
    }

    /// Accept only when this target's channel holds a valid payload
    pub fn accepts(self, transfer: &DataTransfer) -> bool {
        DragPayload::read(self.channel(), transfer).is_ok()
    }
}

/// Result of releasing a drag over a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Added(String),
    AlreadyFavorite(String),
    Removed(String),
    NotFavorite(String),
    /// Missing or malformed payload; nothing changed
    Ignored,
}

/// Apply a drop to the store. Bad payloads are swallowed as [`DropOutcome::Ignored`].
pub fn drop_payload(
    target: DropTarget,
    transfer: &DataTransfer,
    store: &mut FavoritesStore,
) -> DropOutcome {
    let payload = match DragPayload::read(target.channel(), transfer) {
        Ok(payload) => payload,
        Err(err) => {
            debug!("Ignoring drop on {:?}: {}", target, err);
            return DropOutcome::Ignored;
        }
    };

    match payload {
        DragPayload::Add { listing } => {
            if store.add_favorite(&listing) {
                DropOutcome::Added(listing.id)
            } else {
                DropOutcome::AlreadyFavorite(listing.id)
            }
        }
        DragPayload::Remove { id } => {
            if store.remove_favorite(&id) {
                DropOutcome::Removed(id)
            } else {
                DropOutcome::NotFavorite(id)
            }
        }
    }
}

/// Drop target plus its "drop here" highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropZone {
    target: DropTarget,
    highlighted: bool,
}

impl DropZone {
    pub fn new(target: DropTarget) -> Self {
        Self {
            target,
            highlighted: false,
        }
    }

    pub fn target(&self) -> DropTarget {
        self.target
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Drag moved over the zone; returns whether the drop would be accepted
    pub fn drag_over(&mut self, transfer: &DataTransfer) -> bool {
        self.highlighted = self.target.accepts(transfer);
        self.highlighted
    }

    pub fn drag_leave(&mut self) {
        self.highlighted = false;
    }

    pub fn drop(&mut self, transfer: &DataTransfer, store: &mut FavoritesStore) -> DropOutcome {
        self.highlighted = false;
        drop_payload(self.target, transfer, store)
    }
}
