use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of property a listing describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    House,
    Flat,
    Other(String),
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "House" => PropertyType::House,
            "Flat" => PropertyType::Flat,
            _ => PropertyType::Other(value),
        }
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::House => f.write_str("House"),
            PropertyType::Flat => f.write_str("Flat"),
            PropertyType::Other(name) => f.write_str(name),
        }
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Zero-based month index for an English month name (January = 0)
pub fn month_index(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|month| *month == name)
        .map(|idx| idx as u32)
}

/// Month name for a zero-based index, empty when out of range
pub fn month_name(index: u32) -> &'static str {
    MONTH_NAMES.get(index as usize).copied().unwrap_or("")
}

/// Date a listing was added, as stored in the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedDate {
    pub day: u32,
    pub month: String,
    pub year: i32,
}

impl AddedDate {
    pub fn new(day: u32, month: impl Into<String>, year: i32) -> Self {
        Self {
            day,
            month: month.into(),
            year,
        }
    }

    /// Calendar date for this record.
    ///
    /// Returns `None` for an unrecognised month name or a day that does not
    /// exist in that month.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let month = month_index(&self.month)?;
        NaiveDate::from_ymd_opt(self.year, month + 1, self.day)
    }
}

/// Geographic position of a listing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Core listing data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    pub price: u64,
    #[serde(default)]
    pub tenure: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub postcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floorplan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub added: AddedDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Listing {
    /// Image shown on cards: the explicit picture, falling back to the first gallery image
    pub fn thumbnail(&self) -> Option<&str> {
        self.picture
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

/// Shape of the listing dataset file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingDocument {
    pub properties: Vec<Listing>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal listing for tests
    pub fn listing(id: &str, price: u64, bedrooms: u32) -> Listing {
        Listing {
            id: id.to_string(),
            property_type: PropertyType::House,
            bedrooms,
            bathrooms: 1,
            price,
            tenure: "Freehold".to_string(),
            description: format!("Test listing {}", id),
            location: "Petts Wood Road, Orpington BR5".to_string(),
            postcode: "BR5 1AA".to_string(),
            picture: None,
            images: vec![format!("images/{}/pic1.jpg", id)],
            floorplan: Some(format!("images/{}/floorplan.jpg", id)),
            url: None,
            added: AddedDate::new(15, "June", 2024),
            coordinates: Some(Coordinates {
                lat: 51.389,
                lng: 0.073,
            }),
        }
    }
}
