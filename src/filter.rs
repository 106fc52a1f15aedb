use crate::models::{Listing, PropertyType};
use crate::sanitize::sanitize_search_input;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

/// Label the type selector uses for "no type constraint"
pub const ANY_TYPE: &str = "Any";

/// User-chosen constraints; `None` leaves a field unconstrained
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub property_type: Option<PropertyType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<f64>,
    pub max_bedrooms: Option<f64>,
    /// Postcode prefix, e.g. `BR1`
    pub postcode: Option<String>,
    pub date_after: Option<NaiveDate>,
    pub date_before: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn has_active_filters(&self) -> bool {
        *self != Self::default()
    }

    /// True when the listing satisfies every set constraint
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(kind) = &self.property_type {
            if listing.property_type != *kind {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| (listing.price as f64) < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price as f64 > max) {
            return false;
        }

        if self.min_bedrooms.is_some_and(|min| f64::from(listing.bedrooms) < min) {
            return false;
        }
        if self.max_bedrooms.is_some_and(|max| f64::from(listing.bedrooms) > max) {
            return false;
        }

        if let Some(prefix) = &self.postcode {
            let prefix = prefix.trim().to_uppercase();
            if !listing.postcode.trim().to_uppercase().starts_with(&prefix) {
                return false;
            }
        }

        if self.date_after.is_none() && self.date_before.is_none() {
            return true;
        }

        // An unparseable added date never satisfies a date bound
        let Some(added) = listing.added.to_date().map(start_of_day) else {
            return false;
        };

        if self.date_after.is_some_and(|after| added < start_of_day(after)) {
            return false;
        }
        if self.date_before.is_some_and(|before| added > end_of_day(before)) {
            return false;
        }

        true
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

const LAST_MILLI: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => panic!("23:59:59.999 is a valid time"),
};

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(LAST_MILLI)
}

/// Listings satisfying all constraints, in collection order
pub fn filter_listings<'a>(listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .collect()
}

/// Parse a numeric form field; blank, non-numeric or negative input means unset
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

/// Parse a `YYYY-MM-DD` date field; anything else means unset
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse the type selector; `Any` or blank means unset
pub fn parse_type(raw: &str) -> Option<PropertyType> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(ANY_TYPE) {
        return None;
    }
    Some(PropertyType::from(raw.to_string()))
}

/// Parse the postcode field through the search-input sanitizer
pub fn parse_postcode(raw: &str) -> Option<String> {
    let clean = sanitize_search_input(raw);
    if clean.is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Search state behind the results page: the listing collection, the
/// current criteria and a memoized result that any update invalidates.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    listings: Vec<Listing>,
    criteria: FilterCriteria,
    matched: Option<Vec<usize>>,
}

impl SearchFilter {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            criteria: FilterCriteria::default(),
            matched: None,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Replace the source collection
    pub fn set_listings(&mut self, listings: Vec<Listing>) {
        self.listings = listings;
        self.matched = None;
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.matched = None;
    }

    pub fn set_type(&mut self, raw: &str) {
        self.update(|c| c.property_type = parse_type(raw));
    }

    pub fn set_min_price(&mut self, raw: &str) {
        self.update(|c| c.min_price = parse_number(raw));
    }

    pub fn set_max_price(&mut self, raw: &str) {
        self.update(|c| c.max_price = parse_number(raw));
    }

    pub fn set_min_bedrooms(&mut self, raw: &str) {
        self.update(|c| c.min_bedrooms = parse_number(raw));
    }

    pub fn set_max_bedrooms(&mut self, raw: &str) {
        self.update(|c| c.max_bedrooms = parse_number(raw));
    }

    pub fn set_postcode(&mut self, raw: &str) {
        self.update(|c| c.postcode = parse_postcode(raw));
    }

    pub fn set_date_after(&mut self, raw: &str) {
        self.update(|c| c.date_after = parse_date(raw));
    }

    pub fn set_date_before(&mut self, raw: &str) {
        self.update(|c| c.date_before = parse_date(raw));
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub fn has_active_filters(&self) -> bool {
        self.criteria.has_active_filters()
    }

    /// Listings matching the current criteria, recomputed only after a change
    pub fn filtered(&mut self) -> Vec<&Listing> {
        let listings = &self.listings;
        let criteria = &self.criteria;
        let matched = self.matched.get_or_insert_with(|| {
            let matched: Vec<usize> = listings
                .iter()
                .enumerate()
                .filter(|(_, listing)| criteria.matches(listing))
                .map(|(idx, _)| idx)
                .collect();
            debug!("Filter matched {} of {} listings", matched.len(), listings.len());
            matched
        });

        matched.iter().map(|&idx| &listings[idx]).collect()
    }

    fn update(&mut self, apply: impl FnOnce(&mut FilterCriteria)) {
        apply(&mut self.criteria);
        self.matched = None;
    }
}
