use serde::Serialize;
use std::fmt;

/// Sentinel text shown when a listing has no numeric rent
pub const CALL_FOR_RENT: &str = "Call for Rent";

/// Spreadsheet header, in column order
pub const COLUMNS: [&str; 5] = [
    "Property Name",
    "Link",
    "Apartment Price",
    "Square Footage",
    "Available From",
];

/// Monthly rent of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Price {
    Amount(u32),
    CallForRent,
}

impl Price {
    pub fn amount(&self) -> Option<u32> {
        match self {
            Price::Amount(amount) => Some(*amount),
            Price::CallForRent => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{}", amount),
            Price::CallForRent => f.write_str(CALL_FOR_RENT),
        }
    }
}

/// One rentable unit scraped from a property page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitListing {
    pub property_name: String,
    pub link: String,
    pub price: Price,
    pub square_footage: u32,
    pub available_from: String,
}

impl UnitListing {
    /// Columns compared when deciding whether two rows describe the same unit
    pub fn dedup_key(&self) -> (&str, Price, u32) {
        (self.link.as_str(), self.price, self.square_footage)
    }
}
