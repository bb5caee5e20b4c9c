use crate::models::UnitListing;

/// Thresholds a unit must meet to be kept
#[derive(Debug, Clone, Copy)]
pub struct UnitFilter {
    /// Maximum monthly rent (USD), inclusive
    pub max_price: u32,
    /// Minimum size in square feet, inclusive
    pub min_square_footage: u32,
}

impl Default for UnitFilter {
    fn default() -> Self {
        Self {
            max_price: 1800,
            min_square_footage: 700,
        }
    }
}

impl UnitFilter {
    /// "Call for Rent" units never pass
    pub fn accepts(&self, unit: &UnitListing) -> bool {
        match unit.price.amount() {
            Some(price) => price <= self.max_price && unit.square_footage >= self.min_square_footage,
            None => false,
        }
    }
}
