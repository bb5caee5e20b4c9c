pub mod apartments;
pub mod parser;
pub mod traits;
pub mod types;

pub use apartments::ApartmentsScraper;
pub use traits::ListingSource;
pub use types::UnitFilter;
