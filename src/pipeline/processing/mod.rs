// Validation and normalization stages

pub mod coerce;
pub mod derive;
pub mod fields;
pub mod normalize;
pub mod validate;

pub use fields::CanonicalField;
pub use normalize::normalize_row;
pub use validate::validate;
