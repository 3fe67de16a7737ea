pub mod business_map;

pub use business_map::{BusinessMap, BusinessMapProps};
