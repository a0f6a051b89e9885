pub mod interval;
pub mod price_level;
