pub mod artifact;
pub mod market_data;
