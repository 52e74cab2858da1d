pub mod aggregator;
pub mod upstream;
pub mod validate;
