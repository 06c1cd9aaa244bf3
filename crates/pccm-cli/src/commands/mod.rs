pub mod elements;
pub mod generate;
