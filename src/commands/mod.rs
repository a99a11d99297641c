pub mod calculate;
pub mod scenarios;
