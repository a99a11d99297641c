pub mod accumulator;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scenarios;
