pub mod config;
pub mod logger;
pub mod persistence;
pub mod startup;
