pub mod aggregate;
pub mod cli;
pub mod config;
pub mod errors;
pub mod eth;
pub mod inspect;
pub mod models;
