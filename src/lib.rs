pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod inference;
pub mod models;
pub mod prompt;
pub mod startup;
pub mod utils;
