pub mod config;
pub mod db;
pub mod repositories;
pub mod state;
pub mod store;
