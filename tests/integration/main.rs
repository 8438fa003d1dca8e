#[path = "../common/mod.rs"]
#[macro_use]
pub mod common;

mod administrators;
mod health;
mod postgres;
