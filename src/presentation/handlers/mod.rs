pub mod administrators;
pub mod health;
