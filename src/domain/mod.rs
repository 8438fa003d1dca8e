pub mod administrators;
pub mod documents;
