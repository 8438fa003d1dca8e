pub mod administrators;
