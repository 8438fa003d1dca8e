pub mod administrators;
pub mod soft_delete;
