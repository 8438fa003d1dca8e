pub mod evaluate;
pub mod memory;
pub mod postgres;
