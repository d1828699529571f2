pub mod catalog;
pub mod dashboard;
pub mod errors;
pub mod order;
pub mod ports;
