pub mod auth;
pub mod catalog_service;
pub mod order_workflow;
pub mod reorder;

#[cfg(test)]
pub(crate) mod fake_api;
