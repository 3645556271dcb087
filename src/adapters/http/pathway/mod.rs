//! Pathway catalog HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PathwayHandlers;
pub use routes::pathway_routes;
