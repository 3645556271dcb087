//! Adapters - concrete implementations of the ports.

pub mod catalog;
pub mod consultation;
pub mod http;

pub use catalog::FilePathwayStore;
pub use consultation::InMemoryConsultationRepository;
