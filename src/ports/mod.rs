//! Ports - trait contracts between the application core and adapters.

mod consultation_repository;
mod pathway_store;

pub use consultation_repository::ConsultationRepository;
pub use pathway_store::{PathwayStore, PathwaySummary};
