//! Consultation repository port (write side).
//!
//! Defines the contract for keeping consultation aggregates between
//! requests. A consultation lives only as long as the user's session:
//! it is created at intake and discarded when the user leaves, so
//! implementations need no durability guarantees.

use async_trait::async_trait;

use crate::domain::consultation::Consultation;
use crate::domain::foundation::{ConsultationId, DomainError};

/// Repository port for consultation persistence.
#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    /// Save a new consultation.
    async fn save(&self, consultation: &Consultation) -> Result<(), DomainError>;

    /// Update an existing consultation.
    ///
    /// # Errors
    ///
    /// - `ConsultationNotFound` if the consultation doesn't exist
    async fn update(&self, consultation: &Consultation) -> Result<(), DomainError>;

    /// Find a consultation by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ConsultationId) -> Result<Option<Consultation>, DomainError>;

    /// Delete a consultation (the user abandoned the session).
    async fn delete(&self, id: &ConsultationId) -> Result<(), DomainError>;
}
