//! In-memory consultation repository.
//!
//! Consultations live exactly as long as the user's session, so memory
//! is the system of record, not a cache: a restart discards in-flight
//! consultations, which matches the lifecycle of the selection screen.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::consultation::Consultation;
use crate::domain::foundation::{ConsultationId, DomainError, ErrorCode};
use crate::ports::ConsultationRepository;

/// In-memory storage for consultation aggregates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConsultationRepository {
    consultations: Arc<RwLock<HashMap<ConsultationId, Consultation>>>,
}

impl InMemoryConsultationRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            consultations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clears all stored consultations (useful for tests).
    pub async fn clear(&self) {
        self.consultations.write().await.clear();
    }

    /// Returns the number of stored consultations.
    pub async fn count(&self) -> usize {
        self.consultations.read().await.len()
    }
}

#[async_trait]
impl ConsultationRepository for InMemoryConsultationRepository {
    async fn save(&self, consultation: &Consultation) -> Result<(), DomainError> {
        let mut consultations = self.consultations.write().await;
        consultations.insert(consultation.id(), consultation.clone());
        Ok(())
    }

    async fn update(&self, consultation: &Consultation) -> Result<(), DomainError> {
        let mut consultations = self.consultations.write().await;
        if !consultations.contains_key(&consultation.id()) {
            return Err(DomainError::new(
                ErrorCode::ConsultationNotFound,
                format!("Consultation not found: {}", consultation.id()),
            ));
        }
        consultations.insert(consultation.id(), consultation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ConsultationId) -> Result<Option<Consultation>, DomainError> {
        let consultations = self.consultations.read().await;
        Ok(consultations.get(id).cloned())
    }

    async fn delete(&self, id: &ConsultationId) -> Result<(), DomainError> {
        self.consultations.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consultation::PatientContext;
    use crate::domain::foundation::PathwayId;

    fn consultation() -> Consultation {
        Consultation::new(
            PathwayId::new("test").unwrap(),
            PatientContext::not_specified(),
        )
    }

    #[tokio::test]
    async fn save_and_find_roundtrip() {
        let repo = InMemoryConsultationRepository::new();
        let c = consultation();
        let id = c.id();

        repo.save(&c).await.unwrap();
        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.id(), id);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn find_unknown_is_none() {
        let repo = InMemoryConsultationRepository::new();
        assert!(repo
            .find_by_id(&ConsultationId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_unknown_fails() {
        let repo = InMemoryConsultationRepository::new();
        let err = repo.update(&consultation()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConsultationNotFound);
    }

    #[tokio::test]
    async fn update_replaces_stored_state() {
        let repo = InMemoryConsultationRepository::new();
        let mut c = consultation();
        repo.save(&c).await.unwrap();

        c.restart();
        repo.update(&c).await.unwrap();
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn delete_removes_consultation() {
        let repo = InMemoryConsultationRepository::new();
        let c = consultation();
        let id = c.id();
        repo.save(&c).await.unwrap();

        repo.delete(&id).await.unwrap();
        assert!(repo.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryConsultationRepository::new();
        let handle = repo.clone();
        repo.save(&consultation()).await.unwrap();

        assert_eq!(handle.count().await, 1);
    }
}
