//! Reservation repository interface

use std::collections::HashMap;

use async_trait::async_trait;

use super::model::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a reservation, replacing any existing one with the same ID
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    /// Remove a reservation by ID. Fails with `NotFound` if absent.
    async fn delete(&self, id: &str) -> DomainResult<Reservation>;

    /// Consistent snapshot of all reservations keyed by ID
    async fn find_all(&self) -> DomainResult<HashMap<String, Reservation>>;

    /// Number of stored reservations
    async fn count(&self) -> usize;
}
