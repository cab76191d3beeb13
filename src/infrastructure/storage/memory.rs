//! In-memory reservation storage
//!
//! Every read and write goes through one `RwLock`, so a listing is always a
//! consistent snapshot and never observes a half-applied write.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, Reservation, ReservationRepository};

/// Process-lifetime reservation store
#[derive(Debug, Default)]
pub struct InMemoryReservationRepository {
    reservations: RwLock<HashMap<String, Reservation>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        let mut map = self.reservations.write().await;
        if map.insert(reservation.id.clone(), reservation).is_some() {
            debug!("Overwrote existing reservation");
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<Reservation> {
        self.reservations
            .write()
            .await
            .remove(id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                id: id.to_string(),
            })
    }

    async fn find_all(&self) -> DomainResult<HashMap<String, Reservation>> {
        Ok(self.reservations.read().await.clone())
    }

    async fn count(&self) -> usize {
        self.reservations.read().await.len()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::DateTime;

    use super::*;

    fn reservation(id: &str, state: &str, distance: i64) -> Reservation {
        let t = DateTime::parse_from_rfc3339("2024-05-01T10:00:00+05:00").unwrap();
        Reservation {
            id: id.to_string(),
            start_time: t,
            end_time: t + chrono::Duration::hours(1),
            state: state.to_string(),
            vehicle_distance: distance,
            state_update_time: t,
        }
    }

    #[tokio::test]
    async fn save_then_list() {
        let repo = InMemoryReservationRepository::new();
        repo.save(reservation("r1", "pending", 5)).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["r1"], reservation("r1", "pending", 5));
    }

    #[tokio::test]
    async fn duplicate_id_replaces_whole_record() {
        let repo = InMemoryReservationRepository::new();
        repo.save(reservation("r1", "pending", 5)).await.unwrap();

        let mut replacement = reservation("r1", "active", 1);
        replacement.end_time = replacement.start_time + chrono::Duration::minutes(10);
        repo.save(replacement.clone()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all["r1"], replacement);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn delete_removes_from_listing() {
        let repo = InMemoryReservationRepository::new();
        for id in ["a", "b", "c"] {
            repo.save(reservation(id, "pending", 0)).await.unwrap();
        }

        for id in ["a", "b", "c"] {
            let removed = repo.delete(id).await.unwrap();
            assert_eq!(removed.id, id);
            assert!(!repo.find_all().await.unwrap().contains_key(id));
        }
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn delete_unknown_returns_not_found_without_mutation() {
        let repo = InMemoryReservationRepository::new();
        repo.save(reservation("r1", "pending", 5)).await.unwrap();
        let before = repo.find_all().await.unwrap();

        let err = repo.delete("missing").await.unwrap_err();
        assert_eq!(
            err,
            DomainError::NotFound {
                entity: "Reservation",
                id: "missing".into()
            }
        );
        assert_eq!(err.to_string(), "Reservation missing not found");
        assert_eq!(repo.find_all().await.unwrap(), before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn snapshots_never_contain_partial_records() {
        let repo = Arc::new(InMemoryReservationRepository::new());
        let mut writers = Vec::new();

        for i in 0..200i64 {
            let repo = repo.clone();
            writers.push(tokio::spawn(async move {
                let id = format!("r{}", i % 20);
                repo.save(reservation(&id, &format!("state-{i}"), i))
                    .await
                    .unwrap();
            }));
        }

        let reader = {
            let repo = repo.clone();
            tokio::spawn(async move {
                let mut snapshots = Vec::new();
                for _ in 0..50 {
                    snapshots.push(repo.find_all().await.unwrap());
                    tokio::task::yield_now().await;
                }
                snapshots
            })
        };

        for w in writers {
            w.await.unwrap();
        }

        for snapshot in reader.await.unwrap() {
            for (id, r) in snapshot {
                assert_eq!(id, r.id);
                // Every field of a record comes from the same write.
                assert_eq!(r.state, format!("state-{}", r.vehicle_distance));
                assert_eq!(format!("r{}", r.vehicle_distance % 20), r.id);
            }
        }
        assert_eq!(repo.count().await, 20);
    }
}
