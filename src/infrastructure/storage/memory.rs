//! In-memory repository provider for development and testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::advocate::{Advocate, AdvocateRepository};
use crate::domain::booking::{Booking, BookingFilter, BookingRepository};
use crate::domain::payment::{PaymentRecord, PaymentRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult};
use crate::shared::time::ranges_overlap;

/// In-memory storage for development and testing
pub struct InMemoryRepositories {
    users: DashMap<Uuid, User>,
    advocates: DashMap<Uuid, Advocate>,
    bookings: DashMap<Uuid, Booking>,
    payments: DashMap<Uuid, PaymentRecord>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            advocates: DashMap::new(),
            bookings: DashMap::new(),
            payments: DashMap::new(),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn advocates(&self) -> &dyn AdvocateRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn payments(&self) -> &dyn PaymentRepository {
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryRepositories {
    async fn save(&self, user: User) -> DomainResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(DomainError::Conflict(format!("User {} exists", user.id)));
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }
}

#[async_trait]
impl AdvocateRepository for InMemoryRepositories {
    async fn save(&self, advocate: Advocate) -> DomainResult<()> {
        if self.advocates.contains_key(&advocate.id) {
            return Err(DomainError::Conflict(format!(
                "Advocate {} exists",
                advocate.id
            )));
        }
        self.advocates.insert(advocate.id, advocate);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Advocate>> {
        Ok(self.advocates.get(&id).map(|a| a.clone()))
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepositories {
    async fn create(&self, booking: Booking) -> DomainResult<()> {
        if self.bookings.contains_key(&booking.id) {
            return Err(DomainError::Conflict(format!(
                "Booking {} exists",
                booking.id
            )));
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(DomainError::not_found("Booking", booking.id));
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn has_overlap(
        &self,
        advocate_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<bool> {
        Ok(self.bookings.iter().any(|entry| {
            let b = entry.value();
            b.advocate_id == advocate_id
                && b.blocks_slot()
                && ranges_overlap(b.slot.start, b.slot.end, start, end)
        }))
    }

    async fn list(
        &self,
        filter: BookingFilter,
        page: u64,
        limit: u64,
    ) -> DomainResult<(Vec<Booking>, u64)> {
        let mut matches: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| {
                let b = entry.value();
                filter.user_id.is_none_or(|id| b.user_id == id)
                    && filter.advocate_id.is_none_or(|id| b.advocate_id == id)
            })
            .map(|entry| entry.value().clone())
            .collect();

        matches.sort_by(|a, b| b.slot.start.cmp(&a.slot.start));

        let total = matches.len() as u64;
        let skip = page.saturating_sub(1).saturating_mul(limit) as usize;
        let page_items = matches
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .collect();
        Ok((page_items, total))
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepositories {
    async fn create(&self, payment: PaymentRecord) -> DomainResult<()> {
        if self.payments.contains_key(&payment.id) {
            return Err(DomainError::Conflict(format!(
                "Payment {} exists",
                payment.id
            )));
        }
        self.payments.insert(payment.id, payment);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<PaymentRecord>> {
        Ok(self.payments.get(&id).map(|p| p.clone()))
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> DomainResult<Vec<PaymentRecord>> {
        Ok(self
            .payments
            .iter()
            .filter(|entry| entry.value().booking_id == Some(booking_id))
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Slot;
    use chrono::TimeZone;

    fn t(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn overlap_ignores_cancelled_bookings() {
        let repos = InMemoryRepositories::new();
        let advocate_id = Uuid::new_v4();

        let mut booking = Booking::new(
            Uuid::new_v4(),
            advocate_id,
            Slot::new(t(10, 0), t(10, 30)).unwrap(),
            0,
            "INR",
        );
        booking.cancel().unwrap();
        repos.bookings().create(booking).await.unwrap();

        let clash = repos
            .bookings()
            .has_overlap(advocate_id, t(10, 0), t(10, 30))
            .await
            .unwrap();
        assert!(!clash);
    }

    #[tokio::test]
    async fn list_pages_newest_slot_first() {
        let repos = InMemoryRepositories::new();
        let user_id = Uuid::new_v4();
        let advocate_id = Uuid::new_v4();

        for hour in 9..12 {
            let booking = Booking::new(
                user_id,
                advocate_id,
                Slot::new(t(hour, 0), t(hour, 30)).unwrap(),
                0,
                "INR",
            );
            repos.bookings().create(booking).await.unwrap();
        }

        let (items, total) = repos
            .bookings()
            .list(
                BookingFilter {
                    user_id: Some(user_id),
                    advocate_id: None,
                },
                1,
                2,
            )
            .await
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].slot.start, t(11, 0));
        assert_eq!(items[1].slot.start, t(10, 0));
    }
}
