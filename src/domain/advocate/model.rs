//! Advocate domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::time::{is_within_availability, AvailabilityWindow};

/// A lawyer offering consultation slots
#[derive(Debug, Clone)]
pub struct Advocate {
    pub id: Uuid,
    /// Account user behind this advocate profile; notifications are
    /// addressed to this user.
    pub user_id: Uuid,
    /// Default consultation fee in minor currency units
    pub consultation_fee: i64,
    pub currency: String,
    /// Weekly recurring availability windows
    pub availability: Vec<AvailabilityWindow>,
    pub bio: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Advocate {
    pub fn new(user_id: Uuid, consultation_fee: i64, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            consultation_fee,
            currency: currency.into(),
            availability: Vec::new(),
            bio: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Whether the instant falls inside any declared availability window.
    /// An empty declaration means "no published schedule", not "never".
    pub fn is_available_at(&self, at: DateTime<Utc>) -> bool {
        if self.availability.is_empty() {
            return true;
        }
        self.availability
            .iter()
            .any(|w| is_within_availability(w, at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn no_schedule_means_always_available() {
        let adv = Advocate::new(Uuid::new_v4(), 50_000, "INR");
        let any_time = Utc.with_ymd_and_hms(2025, 6, 2, 3, 0, 0).unwrap();
        assert!(adv.is_available_at(any_time));
    }

    #[test]
    fn availability_windows_are_honored() {
        let mut adv = Advocate::new(Uuid::new_v4(), 50_000, "INR");
        adv.availability.push(AvailabilityWindow {
            day_of_week: 1, // Monday
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
        });

        let monday_morning = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let monday_night = Utc.with_ymd_and_hms(2025, 6, 2, 22, 0, 0).unwrap();
        assert!(adv.is_available_at(monday_morning));
        assert!(!adv.is_available_at(monday_night));
    }
}
