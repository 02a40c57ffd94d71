//! Default event subscribers
//!
//! One subscriber per event type, mirroring the fanout contract: booking
//! lifecycle events email the parties and push realtime messages; user
//! lifecycle events send the welcome email and track last-login state.
//!
//! Every outbound attempt is individually fire-and-log — a failed email to
//! one party never prevents the notification to the other.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Booking, BookingStatus, RepositoryProvider, User};

use super::event_bus::{EventSubscriber, SharedEventBus};
use super::events::Event;
use super::ports::{EmailMessage, EmailSender, LastLoginStore, NotifyError, RealtimeSender};

/// Register the production subscriber set in its canonical order.
pub fn register_default_subscribers(
    bus: &SharedEventBus,
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn EmailSender>,
    realtime: Arc<dyn RealtimeSender>,
    last_login: Arc<dyn LastLoginStore>,
) {
    bus.subscribe(Arc::new(BookingCreatedSubscriber {
        repos: repos.clone(),
        mailer: mailer.clone(),
        realtime: realtime.clone(),
    }));
    bus.subscribe(Arc::new(PaymentSucceededSubscriber {
        repos: repos.clone(),
        mailer: mailer.clone(),
        realtime: realtime.clone(),
    }));
    bus.subscribe(Arc::new(BookingConfirmedSubscriber {
        repos: repos.clone(),
        realtime: realtime.clone(),
    }));
    bus.subscribe(Arc::new(BookingCancelledSubscriber {
        repos,
        mailer: mailer.clone(),
        realtime,
    }));
    bus.subscribe(Arc::new(UserCreatedSubscriber { mailer }));
    bus.subscribe(Arc::new(UserLoggedInSubscriber { last_login }));
}

// ── Lookup helpers ─────────────────────────────────────────────

async fn find_user(repos: &dyn RepositoryProvider, user_id: Uuid) -> Option<User> {
    match repos.users().find_by_id(user_id).await {
        Ok(user) => user,
        Err(err) => {
            warn!(%user_id, error = %err, "User lookup failed");
            None
        }
    }
}

/// Resolve the account user behind an advocate profile. Notifications to
/// the advocate are addressed to this user.
async fn find_advocate_user(repos: &dyn RepositoryProvider, advocate_id: Uuid) -> Option<User> {
    let advocate = match repos.advocates().find_by_id(advocate_id).await {
        Ok(Some(advocate)) => advocate,
        Ok(None) => return None,
        Err(err) => {
            warn!(%advocate_id, error = %err, "Advocate lookup failed");
            return None;
        }
    };
    find_user(repos, advocate.user_id).await
}

async fn send_email(mailer: &dyn EmailSender, message: EmailMessage) {
    let to = message.to.clone();
    if let Err(err) = mailer.send(message).await {
        warn!(to, error = %err, "Email notification failed");
    }
}

async fn push_to_user(realtime: &dyn RealtimeSender, user_id: Uuid, payload: serde_json::Value) {
    if let Err(err) = realtime.send_to_user(user_id, payload).await {
        warn!(%user_id, error = %err, "Realtime notification failed");
    }
}

// ── booking.created ────────────────────────────────────────────

struct BookingCreatedSubscriber {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn EmailSender>,
    realtime: Arc<dyn RealtimeSender>,
}

#[async_trait]
impl EventSubscriber for BookingCreatedSubscriber {
    fn name(&self) -> &'static str {
        "booking_created"
    }

    fn handles(&self, event: &Event) -> bool {
        matches!(event, Event::BookingCreated(_))
    }

    async fn handle(&self, event: Event) -> Result<(), NotifyError> {
        let Event::BookingCreated(booking) = event else {
            return Ok(());
        };
        info!(booking_id = %booking.id, advocate_id = %booking.advocate_id, "Event: booking.created");

        if let Some(user) = find_user(self.repos.as_ref(), booking.user_id).await {
            send_email(
                self.mailer.as_ref(),
                EmailMessage::new(
                    &user.email,
                    "Booking received - QuickLegal",
                    format!(
                        "Your booking (id: {}) is created and pending confirmation.",
                        booking.id
                    ),
                ),
            )
            .await;
        }

        let advocate_user = find_advocate_user(self.repos.as_ref(), booking.advocate_id).await;
        if let Some(advocate_user) = &advocate_user {
            send_email(
                self.mailer.as_ref(),
                EmailMessage::new(
                    &advocate_user.email,
                    "New booking request - QuickLegal",
                    format!(
                        "You have a new booking request (id: {}). Please confirm or reject it.",
                        booking.id
                    ),
                ),
            )
            .await;

            push_to_user(
                self.realtime.as_ref(),
                advocate_user.id,
                json!({
                    "type": "booking.request",
                    "booking_id": booking.id,
                    "slot": {
                        "start": booking.slot.start,
                        "end": booking.slot.end,
                    },
                    "message": "New booking request",
                }),
            )
            .await;
        }

        Ok(())
    }
}

// ── payment.succeeded ──────────────────────────────────────────

struct PaymentSucceededSubscriber {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn EmailSender>,
    realtime: Arc<dyn RealtimeSender>,
}

impl PaymentSucceededSubscriber {
    /// The confirmation flow normally updates the booking before this
    /// event fires; a payment arriving through the standalone simulated
    /// path still has to move the booking forward.
    async fn ensure_confirmed(
        &self,
        mut booking: Booking,
        payment_id: Uuid,
    ) -> Result<Booking, NotifyError> {
        if booking.status != BookingStatus::Confirmed {
            booking.confirm(payment_id);
            self.repos
                .bookings()
                .update(booking.clone())
                .await
                .map_err(|e| NotifyError::Storage(e.to_string()))?;
        }
        Ok(booking)
    }
}

#[async_trait]
impl EventSubscriber for PaymentSucceededSubscriber {
    fn name(&self) -> &'static str {
        "payment_succeeded"
    }

    fn handles(&self, event: &Event) -> bool {
        matches!(event, Event::PaymentSucceeded(_))
    }

    async fn handle(&self, event: Event) -> Result<(), NotifyError> {
        let Event::PaymentSucceeded(payment) = event else {
            return Ok(());
        };
        info!(payment_id = %payment.id, booking_id = ?payment.booking_id, "Event: payment.succeeded");

        let Some(booking_id) = payment.booking_id else {
            return Ok(());
        };

        let booking = match self.repos.bookings().find_by_id(booking_id).await {
            Ok(Some(booking)) => booking,
            Ok(None) => {
                warn!(%booking_id, "payment.succeeded: booking not found");
                return Ok(());
            }
            Err(err) => {
                warn!(%booking_id, error = %err, "payment.succeeded: booking lookup failed");
                return Ok(());
            }
        };

        let booking = self.ensure_confirmed(booking, payment.id).await?;

        if let Some(user) = find_user(self.repos.as_ref(), booking.user_id).await {
            send_email(
                self.mailer.as_ref(),
                EmailMessage::new(
                    &user.email,
                    "Payment successful - Booking confirmed",
                    format!(
                        "Your payment for booking {} was successful. Booking is confirmed.",
                        booking.id
                    ),
                ),
            )
            .await;
        }

        let advocate_user = find_advocate_user(self.repos.as_ref(), booking.advocate_id).await;
        if let Some(advocate_user) = &advocate_user {
            send_email(
                self.mailer.as_ref(),
                EmailMessage::new(
                    &advocate_user.email,
                    "Booking confirmed",
                    format!("Booking {} has been confirmed and paid.", booking.id),
                ),
            )
            .await;
        }

        let confirmed = json!({ "type": "booking.confirmed", "booking_id": booking.id });
        push_to_user(self.realtime.as_ref(), booking.user_id, confirmed.clone()).await;
        if let Some(advocate_user) = advocate_user {
            push_to_user(self.realtime.as_ref(), advocate_user.id, confirmed).await;
        }

        Ok(())
    }
}

// ── booking.confirmed ──────────────────────────────────────────

struct BookingConfirmedSubscriber {
    repos: Arc<dyn RepositoryProvider>,
    realtime: Arc<dyn RealtimeSender>,
}

#[async_trait]
impl EventSubscriber for BookingConfirmedSubscriber {
    fn name(&self) -> &'static str {
        "booking_confirmed"
    }

    fn handles(&self, event: &Event) -> bool {
        matches!(event, Event::BookingConfirmed(_))
    }

    async fn handle(&self, event: Event) -> Result<(), NotifyError> {
        let Event::BookingConfirmed(booking) = event else {
            return Ok(());
        };
        info!(booking_id = %booking.id, "Event: booking.confirmed");

        let payload = json!({ "type": "booking.confirmed", "booking_id": booking.id });
        push_to_user(self.realtime.as_ref(), booking.user_id, payload.clone()).await;
        if let Some(advocate_user) =
            find_advocate_user(self.repos.as_ref(), booking.advocate_id).await
        {
            push_to_user(self.realtime.as_ref(), advocate_user.id, payload).await;
        }

        Ok(())
    }
}

// ── booking.cancelled ──────────────────────────────────────────

struct BookingCancelledSubscriber {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn EmailSender>,
    realtime: Arc<dyn RealtimeSender>,
}

#[async_trait]
impl EventSubscriber for BookingCancelledSubscriber {
    fn name(&self) -> &'static str {
        "booking_cancelled"
    }

    fn handles(&self, event: &Event) -> bool {
        matches!(event, Event::BookingCancelled(_))
    }

    async fn handle(&self, event: Event) -> Result<(), NotifyError> {
        let Event::BookingCancelled(booking) = event else {
            return Ok(());
        };
        info!(booking_id = %booking.id, "Event: booking.cancelled");

        let payload = json!({ "type": "booking.cancelled", "booking_id": booking.id });
        push_to_user(self.realtime.as_ref(), booking.user_id, payload.clone()).await;
        if let Some(advocate_user) =
            find_advocate_user(self.repos.as_ref(), booking.advocate_id).await
        {
            push_to_user(self.realtime.as_ref(), advocate_user.id, payload).await;
        }

        if let Some(user) = find_user(self.repos.as_ref(), booking.user_id).await {
            send_email(
                self.mailer.as_ref(),
                EmailMessage::new(
                    &user.email,
                    "Booking cancelled",
                    format!("Your booking {} was cancelled.", booking.id),
                ),
            )
            .await;
        }

        Ok(())
    }
}

// ── user.created ───────────────────────────────────────────────

struct UserCreatedSubscriber {
    mailer: Arc<dyn EmailSender>,
}

#[async_trait]
impl EventSubscriber for UserCreatedSubscriber {
    fn name(&self) -> &'static str {
        "user_created"
    }

    fn handles(&self, event: &Event) -> bool {
        matches!(event, Event::UserCreated(_))
    }

    async fn handle(&self, event: Event) -> Result<(), NotifyError> {
        let Event::UserCreated(user) = event else {
            return Ok(());
        };
        info!(user_id = %user.user_id, "Event: user.created");

        send_email(
            self.mailer.as_ref(),
            EmailMessage::new(
                &user.email,
                "Welcome to QuickLegal",
                "Thanks for signing up for QuickLegal. You can now search advocates, \
                 book consultations, and generate documents.",
            ),
        )
        .await;

        Ok(())
    }
}

// ── user.logged_in ─────────────────────────────────────────────

struct UserLoggedInSubscriber {
    last_login: Arc<dyn LastLoginStore>,
}

#[async_trait]
impl EventSubscriber for UserLoggedInSubscriber {
    fn name(&self) -> &'static str {
        "user_logged_in"
    }

    fn handles(&self, event: &Event) -> bool {
        matches!(event, Event::UserLoggedIn(_))
    }

    async fn handle(&self, event: Event) -> Result<(), NotifyError> {
        let Event::UserLoggedIn(login) = event else {
            return Ok(());
        };
        info!(user_id = %login.user_id, "Event: user.logged_in");

        if let Err(err) = self.last_login.record_login(login.user_id).await {
            warn!(user_id = %login.user_id, error = %err, "Failed to record last login");
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Advocate, Slot};
    use crate::infrastructure::storage::InMemoryRepositories;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    /// Email double recording every attempt; can fail for chosen recipients.
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<EmailMessage>>,
        pub fail_for: Option<String>,
    }

    impl RecordingMailer {
        pub fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }
    }

    #[async_trait]
    impl EmailSender for RecordingMailer {
        async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
            let failing = self.fail_for.as_deref() == Some(message.to.as_str());
            self.sent.lock().unwrap().push(message);
            if failing {
                return Err(NotifyError::Email("smtp unavailable".to_string()));
            }
            Ok(())
        }
    }

    pub struct RecordingRealtime {
        pub sent: Mutex<Vec<(Uuid, serde_json::Value)>>,
    }

    impl RecordingRealtime {
        pub fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RealtimeSender for RecordingRealtime {
        async fn send_to_user(
            &self,
            user_id: Uuid,
            payload: serde_json::Value,
        ) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push((user_id, payload));
            Ok(())
        }
    }

    struct Fixture {
        repos: Arc<InMemoryRepositories>,
        user: User,
        advocate_user: User,
        advocate: Advocate,
    }

    async fn fixture() -> Fixture {
        let repos = Arc::new(InMemoryRepositories::new());
        let user = User::new("Asha", "asha@example.com");
        let advocate_user = User::new("Ravi", "ravi@example.com");
        let advocate = Advocate::new(advocate_user.id, 50_000, "INR");
        repos.users().save(user.clone()).await.unwrap();
        repos.users().save(advocate_user.clone()).await.unwrap();
        repos.advocates().save(advocate.clone()).await.unwrap();
        Fixture {
            repos,
            user,
            advocate_user,
            advocate,
        }
    }

    fn booking_for(f: &Fixture) -> Booking {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        Booking::new(
            f.user.id,
            f.advocate.id,
            Slot::new(start, end).unwrap(),
            50_000,
            "INR",
        )
    }

    #[tokio::test]
    async fn booking_created_notifies_both_parties_once() {
        let f = fixture().await;
        let mailer = Arc::new(RecordingMailer::new());
        let realtime = Arc::new(RecordingRealtime::new());
        let sub = BookingCreatedSubscriber {
            repos: f.repos.clone(),
            mailer: mailer.clone(),
            realtime: realtime.clone(),
        };

        sub.handle(Event::BookingCreated(booking_for(&f)))
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, f.user.email);
        assert_eq!(sent[1].to, f.advocate_user.email);

        let pushed = realtime.sent.lock().unwrap();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].0, f.advocate_user.id);
        assert_eq!(pushed[0].1["type"], "booking.request");
    }

    #[tokio::test]
    async fn advocate_email_failure_does_not_block_user_email() {
        let f = fixture().await;
        let mailer = Arc::new(RecordingMailer {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(f.advocate_user.email.clone()),
        });
        let realtime = Arc::new(RecordingRealtime::new());
        let sub = BookingCreatedSubscriber {
            repos: f.repos.clone(),
            mailer: mailer.clone(),
            realtime: realtime.clone(),
        };

        sub.handle(Event::BookingCreated(booking_for(&f)))
            .await
            .unwrap();

        // Both attempts were made and the realtime push still went out
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
        assert_eq!(realtime.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn payment_succeeded_confirms_unconfirmed_booking() {
        let f = fixture().await;
        let booking = booking_for(&f);
        f.repos.bookings().create(booking.clone()).await.unwrap();

        let mailer = Arc::new(RecordingMailer::new());
        let realtime = Arc::new(RecordingRealtime::new());
        let sub = PaymentSucceededSubscriber {
            repos: f.repos.clone(),
            mailer: mailer.clone(),
            realtime: realtime.clone(),
        };

        let payment = crate::domain::PaymentRecord::succeeded(
            Some(booking.id),
            f.user.id,
            50_000,
            "INR",
            "simulated",
            None,
        );
        sub.handle(Event::PaymentSucceeded(payment.clone()))
            .await
            .unwrap();

        let stored = f
            .repos
            .bookings()
            .find_by_id(booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(stored.payment_id, Some(payment.id));
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
        assert_eq!(realtime.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn payment_without_booking_reference_is_ignored() {
        let f = fixture().await;
        let mailer = Arc::new(RecordingMailer::new());
        let realtime = Arc::new(RecordingRealtime::new());
        let sub = PaymentSucceededSubscriber {
            repos: f.repos.clone(),
            mailer: mailer.clone(),
            realtime: realtime.clone(),
        };

        let payment =
            crate::domain::PaymentRecord::succeeded(None, f.user.id, 1_000, "INR", "simulated", None);
        sub.handle(Event::PaymentSucceeded(payment)).await.unwrap();

        assert!(mailer.sent.lock().unwrap().is_empty());
        assert!(realtime.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancellation_pushes_both_and_emails_user() {
        let f = fixture().await;
        let mailer = Arc::new(RecordingMailer::new());
        let realtime = Arc::new(RecordingRealtime::new());
        let sub = BookingCancelledSubscriber {
            repos: f.repos.clone(),
            mailer: mailer.clone(),
            realtime: realtime.clone(),
        };

        let mut booking = booking_for(&f);
        booking.cancel().unwrap();
        sub.handle(Event::BookingCancelled(booking)).await.unwrap();

        assert_eq!(realtime.sent.lock().unwrap().len(), 2);
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, f.user.email);
    }

    #[tokio::test]
    async fn welcome_email_goes_to_new_user() {
        let mailer = Arc::new(RecordingMailer::new());
        let sub = UserCreatedSubscriber {
            mailer: mailer.clone(),
        };

        sub.handle(Event::UserCreated(crate::notifications::UserCreatedEvent {
            user_id: Uuid::new_v4(),
            email: "new@example.com".to_string(),
        }))
        .await
        .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Welcome to QuickLegal");
    }
}
