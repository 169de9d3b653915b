//! Folio domain events and email notifications.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`]: everything a write path can announce.
//! - [`NotificationDispatcher`]: background task that turns events into
//!   emails. Its `match` over [`DomainEvent`] is the complete dispatch table.
//! - [`delivery`]: the [`Mailer`] trait with SMTP and logging implementations.

pub mod bus;
pub mod delivery;
pub mod dispatcher;
pub mod templates;

pub use bus::{DomainEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailError, LogMailer, Mailer, OutgoingEmail, SmtpMailer};
pub use dispatcher::{DeliveryReport, DispatchConfig, NotificationDispatcher};
