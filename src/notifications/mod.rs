//! Outbound customer messages sent when a tab moves through the kitchen.

use thiserror::Error;

use crate::domain::order::OrderStatus;

pub mod ticketz;

#[cfg(test)]
pub mod mock;

pub use ticketz::TicketzSender;

/// Errors raised while handing a message to the delivery channel.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("no async runtime available to deliver the message")]
    NoRuntime,
    #[error("delivery request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("delivery rejected with status {0}")]
    Rejected(u16),
}

/// Channel that delivers a text message to a phone number.
///
/// Delivery is best effort: callers log failures and carry on.
pub trait NotificationSender: Send + Sync {
    fn send(&self, phone: &str, body: &str) -> Result<(), NotificationError>;
}

/// Sender used when no messaging gateway is configured; the message is only
/// written to the log.
#[derive(Debug, Default, Clone)]
pub struct LogSender;

impl NotificationSender for LogSender {
    fn send(&self, phone: &str, body: &str) -> Result<(), NotificationError> {
        log::info!("Simulated message to {phone}: {body}");
        Ok(())
    }
}

/// Message sent to the customer when their tab enters `status`.
///
/// `None` for statuses that do not notify.
pub fn status_message(status: OrderStatus, customer_name: &str, order_id: i32) -> Option<String> {
    match status {
        OrderStatus::InProgress => Some(format!(
            "Hi {customer_name}, your order #{order_id} is being prepared!"
        )),
        OrderStatus::Ready => Some(format!(
            "Good news, {customer_name}! Your order #{order_id} is ready to be served or picked up."
        )),
        OrderStatus::Delivered => Some(format!(
            "Your order #{order_id} has been delivered. Enjoy your meal!"
        )),
        _ => None,
    }
}
