//! Mailer module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::RenderedMessage;

/// Message transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Sends a rendered message
    ///
    /// # Arguments
    /// * `message` - The [`RenderedMessage`] to send; headers are built from
    ///   its address, name, sender and subject fields.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send(&self, message: &RenderedMessage) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &RenderedMessage) -> Result<(), MailerError>;
    }
}
