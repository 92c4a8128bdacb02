//! File-drop mailer

use std::path::Path;

use async_trait::async_trait;
use lettre::{FileTransport, Transport};
use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError, RenderedMessage};

use super::build_message;

/// Writes every message as an `.eml` file into an outbox directory instead
/// of delivering it
#[derive(Debug, Clone)]
pub struct FileMailer {
    transport: FileTransport,
}

impl FileMailer {
    /// Creates a mailer writing into `outbox`, which must exist
    pub fn new(outbox: impl AsRef<Path>) -> Self {
        Self {
            transport: FileTransport::new(outbox),
        }
    }
}

#[async_trait]
impl Mailer for FileMailer {
    async fn send(&self, message: &RenderedMessage) -> Result<(), MailerError> {
        let email = build_message(message)?;

        let id = self.transport.send(&email).map_err(anyhow::Error::from)?;

        debug!(id = %id, to = %message.to, "message written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use crate::infrastructure::email::message::tests::rendered;

    use super::*;

    #[tokio::test]
    async fn test_writes_eml_file() -> TestResult {
        let outbox = tempfile::tempdir()?;
        let mailer = FileMailer::new(outbox.path());

        mailer.send(&rendered()).await?;

        let files = fs::read_dir(outbox.path())?.collect::<Result<Vec<_>, _>>()?;

        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path().extension().and_then(|e| e.to_str()),
            Some("eml")
        );

        let contents = fs::read_to_string(files[0].path())?;

        assert!(contents.contains("Subject: Fall"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_outbox_fails() {
        let mailer = FileMailer::new("/nonexistent/outbox");

        let result = mailer.send(&rendered()).await;

        assert!(matches!(result, Err(MailerError::UnknownError(_))));
    }
}
