//! Sending a whole campaign through a mailer

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    communication::mailer::{Mailer, MailerError},
    rendering::TemplateEngine,
    storage::Storage,
};

use super::{errors::RenderMessageError, Campaign, CampaignService};

/// What to do when one recipient's message fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next recipient
    #[default]
    Continue,

    /// Stop at the first failure
    Abort,
}

/// Why a recipient was not sent to
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The message could not be rendered
    #[error(transparent)]
    Render(#[from] RenderMessageError),

    /// The mailer rejected the message
    #[error("could not send message")]
    Send(#[source] MailerError),
}

/// A recipient that was not sent to
#[derive(Debug)]
pub struct DispatchFailure {
    /// The recipient index
    pub index: usize,

    /// What went wrong
    pub error: DispatchError,
}

/// Outcome of a dispatch run
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Number of messages handed to the mailer successfully
    pub sent: usize,

    /// Recipients that failed, in send order
    pub failures: Vec<DispatchFailure>,

    /// Whether the run stopped before reaching every recipient
    pub aborted: bool,
}

impl DispatchReport {
    /// Returns `true` if every recipient was sent to
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.aborted
    }
}

/// Renders every recipient of `campaign` in order and hands each message to
/// `mailer`.
pub async fn dispatch<S, E, M>(
    service: &CampaignService<S, E>,
    campaign: &Campaign<E::Template>,
    mailer: &M,
    policy: FailurePolicy,
) -> DispatchReport
where
    S: Storage,
    E: TemplateEngine,
    M: Mailer,
{
    let mut report = DispatchReport::default();

    for index in 0..campaign.len() {
        let result = match service.render_message(campaign, index) {
            Ok(message) => mailer.send(&message).await.map_err(DispatchError::Send),
            Err(e) => Err(DispatchError::from(e)),
        };

        match result {
            Ok(()) => report.sent += 1,
            Err(error) => {
                warn!(index, error = %error, "recipient failed");

                report.failures.push(DispatchFailure { index, error });

                if policy == FailurePolicy::Abort {
                    report.aborted = index + 1 < campaign.len();
                    break;
                }
            }
        }
    }

    info!(
        sent = report.sent,
        failed = report.failures.len(),
        "campaign dispatched"
    );

    report
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        domain::{campaigns::CampaignConfig, communication::mailer::tests::MockMailer},
        infrastructure::{
            default_html_pipeline, default_loaders, rendering::HandlebarsEngine,
            storage::MemoryStorage,
        },
    };

    use super::*;

    const RECIPIENTS: &str = "\
- email: a@x.com
  username: A
- email: b@x.com
  username: B
- email: c@x.com
  username: C
";

    fn service() -> CampaignService<MemoryStorage, HandlebarsEngine> {
        let storage = MemoryStorage::new()
            .with_file("content/fall.md", "---\nsubject: Fall\n---\nHello {{User.username}}")
            .with_file("lists/customers.yml", RECIPIENTS);

        CampaignService::new(
            CampaignConfig::new("content", "lists", "layouts"),
            Arc::new(storage),
            Arc::new(HandlebarsEngine::new()),
            default_loaders(),
            default_html_pipeline(),
        )
    }

    #[tokio::test]
    async fn test_dispatch_sends_in_order() -> TestResult {
        let service = service();
        let campaign = service.load_campaign("fall", "customers")?;

        let mut mailer = MockMailer::new();
        let mut seq = mockall::Sequence::new();

        for to in ["a@x.com", "b@x.com", "c@x.com"] {
            mailer
                .expect_send()
                .times(1)
                .in_sequence(&mut seq)
                .withf(move |message| message.to == to && message.subject == "Fall")
                .returning(|_| Ok(()));
        }

        let report = dispatch(&service, &campaign, &mailer, FailurePolicy::Continue).await;

        assert_eq!(report.sent, 3);
        assert!(report.is_success());

        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_continues_past_failures() -> TestResult {
        let service = service();
        let campaign = service.load_campaign("fall", "customers")?;

        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(3)
            .returning(|message| match message.to.as_str() {
                "b@x.com" => Err(MailerError::UnknownError(anyhow::anyhow!("refused"))),
                _ => Ok(()),
            });

        let report = dispatch(&service, &campaign, &mailer, FailurePolicy::Continue).await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert!(!report.aborted);
        assert!(!report.is_success());

        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_aborts_on_first_failure() -> TestResult {
        let service = service();
        let campaign = service.load_campaign("fall", "customers")?;

        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailerError::InvalidEmail("a@x.com".to_string())));

        let report = dispatch(&service, &campaign, &mailer, FailurePolicy::Abort).await;

        assert_eq!(report.sent, 0);
        assert_eq!(report.failures.len(), 1);
        assert!(report.aborted);

        Ok(())
    }

    #[tokio::test]
    async fn test_failure_on_last_recipient_is_not_an_abort() -> TestResult {
        let service = service();
        let campaign = service.load_campaign("fall", "customers")?;

        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(3)
            .returning(|message| match message.to.as_str() {
                "c@x.com" => Err(MailerError::UnknownError(anyhow::anyhow!("refused"))),
                _ => Ok(()),
            });

        let report = dispatch(&service, &campaign, &mailer, FailurePolicy::Abort).await;

        assert_eq!(report.sent, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 2);
        assert!(!report.aborted);

        Ok(())
    }
}
