//! YAML recipient lists

use tracing::debug;

use crate::domain::campaigns::{Recipient, RecipientListError, RecipientLoader};

/// Parses a YAML sequence of mappings, one per recipient
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRecipientLoader;

impl RecipientLoader for YamlRecipientLoader {
    fn parse(&self, source: &[u8]) -> Result<Vec<Recipient>, RecipientListError> {
        if source.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let recipients: Option<Vec<Recipient>> = serde_yaml::from_slice(source).map_err(|e| {
            debug!("serde_yaml::Error -> RecipientListError");

            RecipientListError::Invalid(e.to_string())
        })?;

        let recipients = recipients.unwrap_or_default();

        if let Some(index) = recipients.iter().position(|r| !r.has_email()) {
            return Err(RecipientListError::MissingEmail { index });
        }

        Ok(recipients)
    }
}
