//! Building MIME messages from rendered messages

use lettre::{
    message::{Mailbox, MultiPart},
    Address, Message,
};

use crate::domain::communication::mailer::{MailerError, RenderedMessage};

/// Builds a `multipart/alternative` message with the plain-text part first.
///
/// # Errors
/// [`MailerError::InvalidEmail`] if the recipient or sender address does not
/// parse.
pub fn build_message(message: &RenderedMessage) -> Result<Message, MailerError> {
    let address: Address = message
        .to
        .parse()
        .map_err(|_| MailerError::InvalidEmail(message.to.clone()))?;

    let name = (!message.to_name.is_empty()).then(|| message.to_name.clone());

    let from: Mailbox = message
        .from
        .parse()
        .map_err(|_| MailerError::InvalidEmail(message.from.clone()))?;

    let email = Message::builder()
        .from(from)
        .to(Mailbox::new(name, address))
        .subject(message.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            message.plain_body.clone(),
            message.html_body.clone(),
        ))
        .map_err(anyhow::Error::from)?;

    Ok(email)
}
