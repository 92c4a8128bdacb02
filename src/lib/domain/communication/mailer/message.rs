//! Rendered email message

/// One recipient's fully composed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// The recipient's address
    pub to: String,

    /// The recipient's display name, empty if unknown
    pub to_name: String,

    /// The sender of the email
    pub from: String,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub plain_body: String,

    /// The HTML body of the email, styles inlined
    pub html_body: String,
}
