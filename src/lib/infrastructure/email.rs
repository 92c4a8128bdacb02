//! Email assembly and the file-drop mailer

mod file;
mod message;

pub use file::FileMailer;
pub use message::build_message;
