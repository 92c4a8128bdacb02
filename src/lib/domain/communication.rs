//! Hand-off of rendered messages to a transport

pub mod mailer;
