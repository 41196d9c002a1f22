//! External provider clients
//!
//! Each provider is wrapped in a capability enum resolved once at startup:
//! `Configured(client)` when the credential is present, `Unconfigured`
//! otherwise. Handlers match on the capability instead of re-checking the
//! environment per call.

pub mod groq;
pub mod mailer;

pub use groq::{GroqClient, Summarizer};
pub use mailer::{Mailer, SmtpMailer};
