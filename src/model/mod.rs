//! Data model: parsed Outlook messages on one side, the target email on the other.

pub mod address;
pub mod attachment;
pub mod email;
pub mod message;
pub(crate) mod payload;
