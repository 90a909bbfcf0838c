//! Export converted emails: a plain-text rendering and the binary resources.

pub mod attachment;
pub mod text;
