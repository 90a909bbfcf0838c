//! Boundary to the Outlook message parser.
//!
//! Decoding the compound-file `.msg` format itself is the parser's job.
//! This crate only needs a [`ParsedMessage`] back, or an `io::Error`
//! explaining why none could be produced.

pub mod dump;

use std::io::Read;
use std::path::Path;

use crate::model::message::ParsedMessage;

/// Where the raw Outlook message comes from.
pub enum MsgSource<'a> {
    /// A `.msg` file on disk.
    File(&'a Path),
    /// An in-memory copy of the message.
    Bytes(&'a [u8]),
    /// Any readable stream. Read to the end before parsing.
    Reader(&'a mut dyn Read),
}

impl std::fmt::Debug for MsgSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Bytes(data) => write!(f, "Bytes({} bytes)", data.len()),
            Self::Reader(_) => f.write_str("Reader"),
        }
    }
}

/// A parser producing [`ParsedMessage`] values from raw input.
///
/// Only [`parse_bytes`](Self::parse_bytes) is required; file and stream
/// input are read fully and delegated to it.
pub trait MessageParser {
    fn parse_bytes(&self, data: &[u8]) -> std::io::Result<ParsedMessage>;

    fn parse_file(&self, path: &Path) -> std::io::Result<ParsedMessage> {
        let data = std::fs::read(path)?;
        self.parse_bytes(&data)
    }

    fn parse_reader(&self, reader: &mut dyn Read) -> std::io::Result<ParsedMessage> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.parse_bytes(&data)
    }

    /// Dispatch on the kind of source.
    fn parse(&self, source: MsgSource<'_>) -> std::io::Result<ParsedMessage> {
        match source {
            MsgSource::File(path) => self.parse_file(path),
            MsgSource::Bytes(data) => self.parse_bytes(data),
            MsgSource::Reader(reader) => self.parse_reader(reader),
        }
    }
}
