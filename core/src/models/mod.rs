//! Request and response shapes for the Tx API.
//!
//! Field names are PascalCase on the wire. `Option` and empty `Vec` fields
//! are omitted when serializing; unknown properties in responses are ignored
//! so newer server versions keep deserializing.

pub mod common;
pub mod envelope;
pub mod formatter;
pub mod geocode;
pub mod index;
pub mod job;
pub mod matching;
pub mod parse;
pub mod professions;
pub mod resume;
pub mod skills;
