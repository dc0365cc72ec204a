//! Synchronous API client core for the Tx resume and job parsing service.
//!
//! # Overview
//! Builds `HttpRequest` values and reads `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, so the core stays deterministic and testable.
//!
//! # Design
//! - `TxClient` holds credentials, a `DataCenter` and reporting options, and
//!   nothing else. Each operation is split into `build_*` and `read_*`.
//! - Every response is an `{Info, Value}` envelope. Success-class codes
//!   (`Success`, `WarningsFoundDuringParsing`, `PossibleTruncationFromTimeout`,
//!   `SomeErrors`) yield the value; anything else becomes a `TxError::Api`.
//! - Optional scalars the server distinguishes from "unset" are wrapped in
//!   `OptionalValue`, which travels as `{"Value": ...}` and is omitted when
//!   absent.
//! - Integer fields accept JSON floats (`3.0`), and enums travel under their
//!   wire names (see `codec`).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod codec;
pub mod data_center;
pub mod document;
pub mod error;
pub mod http;
pub mod models;
pub mod primitive;

pub use client::TxClient;
pub use data_center::DataCenter;
pub use document::Document;
pub use error::{ApiFailure, FailedStage, FailureKind, TxError, UsableResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use primitive::OptionalValue;
