#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod envelope;
pub mod error;
pub mod schema;

pub use envelope::codec::{EnvelopeCodec, SuccessCodec};
pub use envelope::{Envelope, ErrorBody, FailBody, Status, SuccessBody, matcher};
pub use error::{DecodeError, Error, JsonKind, Violation};
pub use schema::{AnySchema, BoolSchema, NumberSchema, PayloadSchema, SerdeSchema, StringSchema};
