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

pub mod code;
pub mod detail;
pub mod error;
pub mod metadata;
pub mod status;
pub mod type_url;
pub mod well_known;
pub mod wire;

pub use code::{Code, code_name};
pub use detail::{DetailMessage, DetailValue, ErrorDetail, Registry};
pub use error::CodecError;
pub use metadata::Metadata;
pub use status::{Error, as_error, chain, code_of, error_is, is_wire_error, wrap_if_uncoded};
pub use type_url::{DEFAULT_TYPE_URL_PREFIX, type_name_from_url};
pub use wire::{WireDetail, WireError};
