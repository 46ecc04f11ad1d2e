//! Core types shared by `form-server`: bounded buffers, fragment joining,
//! request classification, form-field extraction, wire constants, and errors.
//!
//! Nothing in this crate performs I/O. Every function operates on borrowed
//! byte slices and fixed-capacity buffers so the server can compose a response
//! with exactly one heap allocation.

pub mod buf;
pub mod error;
pub mod form;
pub mod fragment;
pub mod protocol;
pub mod request;

pub use buf::{append_bounded, ScratchBuf};
pub use error::{ConnectionError, FragmentError, SetupError};
pub use form::{find_param, ParamView};
pub use fragment::{join, join_into, total_length, FragmentList};
pub use request::{classify, Classification};
