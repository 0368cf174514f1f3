//! Stream sources configured for the viewer.
//!
//! - [`StreamDescriptor`]: one parsed, typed stream source with its label
//! - [`parse`]: turns the compact `channels` option into descriptors

mod descriptor;
mod label;
mod parser;

pub use descriptor::{StreamDescriptor, StreamKind, StreamSource};
pub use label::{hostname_of, shorten_id};
pub use parser::{ParseOutcome, TokenError, parse, parse_token, parse_with_diagnostics};
