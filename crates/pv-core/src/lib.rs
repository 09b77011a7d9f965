#![deny(missing_docs)]
#![doc = "Core data model and error types for paperverify: claims, reference values and verdicts."]

pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
/// Canonical JSON helpers.
pub mod serde;
mod types;

pub use errors::{ErrorInfo, VerifyError};
pub use hash::stable_hash_string;
pub use crate::serde::{from_json_slice, to_canonical_json_bytes, to_canonical_json_string};
pub use types::{Claim, ReferenceValue, Status, Verdict};
