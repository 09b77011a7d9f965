//! Claim matching for paperverify.
//!
//! Each claim is compared with every reference value. The numerically closest
//! candidates form a window, label context orders the window, and the chosen
//! candidate's relative deviation decides the [`pv_core::Status`].

mod matcher;
mod policy;
pub mod score;

pub use matcher::{match_claims, Matcher};
pub use policy::{MatchPolicy, Ranking};
pub use score::{label_score, normalize_label, reference_haystack, relative_deviation_pct};
