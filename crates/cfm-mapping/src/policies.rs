//! Coercion failure policies

use serde::{Deserialize, Serialize};

/// Policy for handling text that cannot be coerced to a field's type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Abort the mapping pass on the first failure
    #[default]
    Strict,

    /// Leave the offending field out, record it, and continue
    Lenient,
}

impl CoercionPolicy {
    #[must_use]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}
