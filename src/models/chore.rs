//! Chore tier model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pay tier of a chore. Tier A chores are the most demanding and pay the
/// most; tier C covers basic self-care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChoreTier {
    /// Highest tier.
    A,
    /// Middle tier.
    B,
    /// Base tier.
    C,
}

impl ChoreTier {
    /// All tiers, highest first.
    pub const ALL: [ChoreTier; 3] = [ChoreTier::A, ChoreTier::B, ChoreTier::C];
}

impl fmt::Display for ChoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = match self {
            ChoreTier::A => "A",
            ChoreTier::B => "B",
            ChoreTier::C => "C",
        };
        f.write_str(tier)
    }
}
