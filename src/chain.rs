use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network a mint targets. Decides which form fields exist and which rules apply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chain {
    #[default]
    #[serde(rename = "BSC")]
    Bsc,
    #[serde(rename = "BASE")]
    Base,
    #[serde(rename = "SOL")]
    Sol,
    #[serde(rename = "SUI")]
    Sui,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown chain '{0}', expected one of BSC, BASE, SOL, SUI")]
pub struct UnknownChain(pub String);

impl Chain {
    pub const ALL: [Chain; 4] = [Chain::Bsc, Chain::Base, Chain::Sol, Chain::Sui];

    pub fn tag(&self) -> &'static str {
        match self {
            Chain::Bsc => "BSC",
            Chain::Base => "BASE",
            Chain::Sol => "SOL",
            Chain::Sui => "SUI",
        }
    }

    /// EVM chains take a hex contract address.
    pub fn is_evm(&self) -> bool {
        matches!(self, Chain::Bsc | Chain::Base)
    }

    /// Chains minted by collection id + stage rather than by contract address.
    pub fn uses_collection(&self) -> bool {
        matches!(self, Chain::Sui)
    }

    pub fn quantity_range(&self) -> RangeInclusive<u32> {
        match self {
            Chain::Sui => 1..=100,
            Chain::Bsc | Chain::Base | Chain::Sol => 1..=50,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BSC" => Ok(Chain::Bsc),
            "BASE" => Ok(Chain::Base),
            "SOL" => Ok(Chain::Sol),
            "SUI" => Ok(Chain::Sui),
            _ => Err(UnknownChain(s.to_string())),
        }
    }
}
