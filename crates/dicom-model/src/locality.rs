use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a dataset's metadata column currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locality {
    /// Held by the distributed backend; operations are delegated.
    Remote,
    /// Materialized into the local process.
    Local,
}

impl Locality {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
