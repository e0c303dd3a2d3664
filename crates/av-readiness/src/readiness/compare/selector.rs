use serde::Serialize;
use std::fmt;

/// Identifier the dashboard uses for the statewide pseudo-unit.
pub const STATE_LEVEL_ID: &str = "state level";

const STATE_LEVEL_LABEL: &str = "State Average";

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "county", rename_all = "snake_case")]
pub enum AreaSelector {
    StateLevel,
    County(String),
}

impl AreaSelector {
    /// `"state level"` selects the state aggregate; anything else names a county.
    pub fn parse(id: &str) -> Self {
        if id == STATE_LEVEL_ID {
            Self::StateLevel
        } else {
            Self::County(id.to_string())
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::StateLevel => STATE_LEVEL_ID,
            Self::County(name) => name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::StateLevel => STATE_LEVEL_LABEL,
            Self::County(name) => name,
        }
    }
}

impl From<&str> for AreaSelector {
    fn from(id: &str) -> Self {
        Self::parse(id)
    }
}

impl fmt::Display for AreaSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
