use serde::{Deserialize, Serialize};

/// a traveler's stance toward one accessibility-relevant street
/// feature. the wire alphabet is `{-1, 0, 1, 2}`: forbid, dislike,
/// neutral, prefer. out-of-alphabet integers behave as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum FeaturePreference {
    Forbid,
    Dislike,
    Neutral,
    Prefer,
}

impl FeaturePreference {
    pub fn from_value(value: i32) -> FeaturePreference {
        match value {
            -1 => FeaturePreference::Forbid,
            0 => FeaturePreference::Dislike,
            2 => FeaturePreference::Prefer,
            _ => FeaturePreference::Neutral,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            FeaturePreference::Forbid => -1,
            FeaturePreference::Dislike => 0,
            FeaturePreference::Neutral => 1,
            FeaturePreference::Prefer => 2,
        }
    }

    /// edges bearing the feature are inadmissible.
    pub fn forbids(&self) -> bool {
        matches!(self, FeaturePreference::Forbid)
    }

    /// weight multiplier applied when the feature is present on a
    /// walked edge. forbidden features never reach the cost kernel, so
    /// their multiplier is the identity.
    pub fn multiplier(&self) -> f64 {
        match self {
            FeaturePreference::Dislike => 2.0,
            FeaturePreference::Neutral => 1.0,
            FeaturePreference::Prefer => 0.5,
            FeaturePreference::Forbid => 1.0,
        }
    }
}

impl Default for FeaturePreference {
    fn default() -> Self {
        FeaturePreference::Neutral
    }
}

impl From<i32> for FeaturePreference {
    fn from(value: i32) -> Self {
        FeaturePreference::from_value(value)
    }
}

impl From<FeaturePreference> for i32 {
    fn from(value: FeaturePreference) -> Self {
        value.value()
    }
}
