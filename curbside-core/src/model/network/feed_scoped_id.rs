use std::fmt::Display;

/// an identifier scoped to the transit agency that issued it. the wire
/// form is `agency_id`, split on the first underscore.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedScopedId {
    pub agency_id: String,
    pub id: String,
}

impl FeedScopedId {
    pub fn new(agency_id: &str, id: &str) -> FeedScopedId {
        FeedScopedId {
            agency_id: agency_id.to_string(),
            id: id.to_string(),
        }
    }

    /// parses the `agency_id` underscore form. returns None when no
    /// underscore separates the two parts.
    pub fn convert_from_string(value: &str) -> Option<FeedScopedId> {
        let (agency_id, id) = value.split_once('_')?;
        Some(FeedScopedId::new(agency_id, id))
    }

    pub fn convert_to_string(value: Option<&FeedScopedId>) -> String {
        match value {
            Some(scoped) => scoped.to_string(),
            None => String::new(),
        }
    }
}

impl Display for FeedScopedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.agency_id, self.id)
    }
}
