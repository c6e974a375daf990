pub mod banned_stop_set;
pub mod feature_preference;
pub mod locale;
pub mod optimize_type;
pub mod qualified_mode;
pub mod routing_request;

pub use banned_stop_set::BannedStopSet;
pub use feature_preference::FeaturePreference;
pub use locale::Locale;
pub use optimize_type::OptimizeType;
pub use qualified_mode::{QualifiedMode, QualifiedModeSet, Qualifier};
pub use routing_request::RoutingRequest;
