/// user-visible assembly failures, surfaced by the HTTP layer as 4xx
/// responses.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("some but not all of the three bike triangle factors were provided")]
    UnderspecifiedTriangle,
    #[error("bike triangle factors require the TRIANGLE optimize type")]
    TriangleOptimizeTypeNotSet,
    #[error("bike triangle factors must sum to one")]
    TriangleNotAffine,
    #[error("optimize type is TRIANGLE but no triangle factors were supplied")]
    TriangleValuesNotSet,
    #[error("transfer slack must be greater than or equal to board slack plus alight slack")]
    SlackInvariantViolated,
}
