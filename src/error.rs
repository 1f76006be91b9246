use thiserror::Error;

use crate::collectors::ProviderError;
use crate::notify::smtp::MailError;
use crate::utils::profile_store::ProfileError;

/// Why a decision cycle stopped before reaching (or acting on) a decision.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("no usable profile: {0}")]
    ProfileUnavailable(#[from] ProfileError),
    #[error("{0}")]
    UpstreamUnavailable(ProviderError),
    #[error("{0}")]
    MalformedResponse(ProviderError),
    #[error("mail delivery failed: {0}")]
    DeliveryFailed(#[from] MailError),
}

impl From<ProviderError> for CycleError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Unavailable { .. } => CycleError::UpstreamUnavailable(e),
            ProviderError::Malformed { .. } => CycleError::MalformedResponse(e),
        }
    }
}

impl CycleError {
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::ProfileUnavailable(_) => "ProfileUnavailable",
            CycleError::UpstreamUnavailable(_) => "UpstreamUnavailable",
            CycleError::MalformedResponse(_) => "MalformedResponse",
            CycleError::DeliveryFailed(_) => "DeliveryFailed",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            CycleError::ProfileUnavailable(_) => 2,
            CycleError::UpstreamUnavailable(_) => 3,
            CycleError::MalformedResponse(_) => 4,
            CycleError::DeliveryFailed(_) => 5,
        }
    }
}
