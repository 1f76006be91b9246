use tracing::{info, warn};

use crate::core::profile::LocationProfile;
use crate::utils::profile_store::{ProfileError, ProfileLookup};

/// Where profiles come from: a persisted record, or a capture flow that
/// writes one.
pub trait ProfileSource {
    fn load(&self) -> Result<ProfileLookup, ProfileError>;
    fn capture(&mut self) -> Result<LocationProfile, ProfileError>;

    /// Tells the user no profile exists yet, right before a first capture.
    fn report_missing(&mut self) -> Result<(), ProfileError> {
        Ok(())
    }
}

/// Returns the stored profile, running exactly one capture when none exists.
pub fn ensure_profile<S: ProfileSource>(source: &mut S) -> Result<LocationProfile, ProfileError> {
    match source.load()? {
        ProfileLookup::Found(profile) => {
            info!(name = profile.name(), "Using stored profile");
            Ok(profile)
        }
        ProfileLookup::NotFound => {
            info!("No stored profile, starting capture");
            source.report_missing()?;
            capture_and_reload(source)
        }
    }
}

/// Captures a fresh profile even if one exists, replacing it.
pub fn recapture_profile<S: ProfileSource>(source: &mut S) -> Result<LocationProfile, ProfileError> {
    info!("Recapturing profile");
    capture_and_reload(source)
}

// The run uses what persistence returns, not what the form produced.
fn capture_and_reload<S: ProfileSource>(source: &mut S) -> Result<LocationProfile, ProfileError> {
    source.capture()?;
    match source.load()? {
        ProfileLookup::Found(profile) => Ok(profile),
        ProfileLookup::NotFound => {
            warn!("Profile still missing after capture");
            Err(ProfileError::MissingAfterCapture)
        }
    }
}
