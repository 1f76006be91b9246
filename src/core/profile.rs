use serde::{Deserialize, Serialize};

use crate::core::geo::{Axis, CoordinateError, GeoPoint, RawDegrees};

/// The user's identity, home location and mail credential.
///
/// Built only through [`LocationProfile::from_record`] so coordinates are
/// always finite and in range.
#[derive(Clone, PartialEq)]
pub struct LocationProfile {
    name: String,
    email: String,
    password: String,
    location: GeoPoint,
}

impl LocationProfile {
    pub fn from_record(record: &ProfileRecord) -> Result<Self, CoordinateError> {
        let lat = record.lat.resolve(Axis::Latitude)?;
        let lon = record.long.resolve(Axis::Longitude)?;
        Ok(Self {
            name: record.name.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
            location: GeoPoint::new(lat, lon),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }
}

impl std::fmt::Debug for LocationProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationProfile")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("location", &self.location)
            .finish()
    }
}

/// On-disk shape of the profile: `name, email, password, lat, long`.
/// Coordinates keep the text the user typed.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub lat: RawDegrees,
    pub long: RawDegrees,
}

impl std::fmt::Debug for ProfileRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("lat", &self.lat)
            .field("long", &self.long)
            .finish()
    }
}
