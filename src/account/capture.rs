use std::io::{BufRead, Write};

use tracing::info;

use crate::account::bootstrap::ProfileSource;
use crate::core::geo::{parse_degrees, Axis, RawDegrees};
use crate::core::profile::{LocationProfile, ProfileRecord};
use crate::utils::profile_store::{JsonProfileStore, ProfileError, ProfileLookup};

/// Line-oriented form asking for the five profile fields.
pub struct TerminalForm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalForm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn fill(&mut self) -> Result<ProfileRecord, ProfileError> {
        let name = self.ask_required("Name")?;
        let email = self.ask_required("Email")?;
        let password = self.ask_secret("Password")?;
        let lat = self.ask_degrees("Latitude", Axis::Latitude)?;
        let long = self.ask_degrees("Longitude", Axis::Longitude)?;
        Ok(ProfileRecord {
            name,
            email,
            password,
            lat: RawDegrees::Text(lat),
            long: RawDegrees::Text(long),
        })
    }

    pub fn say(&mut self, message: &str) -> Result<(), ProfileError> {
        writeln!(self.output, "{message}").map_err(ProfileError::Terminal)
    }

    fn ask(&mut self, label: &str) -> Result<String, ProfileError> {
        write!(self.output, "{label}: ").map_err(ProfileError::Terminal)?;
        self.output.flush().map_err(ProfileError::Terminal)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(ProfileError::Terminal)?;
        if read == 0 {
            return Err(ProfileError::CaptureAborted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask_required(&mut self, label: &str) -> Result<String, ProfileError> {
        loop {
            let value = self.ask(label)?;
            if !value.trim().is_empty() {
                return Ok(value.trim().to_string());
            }
            self.say(&format!("{label} cannot be empty."))?;
        }
    }

    /// Stored exactly as typed, surrounding spaces included.
    fn ask_secret(&mut self, label: &str) -> Result<String, ProfileError> {
        loop {
            let value = self.ask(label)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.say(&format!("{label} cannot be empty."))?;
        }
    }

    /// Keeps the typed text; only checks that it parses and is in range.
    fn ask_degrees(&mut self, label: &str, axis: Axis) -> Result<String, ProfileError> {
        loop {
            let value = self.ask(label)?;
            match parse_degrees(axis, &value) {
                Ok(_) => return Ok(value.trim().to_string()),
                Err(e) => self.say(&format!("{e}, try again."))?,
            }
        }
    }
}

/// Stored record plus a terminal form that writes it.
pub struct FormProfileSource<R, W> {
    store: JsonProfileStore,
    form: TerminalForm<R, W>,
}

impl<R: BufRead, W: Write> FormProfileSource<R, W> {
    pub fn new(store: JsonProfileStore, form: TerminalForm<R, W>) -> Self {
        Self { store, form }
    }
}

impl<R: BufRead, W: Write> ProfileSource for FormProfileSource<R, W> {
    fn load(&self) -> Result<ProfileLookup, ProfileError> {
        self.store.load()
    }

    fn report_missing(&mut self) -> Result<(), ProfileError> {
        self.form.say("You don't have an account, create one.")
    }

    fn capture(&mut self) -> Result<LocationProfile, ProfileError> {
        let record = self.form.fill()?;
        let profile = LocationProfile::from_record(&record)?;
        self.store.save(&record)?;
        info!(path = %self.store.path().display(), "Account created");
        self.form.say("Account created.")?;
        Ok(profile)
    }
}
