use tracing::{debug, info};

use crate::core::decision::OverheadDecision;
use crate::core::profile::LocationProfile;
use crate::notify::smtp::{MailChannel, MailError};

pub const SUBJECT: &str = "ISS OVERHEAD!";

pub fn body_for(profile: &LocationProfile) -> String {
    format!("{}! The ISS satellite is currently overhead!", profile.name())
}

/// What the dispatcher did with a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    Skipped,
    DryRun,
}

pub struct NotificationDispatcher<M> {
    channel: M,
    dry_run: bool,
}

impl<M: MailChannel> NotificationDispatcher<M> {
    pub fn new(channel: M) -> Self {
        Self { channel, dry_run: false }
    }

    /// Report triggered decisions without sending anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[cfg(test)]
    pub(crate) fn channel(&self) -> &M {
        &self.channel
    }

    /// Sends exactly one message when `decision.triggered`, otherwise nothing.
    pub async fn notify(
        &self,
        profile: &LocationProfile,
        decision: OverheadDecision,
    ) -> Result<Dispatch, MailError> {
        if !decision.triggered {
            debug!("Decision not triggered, nothing to send");
            return Ok(Dispatch::Skipped);
        }
        if self.dry_run {
            info!(to = profile.email(), "Dry run, not sending");
            println!("Dry run: would email {}", profile.email());
            return Ok(Dispatch::DryRun);
        }
        self.channel
            .send_to_self(profile, SUBJECT, &body_for(profile))
            .await?;
        info!(to = profile.email(), "Notification sent");
        println!("Email sent!");
        Ok(Dispatch::Sent)
    }
}
