use tracing::info;

use crate::collectors::iss_position::{ProximityEvaluator, ProximityReading, SpacecraftPositionSource};
use crate::collectors::sun_times::NightWindowSource;
use crate::core::decision::OverheadDecision;
use crate::core::profile::LocationProfile;
use crate::core::window::{NightWindow, UtcClock};
use crate::error::CycleError;
use crate::notify::dispatcher::{Dispatch, NotificationDispatcher};
use crate::notify::smtp::MailChannel;

/// Everything one completed cycle learned and did.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    pub now: UtcClock,
    pub window: NightWindow,
    pub proximity: ProximityReading,
    pub decision: OverheadDecision,
    pub dispatch: Dispatch,
}

/// Night window, then spacecraft proximity, then the decision and its dispatch,
/// strictly in that order. Any failure aborts the cycle before a decision.
pub struct DecisionCycle<N, S, M> {
    night: N,
    proximity: ProximityEvaluator<S>,
    dispatcher: NotificationDispatcher<M>,
}

impl<N, S, M> DecisionCycle<N, S, M>
where
    N: NightWindowSource,
    S: SpacecraftPositionSource,
    M: MailChannel,
{
    pub fn new(night: N, proximity: ProximityEvaluator<S>, dispatcher: NotificationDispatcher<M>) -> Self {
        Self { night, proximity, dispatcher }
    }

    pub async fn run(&self, profile: &LocationProfile) -> Result<CycleReport, CycleError> {
        self.run_at(profile, UtcClock::now()).await
    }

    pub async fn run_at(&self, profile: &LocationProfile, now: UtcClock) -> Result<CycleReport, CycleError> {
        let observer = profile.location();
        let window = self.night.resolve(observer).await?;
        let proximity = self.proximity.evaluate(observer).await?;
        let decision = OverheadDecision::evaluate(&window, now, proximity.near);
        info!(
            %now,
            %window,
            is_night = window.contains(now),
            iss_lat = proximity.spacecraft.lat,
            iss_lon = proximity.spacecraft.lon,
            near = proximity.near,
            triggered = decision.triggered,
            "Decision reached"
        );
        let dispatch = self.dispatcher.notify(profile, decision).await?;
        Ok(CycleReport { now, window, proximity, decision, dispatch })
    }
}
