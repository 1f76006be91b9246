use chrono::{DateTime, Timelike, Utc};

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Hour and minute of a UTC instant, seconds discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcClock {
    pub hour: u8,
    pub minute: u8,
}

impl UtcClock {
    /// Returns `None` unless `hour < 24` and `minute < 60`.
    #[cfg(test)]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn from_datetime(t: DateTime<Utc>) -> Self {
        // chrono guarantees hour() < 24 and minute() < 60
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn minutes_since_midnight(self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }
}

impl std::fmt::Display for UtcClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}Z", self.hour, self.minute)
    }
}

/// Night at one location: from sunset until the following sunrise, both in UTC.
///
/// Sunrise may be numerically earlier than sunset when the night wraps past
/// midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub sunset: UtcClock,
    pub sunrise: UtcClock,
}

impl NightWindow {
    pub fn new(sunset: UtcClock, sunrise: UtcClock) -> Self {
        Self { sunset, sunrise }
    }

    /// Length of the night in minutes; zero when sunset and sunrise coincide.
    pub fn length_minutes(&self) -> i32 {
        (self.sunrise.minutes_since_midnight() - self.sunset.minutes_since_midnight())
            .rem_euclid(MINUTES_PER_DAY)
    }

    /// Whether `now` lies in `[sunset, sunrise)`, wrapping past midnight.
    pub fn contains(&self, now: UtcClock) -> bool {
        let since_sunset = (now.minutes_since_midnight() - self.sunset.minutes_since_midnight())
            .rem_euclid(MINUTES_PER_DAY);
        since_sunset < self.length_minutes()
    }
}

impl std::fmt::Display for NightWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.sunset, self.sunrise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock(hour: u8, minute: u8) -> UtcClock {
        UtcClock::new(hour, minute).unwrap()
    }

    #[test]
    fn clock_rejects_out_of_range_parts() {
        assert!(UtcClock::new(24, 0).is_none());
        assert!(UtcClock::new(23, 60).is_none());
        assert_eq!(clock(23, 59).minutes_since_midnight(), 1439);
    }

    #[test]
    fn clock_drops_seconds() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 18, 42, 59).unwrap();
        assert_eq!(UtcClock::from_datetime(t), clock(18, 42));
    }

    #[test]
    fn wrapping_window_covers_both_sides_of_midnight() {
        let night = NightWindow::new(clock(18, 0), clock(6, 0));
        assert_eq!(night.length_minutes(), 12 * 60);
        assert!(night.contains(clock(18, 0)));
        assert!(night.contains(clock(23, 0)));
        assert!(night.contains(clock(0, 0)));
        assert!(night.contains(clock(5, 59)));
        assert!(!night.contains(clock(6, 0)));
        assert!(!night.contains(clock(12, 0)));
        assert!(!night.contains(clock(17, 59)));
    }

    #[test]
    fn same_day_window_when_sunrise_is_later_numerically() {
        // Western hemisphere: local evening lands after midnight UTC.
        let night = NightWindow::new(clock(1, 30), clock(11, 15));
        assert!(!night.contains(clock(1, 29)));
        assert!(night.contains(clock(1, 30)));
        assert!(night.contains(clock(11, 14)));
        assert!(!night.contains(clock(11, 15)));
        assert!(!night.contains(clock(23, 0)));
    }

    #[test]
    fn minutes_within_the_boundary_hour_are_respected() {
        let night = NightWindow::new(clock(19, 45), clock(5, 20));
        assert!(!night.contains(clock(19, 44)));
        assert!(night.contains(clock(19, 45)));
        assert!(night.contains(clock(5, 19)));
        assert!(!night.contains(clock(5, 21)));
    }

    #[test]
    fn degenerate_window_is_never_night() {
        let night = NightWindow::new(clock(12, 0), clock(12, 0));
        assert_eq!(night.length_minutes(), 0);
        assert!(!night.contains(clock(12, 0)));
        assert!(!night.contains(clock(0, 0)));
    }
}
