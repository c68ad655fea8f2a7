//! Reminder scheduling arithmetic.
//!
//! Two questions are answered here: is a reminder in the upcoming window
//! (used by the `/reminders/upcoming` query), and is it due right now
//! (used by the periodic sweep). Both are pure functions of a reminder
//! and a clock reading so the sweep and the query share one definition.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use shared::Reminder;
use tracing::warn;

/// Due tolerance around the target fire time, in milliseconds.
const DUE_WINDOW_MS: i64 = 60_000;

/// Whether the reminder belongs in the upcoming set: active, and either
/// dateless (recurring) or dated within the closed interval
/// [now, now + 24h]. Dates count from midnight UTC.
pub fn in_upcoming_window(reminder: &Reminder, now: DateTime<Utc>) -> bool {
    if !reminder.is_active {
        return false;
    }
    match reminder.date {
        Some(date) => {
            let at = date.and_time(NaiveTime::MIN).and_utc();
            at >= now && at <= now + Duration::hours(24)
        }
        None => true,
    }
}

/// The moment the reminder should fire: its date at midnight if set,
/// otherwise the current moment; then, if a time-of-day is set, the
/// hour/minute are overwritten with it and seconds are zeroed.
///
/// `None` when the time-of-day string does not parse — such a reminder
/// cannot fire and is skipped by the sweep.
pub fn target_fire_time(reminder: &Reminder, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let base = match reminder.date {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => now,
    };
    match reminder.time.as_deref() {
        None => Some(base),
        Some(raw) => match NaiveTime::parse_from_str(raw, "%H:%M") {
            Ok(time) => Some(base.date_naive().and_time(time).and_utc()),
            Err(_) => {
                warn!(
                    "reminder {} has unparsable time {:?}, skipping",
                    reminder.id, raw
                );
                None
            }
        },
    }
}

/// Due when the clock is within 60 seconds of the target fire time,
/// on either side.
pub fn is_due(reminder: &Reminder, now: DateTime<Utc>) -> bool {
    match target_fire_time(reminder, now) {
        Some(target) => (now - target).num_milliseconds().abs() <= DUE_WINDOW_MS,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, TimeZone};
    use shared::Frequency;

    use super::*;

    fn reminder(time: Option<&str>, date: Option<NaiveDate>, active: bool) -> Reminder {
        Reminder {
            id: "r1".to_string(),
            child_id: "c1".to_string(),
            kind: "medication".to_string(),
            title: "Vitamin D".to_string(),
            time: time.map(str::to_string),
            date,
            frequency: Frequency::Daily,
            notes: String::new(),
            is_active: active,
            last_triggered: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn dateless_active_reminder_is_always_upcoming() {
        let now = Utc::now();
        assert!(in_upcoming_window(&reminder(Some("08:00"), None, true), now));
        assert!(!in_upcoming_window(&reminder(Some("08:00"), None, false), now));
    }

    #[test]
    fn dated_reminders_respect_the_24h_window() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
        let today = now.date_naive();

        let tomorrow = today.checked_add_days(Days::new(1));
        assert!(in_upcoming_window(&reminder(None, tomorrow, true), now));

        let in_three_days = today.checked_add_days(Days::new(3));
        assert!(!in_upcoming_window(&reminder(None, in_three_days, true), now));

        let yesterday = today.checked_sub_days(Days::new(1));
        assert!(!in_upcoming_window(&reminder(None, yesterday, true), now));
    }

    #[test]
    fn time_of_day_overlays_the_current_date() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 7, 59, 30).unwrap();
        let target = target_fire_time(&reminder(Some("08:00"), None, true), now).unwrap();
        assert_eq!(target, Utc.with_ymd_and_hms(2026, 8, 8, 8, 0, 0).unwrap());
    }

    #[test]
    fn time_of_day_overlays_an_explicit_date() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
        let target = target_fire_time(&reminder(Some("14:30"), Some(date), true), now).unwrap();
        assert_eq!(target, Utc.with_ymd_and_hms(2026, 8, 9, 14, 30, 0).unwrap());
    }

    #[test]
    fn dateless_timeless_reminder_fires_at_the_current_moment() {
        let now = Utc::now();
        let r = reminder(None, None, true);
        assert_eq!(target_fire_time(&r, now), Some(now));
        assert!(is_due(&r, now));
    }

    #[test]
    fn due_window_is_sixty_seconds_either_side() {
        let now = Utc.with_ymd_and_hms(2026, 8, 8, 8, 0, 30).unwrap();
        assert!(is_due(&reminder(Some("08:00"), None, true), now));
        assert!(is_due(&reminder(Some("08:01"), None, true), now));

        let later = Utc.with_ymd_and_hms(2026, 8, 8, 8, 2, 0).unwrap();
        assert!(!is_due(&reminder(Some("08:00"), None, true), later));
    }

    #[test]
    fn unparsable_time_is_never_due() {
        let now = Utc::now();
        let r = reminder(Some("eight o'clock"), None, true);
        assert_eq!(target_fire_time(&r, now), None);
        assert!(!is_due(&r, now));
    }
}
