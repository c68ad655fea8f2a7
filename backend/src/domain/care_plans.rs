//! Building care plan tasks out of a model suggestion.

use chrono::{Days, NaiveDate};
use shared::{CarePlanSuggestion, CarePlanTask};
use uuid::Uuid;

/// Turn a suggestion into dated tasks: daily-routine items come due one
/// per day starting today, health-monitoring items one per day starting
/// a week out.
pub fn tasks_from_suggestion(suggestion: &CarePlanSuggestion, today: NaiveDate) -> Vec<CarePlanTask> {
    let routine = suggestion
        .daily_routine
        .iter()
        .enumerate()
        .map(|(i, title)| new_task(title, due(today, i as u64)));
    let monitoring = suggestion
        .health_monitoring
        .iter()
        .enumerate()
        .map(|(i, title)| new_task(title, due(today, i as u64 + 7)));
    routine.chain(monitoring).collect()
}

pub fn new_task(title: &str, due_date: NaiveDate) -> CarePlanTask {
    CarePlanTask {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        completed: false,
        due_date,
        completed_at: None,
    }
}

fn due(today: NaiveDate, offset_days: u64) -> NaiveDate {
    today
        .checked_add_days(Days::new(offset_days))
        .unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_are_dated_from_the_suggestion_lists() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let suggestion = CarePlanSuggestion {
            daily_routine: vec!["Regular meal times".to_string(), "Adequate sleep".to_string()],
            health_monitoring: vec!["Track growth".to_string()],
            activities: vec!["Reading time".to_string()],
            safety: vec![],
            nutrition: vec![],
        };

        let tasks = tasks_from_suggestion(&suggestion, today);
        assert_eq!(tasks.len(), 3);

        assert_eq!(tasks[0].title, "Regular meal times");
        assert_eq!(tasks[0].due_date, today);
        assert_eq!(tasks[1].due_date, NaiveDate::from_ymd_opt(2026, 8, 9).unwrap());
        assert_eq!(tasks[2].title, "Track growth");
        assert_eq!(tasks[2].due_date, NaiveDate::from_ymd_opt(2026, 8, 15).unwrap());

        assert!(tasks.iter().all(|t| !t.completed && t.completed_at.is_none()));
        let mut ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
