//! Alert and recommendation rules
//!
//! Each rule is a predicate over a [`UsageSnapshot`] paired with its output.
//! Rules are evaluated in table order; new rules are appended to the tables.

use super::types::{AlertKind, UsageAlert};

/// Unrounded totals the rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSnapshot {
    pub today: f64,
    pub week: f64,
    pub goal: f64,
}

struct AlertRule {
    /// Suffix of the alert id (`alert-<day>-<key>`)
    key: &'static str,
    kind: AlertKind,
    applies: fn(&UsageSnapshot) -> bool,
    message: fn(&UsageSnapshot) -> String,
}

struct RecommendationRule {
    applies: fn(&UsageSnapshot) -> bool,
    text: &'static str,
}

fn over_daily_goal(s: &UsageSnapshot) -> bool {
    s.goal > 0.0 && s.today > s.goal
}

fn over_daily_goal_message(s: &UsageSnapshot) -> String {
    let percent_over = ((s.today - s.goal) / s.goal * 100.0).round() as i64;
    format!("You've exceeded your daily goal by {}%.", percent_over)
}

fn over_weekly_budget(s: &UsageSnapshot) -> bool {
    s.week > s.goal * 7.0
}

fn weekly_trend_message(_: &UsageSnapshot) -> String {
    "Weekly consumption is trending above your goal.".to_string()
}

fn used_water_today(s: &UsageSnapshot) -> bool {
    s.today > 0.0
}

fn on_track_message(_: &UsageSnapshot) -> String {
    "Great job keeping your water usage on track today!".to_string()
}

fn above_goal_today(s: &UsageSnapshot) -> bool {
    s.today > s.goal
}

/// Independent warnings; any number may fire
const WARNING_RULES: &[AlertRule] = &[
    AlertRule {
        key: "goal",
        kind: AlertKind::Warning,
        applies: over_daily_goal,
        message: over_daily_goal_message,
    },
    AlertRule {
        key: "weekly",
        kind: AlertKind::Warning,
        applies: over_weekly_budget,
        message: weekly_trend_message,
    },
];

/// Fires only when no warning did
const SUCCESS_RULE: AlertRule = AlertRule {
    key: "success",
    kind: AlertKind::Success,
    applies: used_water_today,
    message: on_track_message,
};

const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        applies: above_goal_today,
        text: "Switch high-volume tasks like gardening to early morning to reduce evaporation.",
    },
    RecommendationRule {
        applies: over_weekly_budget,
        text: "Review shower duration and laundry frequency to save up to 15% water weekly.",
    },
];

const FALLBACK_RECOMMENDATION: &str = "Keep logging usage daily to maintain consistent insights.";

impl AlertRule {
    fn emit(&self, snapshot: &UsageSnapshot, day: &str) -> UsageAlert {
        UsageAlert {
            id: format!("alert-{}-{}", day, self.key),
            kind: self.kind,
            message: (self.message)(snapshot),
            date: day.to_string(),
            read: false,
        }
    }
}

/// Derive alerts for `day` (`YYYY-MM-DD`)
pub fn derive_alerts(snapshot: &UsageSnapshot, day: &str) -> Vec<UsageAlert> {
    let mut alerts: Vec<UsageAlert> = WARNING_RULES
        .iter()
        .filter(|rule| (rule.applies)(snapshot))
        .map(|rule| rule.emit(snapshot, day))
        .collect();

    if alerts.is_empty() && (SUCCESS_RULE.applies)(snapshot) {
        alerts.push(SUCCESS_RULE.emit(snapshot, day));
    }

    alerts
}

/// Derive recommendations; the result is never empty
pub fn derive_recommendations(snapshot: &UsageSnapshot) -> Vec<String> {
    let mut recommendations: Vec<String> = RECOMMENDATION_RULES
        .iter()
        .filter(|rule| (rule.applies)(snapshot))
        .map(|rule| rule.text.to_string())
        .collect();

    if recommendations.is_empty() {
        recommendations.push(FALLBACK_RECOMMENDATION.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(today: f64, week: f64, goal: f64) -> UsageSnapshot {
        UsageSnapshot { today, week, goal }
    }

    #[test]
    fn test_goal_and_weekly_fire_together() {
        let alerts = derive_alerts(&snapshot(2500.0, 15000.0, 2000.0), "2024-01-10");
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].id, "alert-2024-01-10-goal");
        assert_eq!(alerts[0].kind, AlertKind::Warning);
        assert_eq!(alerts[0].message, "You've exceeded your daily goal by 25%.");
        assert_eq!(alerts[1].id, "alert-2024-01-10-weekly");
        assert!(alerts.iter().all(|a| a.kind != AlertKind::Success));
        assert!(alerts.iter().all(|a| !a.read));
    }

    #[test]
    fn test_success_when_nothing_else_fires() {
        let alerts = derive_alerts(&snapshot(500.0, 3000.0, 2000.0), "2024-01-10");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Success);
        assert_eq!(alerts[0].id, "alert-2024-01-10-success");
        assert_eq!(alerts[0].date, "2024-01-10");
    }

    #[test]
    fn test_no_usage_no_alerts() {
        assert!(derive_alerts(&snapshot(0.0, 3000.0, 2000.0), "2024-01-10").is_empty());
    }

    #[test]
    fn test_zero_goal_skips_goal_alert() {
        // Weekly rule has no goal guard: any weekly usage is above a zero budget
        let alerts = derive_alerts(&snapshot(100.0, 100.0, 0.0), "2024-01-10");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "alert-2024-01-10-weekly");
    }

    #[test]
    fn test_weekly_only_suppresses_success() {
        let alerts = derive_alerts(&snapshot(100.0, 20000.0, 2000.0), "2024-01-10");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Warning);
    }

    #[test]
    fn test_recommendations_order_and_fallback() {
        let recs = derive_recommendations(&snapshot(2500.0, 15000.0, 2000.0));
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("evaporation"));
        assert!(recs[1].contains("15%"));

        let recs = derive_recommendations(&snapshot(0.0, 0.0, 2000.0));
        assert_eq!(recs, vec![FALLBACK_RECOMMENDATION.to_string()]);
    }
}
