//! Rule-based study recommendations for Ember.
//!
//! `analyze` runs a fixed sequence of rule groups over recent learning
//! history and emits prioritized, human-readable suggestions. Rules are
//! independent: each inspects its own slice of the input and either fires
//! or stays silent, so sparse data simply produces fewer recommendations.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::RecommendationConfig;
use crate::model::{
    MasteryLevel, MasteryProgress, Priority, QuizSummary, Recommendation, RecommendationType,
    ReviewItemStatus, SessionSummary, StreakRecord,
};

/// Streak lengths worth celebrating.
const STREAK_MILESTONES: &[u32] = &[7, 14, 30, 60, 100, 365];

/// Accuracy below this upgrades an accuracy finding to high priority.
const SEVERE_ACCURACY: f64 = 0.4;

/// Retrievability below this marks a review item as at risk of being lost.
const AT_RISK_RETRIEVABILITY: f64 = 0.5;

/// Minimum number of due items before a review-backlog nudge fires.
const DUE_ITEMS_MINIMUM: usize = 5;

/// Due-item count that upgrades the backlog nudge to high priority.
const DUE_ITEMS_SEVERE: usize = 20;

/// Everything the analyzer looks at. Borrowed so callers can hand over
/// slices of whatever store they keep their history in.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub sessions: &'a [SessionSummary],
    pub quizzes: &'a [QuizSummary],
    pub mastery: &'a [MasteryProgress],
    pub review_items: &'a [ReviewItemStatus],
    pub streak: Option<&'a StreakRecord>,
}

/// Run the full rule set over the learner's recent history.
///
/// With fewer sessions *and* quizzes than `min_sessions_for_analysis`
/// there is nothing meaningful to analyze, so the result is a single
/// low-priority nudge to practice more. Otherwise each enabled rule group
/// runs in a fixed order, the combined list is stably sorted by priority,
/// and the tail beyond `max_recommendations` is dropped.
pub fn analyze(
    config: &RecommendationConfig,
    input: AnalysisInput<'_>,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let min = config.min_sessions_for_analysis;
    if input.sessions.len() < min && input.quizzes.len() < min {
        debug!(
            sessions = input.sessions.len(),
            quizzes = input.quizzes.len(),
            "not enough history for analysis"
        );
        return vec![Recommendation::new(
            RecommendationType::PracticeMore,
            "Keep practicing",
            "Complete a few more sessions so Ember can spot patterns in your learning.",
            Priority::Low,
            now,
        )];
    }

    // Rules that look at "recent" sessions expect newest first.
    let mut sessions: Vec<&SessionSummary> = input.sessions.iter().collect();
    sessions.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let mut recs = Vec::new();

    if config.is_kind_enabled(RecommendationType::TimeManagement) {
        check_time_management(config, input.quizzes, now, &mut recs);
    }
    if config.is_kind_enabled(RecommendationType::Accuracy) {
        check_accuracy(config, &sessions, now, &mut recs);
    }
    if config.is_kind_enabled(RecommendationType::SkipPattern) {
        check_skip_pattern(config, &sessions, now, &mut recs);
    }
    if config.is_kind_enabled(RecommendationType::SubjectFocus) {
        check_subject_focus(input.mastery, now, &mut recs);
    }
    if config.is_kind_enabled(RecommendationType::Streak) {
        if let Some(streak) = input.streak {
            check_streak(streak, now, &mut recs);
        }
    }
    if config.is_kind_enabled(RecommendationType::Retention) {
        check_retention_backlog(config, input.review_items, now, &mut recs);
    }
    if config.is_kind_enabled(RecommendationType::ReviewDifficult) {
        check_items_at_risk(input.review_items, now, &mut recs);
    }
    if config.is_kind_enabled(RecommendationType::Encouragement) {
        check_encouragement(&sessions, input.streak, now, &mut recs);
    }

    debug!(generated = recs.len(), "recommendation analysis complete");

    // Stable sort keeps rule order within a priority tier.
    recs.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    recs.truncate(config.max_recommendations);
    recs
}

/// Quick checks against a single just-finished quiz.
pub fn analyze_quiz(
    config: &RecommendationConfig,
    quiz: &QuizSummary,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let accuracy_flagged = quiz.accuracy < config.accuracy_threshold;
    if accuracy_flagged {
        let priority = if quiz.accuracy < SEVERE_ACCURACY {
            Priority::High
        } else {
            Priority::Medium
        };
        recs.push(
            Recommendation::new(
                RecommendationType::Accuracy,
                "Review before moving on",
                format!(
                    "You scored {:.0}% on this quiz. Going over the missed questions now will help it stick.",
                    quiz.accuracy * 100.0
                ),
                priority,
                now,
            )
            .with_data("accuracy", serde_json::json!(quiz.accuracy)),
        );
    }

    if quiz.average_time_per_question() > config.time_threshold_seconds {
        recs.push(Recommendation::new(
            RecommendationType::TimeManagement,
            "Take your time, but watch the clock",
            format!(
                "You averaged {:.0}s per question. Try setting a soft time limit to build fluency.",
                quiz.average_time_per_question()
            ),
            Priority::Medium,
            now,
        ));
    }

    if quiz.skip_rate() > config.skip_threshold {
        recs.push(Recommendation::new(
            RecommendationType::SkipPattern,
            "Skipped questions add up",
            format!(
                "You skipped {} of {} questions. Attempting them, even unsure, aids recall.",
                quiz.skipped_count, quiz.question_count
            ),
            Priority::Medium,
            now,
        ));
    }

    if accuracy_flagged {
        if let Some(topic_id) = &quiz.topic_id {
            recs.push(
                Recommendation::new(
                    RecommendationType::ReviewTopic,
                    "Revisit this topic",
                    "A focused review session on this topic would shore up the gaps this quiz found.",
                    Priority::Medium,
                    now,
                )
                .with_topic(topic_id.clone())
                .with_action_label("Review topic"),
            );
        }
    }

    recs
}

fn check_time_management(
    config: &RecommendationConfig,
    quizzes: &[QuizSummary],
    now: DateTime<Utc>,
    recs: &mut Vec<Recommendation>,
) {
    let slow: Vec<&QuizSummary> = quizzes
        .iter()
        .filter(|q| q.average_time_per_question() > config.time_threshold_seconds)
        .collect();

    if slow.len() >= 2 {
        let avg = slow
            .iter()
            .map(|q| q.average_time_per_question())
            .sum::<f64>()
            / slow.len() as f64;
        recs.push(
            Recommendation::new(
                RecommendationType::TimeManagement,
                "Work on answer speed",
                format!(
                    "{} recent quizzes averaged {:.0}s per question. Timed drills can build fluency without hurting accuracy.",
                    slow.len(),
                    avg
                ),
                Priority::Medium,
                now,
            )
            .with_data("slow_quiz_count", serde_json::json!(slow.len())),
        );
    }
}

fn check_accuracy(
    config: &RecommendationConfig,
    sessions: &[&SessionSummary],
    now: DateTime<Utc>,
    recs: &mut Vec<Recommendation>,
) {
    if sessions.len() < 3 {
        return;
    }

    let recent = &sessions[..sessions.len().min(5)];
    let mean = recent.iter().map(|s| s.accuracy).sum::<f64>() / recent.len() as f64;

    if mean < config.accuracy_threshold {
        let priority = if mean < SEVERE_ACCURACY {
            Priority::High
        } else {
            Priority::Medium
        };
        recs.push(
            Recommendation::new(
                RecommendationType::Accuracy,
                "Accuracy is slipping",
                format!(
                    "Your last {} sessions averaged {:.0}% accuracy. Slowing down or revisiting fundamentals may help.",
                    recent.len(),
                    mean * 100.0
                ),
                priority,
                now,
            )
            .with_data("mean_accuracy", serde_json::json!(mean)),
        );
    }
}

fn check_skip_pattern(
    config: &RecommendationConfig,
    sessions: &[&SessionSummary],
    now: DateTime<Utc>,
    recs: &mut Vec<Recommendation>,
) {
    let skippy = sessions
        .iter()
        .filter(|s| s.skip_rate > config.skip_threshold)
        .count();

    if skippy >= 3 {
        recs.push(Recommendation::new(
            RecommendationType::SkipPattern,
            "You're skipping a lot",
            format!(
                "{} recent sessions had a high skip rate. Guessing first is better practice than skipping.",
                skippy
            ),
            Priority::Medium,
            now,
        ));
    }
}

fn check_subject_focus(
    mastery: &[MasteryProgress],
    now: DateTime<Utc>,
    recs: &mut Vec<Recommendation>,
) {
    let mut weak: Vec<&MasteryProgress> = mastery
        .iter()
        .filter(|m| m.level().rank() <= MasteryLevel::Beginner.rank())
        .collect();
    weak.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));

    for progress in weak.into_iter().take(2) {
        let priority = if progress.accuracy < SEVERE_ACCURACY {
            Priority::High
        } else {
            Priority::Medium
        };
        recs.push(
            Recommendation::new(
                RecommendationType::SubjectFocus,
                format!("Focus on {}", progress.topic_name),
                format!(
                    "{} is at the {} level with {:.0}% accuracy. A dedicated session would move it forward.",
                    progress.topic_name,
                    progress.level().display_name(),
                    progress.accuracy * 100.0
                ),
                priority,
                now,
            )
            .with_topic(progress.topic_id.clone())
            .with_action_label("Practice now"),
        );
    }
}

fn check_streak(streak: &StreakRecord, now: DateTime<Utc>, recs: &mut Vec<Recommendation>) {
    let active_today = streak.last_activity_date == Some(now.date_naive());

    if !active_today && streak.current_streak > 0 {
        let priority = if streak.current_streak >= 7 {
            Priority::High
        } else {
            Priority::Medium
        };
        recs.push(
            Recommendation::new(
                RecommendationType::Streak,
                "Keep your streak alive",
                format!(
                    "Your {}-day streak ends at midnight without a session today.",
                    streak.current_streak
                ),
                priority,
                now,
            )
            .with_expiry(now + Duration::hours(24))
            .with_action_label("Start a session"),
        );
    }

    if streak.current_streak > 5 && streak.current_streak + 1 >= streak.longest_streak {
        recs.push(Recommendation::new(
            RecommendationType::Streak,
            "Personal record in reach",
            format!(
                "You're at {} days, your record is {}. Keep going!",
                streak.current_streak, streak.longest_streak
            ),
            Priority::Medium,
            now,
        ));
    }
}

fn check_retention_backlog(
    config: &RecommendationConfig,
    items: &[ReviewItemStatus],
    now: DateTime<Utc>,
    recs: &mut Vec<Recommendation>,
) {
    let due = items
        .iter()
        .filter(|i| i.retrievability < config.retention_threshold)
        .count();

    if due >= DUE_ITEMS_MINIMUM {
        let priority = if due >= DUE_ITEMS_SEVERE {
            Priority::High
        } else {
            Priority::Medium
        };
        recs.push(
            Recommendation::new(
                RecommendationType::Retention,
                "Reviews are piling up",
                format!("{} items have dropped below your retention target.", due),
                priority,
                now,
            )
            .with_data("due_count", serde_json::json!(due))
            .with_action_label("Start reviewing"),
        );
    }
}

fn check_items_at_risk(
    items: &[ReviewItemStatus],
    now: DateTime<Utc>,
    recs: &mut Vec<Recommendation>,
) {
    let at_risk = items
        .iter()
        .filter(|i| i.retrievability < AT_RISK_RETRIEVABILITY)
        .count();

    if at_risk > 0 {
        recs.push(
            Recommendation::new(
                RecommendationType::ReviewDifficult,
                "Some items are nearly forgotten",
                format!(
                    "{} items are at risk of being lost. Reviewing them today matters most.",
                    at_risk
                ),
                Priority::Critical,
                now,
            )
            .with_data("at_risk_count", serde_json::json!(at_risk))
            .with_action_label("Rescue them"),
        );
    }
}

fn check_encouragement(
    sessions: &[&SessionSummary],
    streak: Option<&StreakRecord>,
    now: DateTime<Utc>,
    recs: &mut Vec<Recommendation>,
) {
    if sessions.len() >= 5 {
        let recent: f64 = sessions[..3].iter().map(|s| s.accuracy).sum::<f64>() / 3.0;
        let previous: f64 = sessions[3..6.min(sessions.len())]
            .iter()
            .map(|s| s.accuracy)
            .sum::<f64>()
            / sessions[3..6.min(sessions.len())].len() as f64;

        if recent - previous > 0.1 {
            recs.push(Recommendation::new(
                RecommendationType::Encouragement,
                "You're on an upswing",
                format!(
                    "Accuracy climbed from {:.0}% to {:.0}% over your last sessions. Whatever you changed, it's working.",
                    previous * 100.0,
                    recent * 100.0
                ),
                Priority::Low,
                now,
            ));
        }
    }

    if let Some(streak) = streak {
        if STREAK_MILESTONES.contains(&streak.current_streak) {
            recs.push(Recommendation::new(
                RecommendationType::Encouragement,
                format!("{} days strong", streak.current_streak),
                format!(
                    "You hit a {}-day streak. Consistency like this is what builds lasting knowledge.",
                    streak.current_streak
                ),
                Priority::Low,
                now,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> RecommendationConfig {
        RecommendationConfig::default()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 15, 0, 0).unwrap()
    }

    fn session(id: &str, days_ago: i64, accuracy: f64, skip_rate: f64) -> SessionSummary {
        SessionSummary {
            id: id.to_string(),
            completed_at: now() - Duration::days(days_ago),
            accuracy,
            skip_rate,
        }
    }

    fn quiz(id: &str, accuracy: f64, total_time: f64, skipped: u32) -> QuizSummary {
        QuizSummary {
            id: id.to_string(),
            topic_id: None,
            taken_at: now(),
            accuracy,
            question_count: 10,
            total_time_seconds: total_time,
            skipped_count: skipped,
        }
    }

    fn mastery(topic: &str, score: f64, accuracy: f64) -> MasteryProgress {
        MasteryProgress {
            topic_id: topic.to_string(),
            topic_name: topic.to_string(),
            score,
            accuracy,
            total_attempts: 10,
            last_attempt_at: Some(now()),
        }
    }

    fn good_sessions(n: usize) -> Vec<SessionSummary> {
        (0..n)
            .map(|i| session(&format!("s{}", i), i as i64, 0.9, 0.0))
            .collect()
    }

    fn input<'a>(
        sessions: &'a [SessionSummary],
        quizzes: &'a [QuizSummary],
    ) -> AnalysisInput<'a> {
        AnalysisInput {
            sessions,
            quizzes,
            mastery: &[],
            review_items: &[],
            streak: None,
        }
    }

    #[test]
    fn test_empty_history_yields_single_nudge() {
        let recs = analyze(&config(), input(&[], &[]), now());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationType::PracticeMore);
        assert_eq!(recs[0].priority, Priority::Low);
    }

    #[test]
    fn test_guard_passes_with_enough_quizzes_alone() {
        let quizzes: Vec<QuizSummary> = (0..3).map(|i| quiz(&format!("q{}", i), 0.9, 100.0, 0)).collect();
        let recs = analyze(&config(), input(&[], &quizzes), now());
        // History is fine, so no nudge and no findings either
        assert!(recs.iter().all(|r| r.kind != RecommendationType::PracticeMore));
    }

    #[test]
    fn test_healthy_history_produces_nothing() {
        let sessions = good_sessions(6);
        let recs = analyze(&config(), input(&sessions, &[]), now());
        assert!(recs.is_empty());
    }

    #[test]
    fn test_low_accuracy_sessions_flagged() {
        let sessions: Vec<SessionSummary> = (0..5)
            .map(|i| session(&format!("s{}", i), i as i64, 0.5, 0.0))
            .collect();
        let recs = analyze(&config(), input(&sessions, &[]), now());

        let finding = recs
            .iter()
            .find(|r| r.kind == RecommendationType::Accuracy)
            .unwrap();
        assert_eq!(finding.priority, Priority::Medium);
    }

    #[test]
    fn test_severe_accuracy_is_high_priority() {
        let sessions: Vec<SessionSummary> = (0..5)
            .map(|i| session(&format!("s{}", i), i as i64, 0.3, 0.0))
            .collect();
        let recs = analyze(&config(), input(&sessions, &[]), now());

        let finding = recs
            .iter()
            .find(|r| r.kind == RecommendationType::Accuracy)
            .unwrap();
        assert_eq!(finding.priority, Priority::High);
    }

    #[test]
    fn test_accuracy_uses_most_recent_sessions() {
        // Old sessions were bad, recent five are fine
        let mut sessions = good_sessions(5);
        for i in 0..5 {
            sessions.push(session(&format!("old{}", i), 30 + i, 0.2, 0.0));
        }
        let recs = analyze(&config(), input(&sessions, &[]), now());
        assert!(recs.iter().all(|r| r.kind != RecommendationType::Accuracy));
    }

    #[test]
    fn test_slow_quizzes_flagged() {
        let quizzes: Vec<QuizSummary> = (0..3)
            .map(|i| quiz(&format!("q{}", i), 0.9, 900.0, 0)) // 90s per question
            .collect();
        let recs = analyze(&config(), input(&[], &quizzes), now());
        assert!(recs.iter().any(|r| r.kind == RecommendationType::TimeManagement));
    }

    #[test]
    fn test_one_slow_quiz_not_enough() {
        let quizzes = vec![
            quiz("q0", 0.9, 900.0, 0),
            quiz("q1", 0.9, 100.0, 0),
            quiz("q2", 0.9, 100.0, 0),
        ];
        let recs = analyze(&config(), input(&[], &quizzes), now());
        assert!(recs.iter().all(|r| r.kind != RecommendationType::TimeManagement));
    }

    #[test]
    fn test_skip_pattern_flagged() {
        let sessions: Vec<SessionSummary> = (0..4)
            .map(|i| session(&format!("s{}", i), i as i64, 0.9, 0.5))
            .collect();
        let recs = analyze(&config(), input(&sessions, &[]), now());
        assert!(recs.iter().any(|r| r.kind == RecommendationType::SkipPattern));
    }

    #[test]
    fn test_subject_focus_targets_weakest_topics() {
        let sessions = good_sessions(5);
        let mastery = vec![
            mastery("algebra", 0.15, 0.5),
            mastery("geometry", 0.3, 0.5),
            mastery("calculus", 0.1, 0.5),
            mastery("trig", 0.9, 0.95),
        ];
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &mastery,
                review_items: &[],
                streak: None,
            },
            now(),
        );

        let topics: Vec<&str> = recs
            .iter()
            .filter(|r| r.kind == RecommendationType::SubjectFocus)
            .filter_map(|r| r.related_topic_id.as_deref())
            .collect();
        // Capped at two, weakest scores first
        assert_eq!(topics, vec!["calculus", "algebra"]);
    }

    #[test]
    fn test_streak_keep_alive_fires_when_idle_today() {
        let sessions = good_sessions(5);
        let streak = StreakRecord {
            current_streak: 10,
            longest_streak: 30,
            last_activity_date: Some(now().date_naive() - Duration::days(1)),
            ..StreakRecord::new()
        };
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &[],
                streak: Some(&streak),
            },
            now(),
        );

        let keep_alive = recs
            .iter()
            .find(|r| r.kind == RecommendationType::Streak)
            .unwrap();
        assert_eq!(keep_alive.priority, Priority::High);
        assert_eq!(keep_alive.expires_at, Some(now() + Duration::hours(24)));
    }

    #[test]
    fn test_streak_quiet_when_active_today() {
        let sessions = good_sessions(5);
        let streak = StreakRecord {
            current_streak: 3,
            longest_streak: 30,
            last_activity_date: Some(now().date_naive()),
            ..StreakRecord::new()
        };
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &[],
                streak: Some(&streak),
            },
            now(),
        );
        assert!(recs.iter().all(|r| r.kind != RecommendationType::Streak));
    }

    #[test]
    fn test_near_record_streak() {
        let sessions = good_sessions(5);
        let streak = StreakRecord {
            current_streak: 9,
            longest_streak: 10,
            last_activity_date: Some(now().date_naive()),
            ..StreakRecord::new()
        };
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &[],
                streak: Some(&streak),
            },
            now(),
        );
        assert!(recs
            .iter()
            .any(|r| r.kind == RecommendationType::Streak && r.title.contains("record")));
    }

    #[test]
    fn test_retention_backlog_and_at_risk_both_fire() {
        let sessions = good_sessions(5);
        let items: Vec<ReviewItemStatus> = (0..6)
            .map(|i| ReviewItemStatus::new(format!("item-{}", i), 0.3))
            .collect();
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &items,
                streak: None,
            },
            now(),
        );

        assert!(recs.iter().any(|r| r.kind == RecommendationType::Retention));
        let critical = recs
            .iter()
            .find(|r| r.kind == RecommendationType::ReviewDifficult)
            .unwrap();
        assert_eq!(critical.priority, Priority::Critical);
        // Critical sorts ahead of everything else
        assert_eq!(recs[0].kind, RecommendationType::ReviewDifficult);
    }

    #[test]
    fn test_large_backlog_is_high_priority() {
        let sessions = good_sessions(5);
        let items: Vec<ReviewItemStatus> = (0..25)
            .map(|i| ReviewItemStatus::new(format!("item-{}", i), 0.6))
            .collect();
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &items,
                streak: None,
            },
            now(),
        );

        let backlog = recs
            .iter()
            .find(|r| r.kind == RecommendationType::Retention)
            .unwrap();
        assert_eq!(backlog.priority, Priority::High);
        // 0.6 is due but not at risk
        assert!(recs.iter().all(|r| r.kind != RecommendationType::ReviewDifficult));
    }

    #[test]
    fn test_improvement_trend_encouragement() {
        let mut sessions = Vec::new();
        for i in 0..3 {
            sessions.push(session(&format!("recent{}", i), i, 0.9, 0.0));
        }
        for i in 0..3 {
            sessions.push(session(&format!("old{}", i), 10 + i, 0.6, 0.0));
        }
        let recs = analyze(&config(), input(&sessions, &[]), now());
        assert!(recs.iter().any(|r| r.kind == RecommendationType::Encouragement));
    }

    #[test]
    fn test_milestone_encouragement() {
        let sessions = good_sessions(5);
        let streak = StreakRecord {
            current_streak: 30,
            longest_streak: 45,
            last_activity_date: Some(now().date_naive()),
            ..StreakRecord::new()
        };
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &[],
                streak: Some(&streak),
            },
            now(),
        );
        assert!(recs
            .iter()
            .any(|r| r.kind == RecommendationType::Encouragement && r.title.contains("30")));
    }

    #[test]
    fn test_no_milestone_at_29() {
        let sessions = good_sessions(5);
        let streak = StreakRecord {
            current_streak: 29,
            longest_streak: 45,
            last_activity_date: Some(now().date_naive()),
            ..StreakRecord::new()
        };
        let recs = analyze(
            &config(),
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &[],
                streak: Some(&streak),
            },
            now(),
        );
        assert!(recs.iter().all(|r| r.kind != RecommendationType::Encouragement));
    }

    #[test]
    fn test_disabled_kind_is_skipped() {
        let cfg = RecommendationConfig {
            enabled_kinds: vec![RecommendationType::SkipPattern],
            ..config()
        };
        let sessions: Vec<SessionSummary> = (0..5)
            .map(|i| session(&format!("s{}", i), i as i64, 0.3, 0.5))
            .collect();
        let recs = analyze(&cfg, input(&sessions, &[]), now());

        assert!(recs.iter().any(|r| r.kind == RecommendationType::SkipPattern));
        assert!(recs.iter().all(|r| r.kind != RecommendationType::Accuracy));
    }

    #[test]
    fn test_output_capped_and_sorted() {
        let cfg = RecommendationConfig {
            max_recommendations: 2,
            ..config()
        };
        let sessions: Vec<SessionSummary> = (0..6)
            .map(|i| session(&format!("s{}", i), i as i64, 0.3, 0.5))
            .collect();
        let items: Vec<ReviewItemStatus> = (0..6)
            .map(|i| ReviewItemStatus::new(format!("item-{}", i), 0.2))
            .collect();
        let recs = analyze(
            &cfg,
            AnalysisInput {
                sessions: &sessions,
                quizzes: &[],
                mastery: &[],
                review_items: &items,
                streak: None,
            },
            now(),
        );

        assert_eq!(recs.len(), 2);
        assert!(recs[0].priority.rank() >= recs[1].priority.rank());
        assert_eq!(recs[0].priority, Priority::Critical);
    }

    // analyze_quiz

    #[test]
    fn test_quiz_low_accuracy_with_topic_nudge() {
        let mut q = quiz("q0", 0.3, 100.0, 0);
        q.topic_id = Some("fractions".to_string());
        let recs = analyze_quiz(&config(), &q, now());

        let accuracy = recs
            .iter()
            .find(|r| r.kind == RecommendationType::Accuracy)
            .unwrap();
        assert_eq!(accuracy.priority, Priority::High);

        let review = recs
            .iter()
            .find(|r| r.kind == RecommendationType::ReviewTopic)
            .unwrap();
        assert_eq!(review.related_topic_id.as_deref(), Some("fractions"));
    }

    #[test]
    fn test_quiz_no_topic_no_review_nudge() {
        let q = quiz("q0", 0.3, 100.0, 0);
        let recs = analyze_quiz(&config(), &q, now());
        assert!(recs.iter().all(|r| r.kind != RecommendationType::ReviewTopic));
    }

    #[test]
    fn test_clean_quiz_produces_nothing() {
        let q = quiz("q0", 0.95, 100.0, 0);
        assert!(analyze_quiz(&config(), &q, now()).is_empty());
    }

    #[test]
    fn test_quiz_slow_and_skippy() {
        let q = quiz("q0", 0.9, 900.0, 5);
        let recs = analyze_quiz(&config(), &q, now());
        assert!(recs.iter().any(|r| r.kind == RecommendationType::TimeManagement));
        assert!(recs.iter().any(|r| r.kind == RecommendationType::SkipPattern));
    }
}
