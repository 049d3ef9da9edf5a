mod common;

use std::collections::BTreeSet;

use common::{create_test_engine, full_gym, no_equipment, request};
use liftplan_core::{
    models::{Category, Equipment, SessionWarning, Weekday},
    normalize::normalize,
    params::{BuildMultiSession, BuildSession, BuildWeek, InspectPools, ValidateInput},
    BuildOutcome, EngineError, Focus, SessionHistory,
};
use serde_json::json;

fn session_params(input: serde_json::Value, focus: &str, seed: u32) -> BuildSession {
    BuildSession {
        input,
        focus: Some(focus.to_string()),
        seed: Some(seed),
        history: None,
    }
}

#[test]
fn test_identical_requests_build_identical_sessions() {
    let engine = create_test_engine();
    let params = session_params(request("hypertrophy", "intermediate", 60, full_gym()), "back", 42);

    let first = engine.build_session(&params).unwrap();
    let second = engine.build_session(&params).unwrap();
    assert_eq!(first, second);

    let first = serde_json::to_string(&first.built().unwrap()).unwrap();
    let second = serde_json::to_string(&second.built().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_seed_falls_back_to_goal_and_duration() {
    let engine = create_test_engine();
    let mut params = session_params(request("general", "beginner", 30, json!({})), "full_body", 0);
    params.seed = None;

    let first = engine.build_session(&params).unwrap();
    let second = engine.build_session(&params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_minimal_time_core_session() {
    let engine = create_test_engine();
    let input = json!({
        "intent": { "focuses": ["core"] },
        "experience": "beginner",
        "time": { "minutes_per_session": 20 }
    });
    let params = BuildSession {
        input,
        seed: Some(5),
        ..Default::default()
    };

    let session = engine.build_session(&params).unwrap().built().unwrap();
    assert!((2..=3).contains(&session.exercises.len()));
    assert!(session.exercises.iter().all(|e| e.setup_minutes <= 1.0));
    assert!(
        (12.0..=28.0).contains(&session.total_minutes),
        "total {} outside [12, 28]",
        session.total_minutes
    );
}

#[test]
fn test_high_volume_strength_legs_session() {
    let engine = create_test_engine();
    let params = session_params(request("strength", "advanced", 90, full_gym()), "legs", 3);

    let session = engine.build_session(&params).unwrap().built().unwrap();
    assert!(session
        .exercises
        .iter()
        .any(|e| e.equipment.contains(&Equipment::Barbell)));
    assert!(session.primary_set_ratio.unwrap() >= 0.75);
    for exercise in &session.exercises {
        let counted = exercise.category == Category::Strength
            && exercise.reps.chars().all(|c| c.is_ascii_digit() || c == '-');
        if counted {
            assert!(
                ["3-6", "4-6"].contains(&exercise.reps.as_str()),
                "{} has reps {}",
                exercise.name,
                exercise.reps
            );
        }
    }
}

#[test]
fn test_empty_equipment_still_builds_full_body() {
    let engine = create_test_engine();
    let params = session_params(request("general", "intermediate", 30, no_equipment()), "full_body", 8);

    let session = engine.build_session(&params).unwrap().built().unwrap();
    assert!(!session.is_empty());
    assert!(session.has_warning(SessionWarning::EmptyEquipmentInventory));
    assert!(session
        .exercises
        .iter()
        .all(|e| e.equipment == vec![Equipment::Bodyweight]));
}

#[test]
fn test_chest_and_back_merge() {
    let engine = create_test_engine();
    let params = BuildMultiSession {
        input: request("general", "intermediate", 60, full_gym()),
        focuses: vec!["chest".to_string(), "back".to_string()],
        seed: Some(21),
        history: None,
    };

    let session = engine.build_multi_session(&params).unwrap().built().unwrap();
    assert!(!session.is_empty());
    assert!(session.exercises.len() <= 7);
    let unique: BTreeSet<String> = session
        .exercises
        .iter()
        .map(|e| e.name.to_lowercase())
        .collect();
    assert_eq!(unique.len(), session.exercises.len());
    assert_eq!(session.focus.len(), 2);
}

#[test]
fn test_strength_full_body_stays_near_budget() {
    let engine = create_test_engine();
    for seed in [1, 2, 3] {
        let params = session_params(request("strength", "intermediate", 45, full_gym()), "full_body", seed);
        let session = engine.build_session(&params).unwrap().built().unwrap();
        assert!(
            session.total_minutes <= 45.0 + 8.0,
            "seed {seed}: {} minutes",
            session.total_minutes
        );
    }
}

#[test]
fn test_long_sessions_fill_the_budget_or_report_shortfall() {
    let engine = create_test_engine();
    let cases = [
        ("general", 60, "core"),
        ("hypertrophy", 90, "core"),
        ("hypertrophy", 90, "chest"),
        ("hypertrophy", 120, "chest"),
        ("hypertrophy", 45, "chest"),
    ];

    for (goal, minutes, focus) in cases {
        let params = session_params(request(goal, "intermediate", minutes, full_gym()), focus, 1);
        let session = engine.build_session(&params).unwrap().built().unwrap();
        let label = format!("{goal} {minutes} {focus}");
        let short = session.has_warning(SessionWarning::TimeBudgetShortfall);

        assert!(
            session.total_minutes >= f64::from(minutes) - 8.0 || short,
            "{label}: {} minutes without a shortfall warning",
            session.total_minutes
        );
        assert_eq!(short, session.rationale.contains("run short of the available time"));

        let signatures: Vec<_> = session
            .exercises
            .iter()
            .map(|e| {
                (
                    e.movement_pattern.to_lowercase(),
                    e.primary_muscle.to_lowercase(),
                    e.family,
                )
            })
            .collect();
        let largest = signatures
            .iter()
            .map(|sig| signatures.iter().filter(|other| *other == sig).count())
            .max()
            .unwrap_or(0);
        if largest <= signatures.len() - largest + 1 {
            for pair in signatures.windows(2) {
                assert_ne!(pair[0], pair[1], "{label}: identical neighbours");
            }
        }
    }
}

#[test]
fn test_equipment_is_always_satisfiable() {
    let engine = create_test_engine();
    let input = request(
        "hypertrophy",
        "intermediate",
        45,
        json!({ "dumbbells": [10.0, 15.0, 20.0], "bench": true }),
    );
    for focus in ["chest", "back", "shoulders", "arms", "legs", "glutes", "core"] {
        let session = engine
            .build_session(&session_params(input.clone(), focus, 13))
            .unwrap()
            .built()
            .unwrap();
        for exercise in &session.exercises {
            for item in &exercise.equipment {
                assert!(
                    matches!(item, Equipment::Bodyweight | Equipment::Dumbbell | Equipment::Bench),
                    "{focus}: {} uses {item:?}",
                    exercise.name
                );
            }
        }
    }
}

#[test]
fn test_invalid_request_returns_messages() {
    let engine = create_test_engine();
    let params = BuildSession {
        input: json!({ "time": { "minutes_per_session": 5 } }),
        ..Default::default()
    };

    match engine.build_session(&params).unwrap() {
        BuildOutcome::Invalid(problems) => {
            assert!(problems.iter().any(|p| p.contains("Minutes per session")));
            assert!(problems.iter().any(|p| p.contains("goal or at least one focus")));
        }
        BuildOutcome::Built(_) => panic!("Expected validation failure"),
    }
}

#[test]
fn test_unknown_focus_is_an_error() {
    let engine = create_test_engine();
    let params = session_params(json!({}), "wings", 1);
    assert!(matches!(
        engine.build_session(&params),
        Err(EngineError::InvalidInput { .. })
    ));
}

#[test]
fn test_validate_reports_recoverable_problems_too() {
    let engine = create_test_engine();
    let params = ValidateInput {
        input: json!({
            "intent": { "goal": "strength" },
            "equipment": { "bodyweight": false },
            "schedule": { "days_available": [] }
        }),
        weekly: true,
    };

    let report = engine.validate(&params).unwrap();
    assert_eq!(report.len(), 2);
    assert!(report.to_string().contains("No equipment is available"));
}

#[test]
fn test_weekly_plan_schedules_dated_sessions() {
    let engine = create_test_engine();
    let params = BuildWeek {
        input: json!({
            "intent": { "goal": "general" },
            "equipment": full_gym(),
            "time": { "minutes_per_session": 40 },
            "schedule": {
                "days_available": ["monday", "tuesday", "thursday", "saturday"],
                "min_rest_days": 1,
                "week_start": "2025-03-03"
            }
        }),
        seed: Some(4),
        history: None,
    };

    let plan = engine.build_week(&params).unwrap().built().unwrap();
    let days: Vec<Weekday> = plan.sessions.iter().map(|s| s.day).collect();
    assert_eq!(days, vec![Weekday::Monday, Weekday::Thursday, Weekday::Saturday]);
    let dates: Vec<String> = plan
        .sessions
        .iter()
        .map(|s| s.date.unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2025-03-03", "2025-03-06", "2025-03-08"]);

    assert!(plan.sessions.iter().all(|s| !s.session.is_empty()));
    assert_ne!(plan.sessions[0].session.exercises, plan.sessions[1].session.exercises);
    assert!(plan.impact.score > 0.0);
    assert!(plan.rationale.contains("3 sessions"));
}

#[test]
fn test_week_without_days_is_invalid() {
    let engine = create_test_engine();
    let params = BuildWeek {
        input: json!({ "intent": { "goal": "general" }, "schedule": { "days_available": [] } }),
        ..Default::default()
    };
    assert!(!engine.build_week(&params).unwrap().is_built());
}

#[test]
fn test_pools_respect_goal_fit() {
    let engine = create_test_engine();
    let params = InspectPools {
        input: request("strength", "intermediate", 45, full_gym()),
        focus: "legs".to_string(),
    };

    let listing = engine.pools(&params).unwrap();
    assert!(!listing.primary.is_empty());
    assert!(listing.secondary.len() >= listing.primary.len());
    for name in &listing.primary {
        let exercise = engine.catalog().find(name).unwrap();
        assert_eq!(exercise.category, Category::Strength);
    }
    assert!(listing.fallback.iter().all(|name| {
        engine.catalog().find(name).unwrap().category != Category::Cardio
    }));
}

#[test]
fn test_build_from_normalized_input() {
    let engine = create_test_engine();
    let input = normalize(&request("hypertrophy", "beginner", 30, full_gym())).unwrap();

    let direct = engine.build_session_for(&input, Focus::Arms, &SessionHistory::default(), 6);
    let params = BuildSession {
        input: request("hypertrophy", "beginner", 30, full_gym()),
        focus: Some("arms".to_string()),
        seed: Some(6),
        history: None,
    };
    let validated = engine.build_session(&params).unwrap().built().unwrap();
    assert_eq!(direct, validated);
}
