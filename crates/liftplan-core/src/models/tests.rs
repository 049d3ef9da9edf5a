#[cfg(test)]
mod model_tests {
    use serde_json::json;

    use crate::models::{
        BandTier, Category, Equipment, ExerciseLoad, Focus, GeneratedSession, Goal, ImpactScore,
        MovementFamily, PoolSource, SessionError, SessionExercise, SessionHistory,
        SessionWarning,
    };

    fn create_test_exercise(name: &str, pattern: &str, muscle: &str) -> SessionExercise {
        SessionExercise {
            name: name.to_string(),
            category: Category::Strength,
            primary_muscle: muscle.to_string(),
            secondary_muscles: vec![],
            movement_pattern: pattern.to_string(),
            family: MovementFamily::Press,
            equipment: vec![Equipment::Band],
            source: PoolSource::Secondary,
            sets: 3,
            reps: "8-12".to_string(),
            rpe: 7,
            rest_seconds: 75,
            load: Some(ExerciseLoad::Band {
                tier: BandTier::Medium,
            }),
            estimated_minutes: 5.5,
            setup_minutes: 0.5,
        }
    }

    fn create_test_session(exercises: Vec<SessionExercise>) -> GeneratedSession {
        GeneratedSession {
            focus: vec![Focus::Chest],
            goal: Goal::General,
            target_minutes: 30,
            total_minutes: 11.0,
            total_sets: 6,
            exercises,
            primary_set_ratio: None,
            repeats_allowed: false,
            warnings: vec![],
            error: None,
            impact: ImpactScore::default(),
            rationale: String::new(),
        }
    }

    #[test]
    fn test_session_serializes_snake_case_codes() {
        let mut session = create_test_session(vec![]);
        session.warnings = vec![SessionWarning::EmptyEquipmentInventory];
        session.error = Some(SessionError::FocusConstraintsUnmet);

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["warnings"], json!(["empty_equipment_inventory"]));
        assert_eq!(value["error"], json!("focus_constraints_unmet"));
        assert_eq!(value["focus"], json!(["chest"]));
        assert!(value.get("primary_set_ratio").is_none());
    }

    #[test]
    fn test_load_is_tagged_by_kind() {
        let exercise = create_test_exercise("Band Chest Press", "horizontal_push", "chest");
        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["load"], json!({ "kind": "band", "tier": "medium" }));
        assert_eq!(value["source"], json!("secondary"));

        let back: SessionExercise = serde_json::from_value(value).unwrap();
        assert_eq!(back, exercise);
    }

    #[test]
    fn test_history_prepends_most_recent_first() {
        let history = SessionHistory {
            recent_names: vec!["Old Row".to_string()],
            recent_patterns: vec!["horizontal_pull".to_string()],
            recent_muscles: vec!["upper_back".to_string()],
        };
        let session = create_test_session(vec![
            create_test_exercise("Band Chest Press", "horizontal_push", "chest"),
            create_test_exercise("Band Pull-Apart", "horizontal_pull", "upper_back"),
        ]);

        let next = history.prepend_session(&session);
        assert_eq!(
            next.recent_names,
            vec!["Band Chest Press", "Band Pull-Apart", "Old Row"]
        );
        assert!(next.contains_name("band chest press"));
        assert!(next.contains_pattern("HORIZONTAL_PUSH"));
        assert!(next.contains_muscle("upper_back"));
        // the source history is untouched
        assert_eq!(history.recent_names.len(), 1);
    }

    #[test]
    fn test_empty_history() {
        let history: SessionHistory = serde_json::from_value(json!({})).unwrap();
        assert!(history.is_empty());
        assert!(!history.contains_name("Push-Up"));
    }
}
