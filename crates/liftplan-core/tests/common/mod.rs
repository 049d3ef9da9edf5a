#![allow(dead_code)]

use liftplan_core::{Engine, EngineBuilder};
use serde_json::{json, Value};

/// Engine over the bundled catalog with default tunables.
pub fn create_test_engine() -> Engine {
    EngineBuilder::new()
        .build()
        .expect("Failed to create engine")
}

/// Inventory with every equipment type available.
pub fn full_gym() -> Value {
    json!({
        "bodyweight": true,
        "dumbbells": [5.0, 7.5, 10.0, 12.5, 15.0, 17.5, 20.0, 25.0, 30.0],
        "kettlebells": [12.0, 16.0, 20.0, 24.0],
        "bands": ["light", "medium", "heavy"],
        "barbell": {
            "available": true,
            "bar_weight": 20.0,
            "plates": [20.0, 20.0, 10.0, 5.0, 2.5, 1.25],
            "squat_rack": true,
            "bench_press": true
        },
        "machines": {
            "cable": true, "leg_press": true, "lat_pulldown": true,
            "smith_machine": true, "leg_extension": true, "leg_curl": true,
            "chest_press": true, "treadmill": true, "bike": true, "rower": true
        },
        "bench": true,
        "pullup_bar": true
    })
}

/// Inventory with every field false or empty.
pub fn no_equipment() -> Value {
    json!({
        "bodyweight": false,
        "dumbbells": [],
        "kettlebells": [],
        "bands": [],
        "barbell": { "available": false, "plates": [] },
        "machines": {},
        "bench": false,
        "pullup_bar": false
    })
}

/// Partial request with the given goal, experience and duration.
pub fn request(goal: &str, experience: &str, minutes: u32, equipment: Value) -> Value {
    json!({
        "intent": { "goal": goal },
        "experience": experience,
        "equipment": equipment,
        "time": { "minutes_per_session": minutes }
    })
}
