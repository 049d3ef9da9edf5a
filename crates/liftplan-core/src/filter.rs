//! Catalog filtering into per-focus selection pools.

use crate::models::{
    Category, CategoryFit, EquipmentInventory, Exercise, Focus, Goal, Preferences,
};
use crate::tables::{EngineTables, FocusConstraint};

/// How strictly an exercise's category must serve the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalFilter {
    /// The category must natively serve the goal
    Native,
    /// Native or compatible categories pass
    Compatible,
}

impl GoalFilter {
    fn admits(&self, goal: Goal, category: Category) -> bool {
        match (self, goal.category_fit(category)) {
            (_, CategoryFit::Native) => true,
            (GoalFilter::Compatible, CategoryFit::Compatible) => true,
            _ => false,
        }
    }
}

/// Per-user criteria every candidate must pass.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub inventory: &'a EquipmentInventory,
    pub preferences: &'a Preferences,
}

impl FilterContext<'_> {
    fn is_disliked(&self, exercise: &Exercise) -> bool {
        let name = exercise.name.to_lowercase();
        self.preferences
            .disliked
            .iter()
            .map(|d| d.trim().to_lowercase())
            .any(|d| !d.is_empty() && name.contains(&d))
    }

    fn passes_cardio_whitelist(&self, exercise: &Exercise) -> bool {
        if exercise.category != Category::Cardio {
            return true;
        }
        match &self.preferences.cardio_activities {
            Some(activities) if !activities.is_empty() => {
                let name = exercise.name.to_lowercase();
                activities
                    .iter()
                    .any(|a| name.contains(&a.trim().to_lowercase()))
            }
            _ => true,
        }
    }
}

/// Narrows the catalog to exercises that map onto the focus, are equippable
/// from the inventory, are not disliked, respect low-impact requests and
/// whose category is not incompatible with the goal.
pub fn filter<'c>(
    catalog: &'c [Exercise],
    focus: Focus,
    tables: &EngineTables,
    ctx: &FilterContext<'_>,
    goal: Option<(Goal, GoalFilter)>,
) -> Vec<&'c Exercise> {
    let low_impact = ctx.preferences.low_impact();
    catalog
        .iter()
        .filter(|ex| tables.matches_focus(ex, focus))
        .filter(|ex| ctx.inventory.first_satisfied(&ex.equipment).is_some())
        .filter(|ex| !ctx.is_disliked(ex))
        .filter(|ex| !(low_impact && tables.is_high_impact(ex)))
        .filter(|ex| ctx.passes_cardio_whitelist(ex))
        .filter(|ex| match goal {
            Some((goal, strictness)) => strictness.admits(goal, ex.category),
            None => true,
        })
        .collect()
}

/// The selection pools for one focus, in priority order.
#[derive(Debug, Clone, Default)]
pub struct Pools<'c> {
    pub focus: Option<Focus>,
    /// Same focus, goal-native categories only
    pub primary: Vec<&'c Exercise>,
    /// Same focus, goal-compatible categories too
    pub secondary: Vec<&'c Exercise>,
    /// Parent region, restricted to accessory muscles under a constraint
    pub accessory: Vec<&'c Exercise>,
    /// Everything usable; consulted only without a constraint
    pub fallback: Vec<&'c Exercise>,
}

impl Pools<'_> {
    /// Whether no pool has a single candidate.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
            && self.secondary.is_empty()
            && self.accessory.is_empty()
            && self.fallback.is_empty()
    }
}

/// Builds the primary, secondary, accessory and fallback pools for a focus.
pub fn build_pools<'c>(
    catalog: &'c [Exercise],
    focus: Focus,
    goal: Goal,
    tables: &EngineTables,
    ctx: &FilterContext<'_>,
    constraint: Option<&FocusConstraint>,
) -> Pools<'c> {
    let primary = filter(catalog, focus, tables, ctx, Some((goal, GoalFilter::Native)));
    let secondary = filter(
        catalog,
        focus,
        tables,
        ctx,
        Some((goal, GoalFilter::Compatible)),
    );

    let region = tables.parent_region(focus);
    let accessory = filter(
        catalog,
        region,
        tables,
        ctx,
        Some((goal, GoalFilter::Compatible)),
    )
    .into_iter()
    .filter(|ex| match constraint {
        Some(c) => c.is_accessory(&ex.primary_muscle) && !c.is_primary(&ex.primary_muscle),
        None => true,
    })
    .collect();

    let fallback = filter(
        catalog,
        Focus::FullBody,
        tables,
        ctx,
        Some((goal, GoalFilter::Compatible)),
    );

    Pools {
        focus: Some(focus),
        primary,
        secondary,
        accessory,
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Accessibility, Equipment, EquipmentOption};

    fn exercise(name: &str, category: Category, muscle: &str, item: Equipment) -> Exercise {
        Exercise {
            name: name.to_string(),
            category,
            primary_muscle: muscle.to_string(),
            secondary_muscles: vec![],
            movement_pattern: "test".to_string(),
            equipment: vec![EquipmentOption::new(item)],
            sets: 3,
            reps: "8-12".to_string(),
            rpe: 7,
            rest_seconds: 60,
            load_target: None,
            duration_minutes: None,
            high_impact: false,
        }
    }

    fn catalog() -> Vec<Exercise> {
        vec![
            exercise("Push-Up", Category::Strength, "chest", Equipment::Bodyweight),
            exercise("Dumbbell Bench Press", Category::Strength, "chest", Equipment::Dumbbell),
            exercise("Bench Dip", Category::Strength, "triceps", Equipment::Bodyweight),
            exercise("Pike Push-Up", Category::Strength, "shoulders", Equipment::Bodyweight),
            exercise("Doorway Chest Stretch", Category::Mobility, "chest", Equipment::Bodyweight),
            exercise("Burpee", Category::Cardio, "full_body", Equipment::Bodyweight),
            exercise("Stationary Bike", Category::Cardio, "quads", Equipment::Bike),
        ]
    }

    fn names(pool: &[&Exercise]) -> Vec<String> {
        pool.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_pools_split_by_goal_fit() {
        let catalog = catalog();
        let tables = EngineTables::standard();
        let inventory = EquipmentInventory::bodyweight_only();
        let preferences = Preferences::default();
        let ctx = FilterContext {
            inventory: &inventory,
            preferences: &preferences,
        };
        let constraint = tables.constraint(Focus::Chest);

        let pools = build_pools(
            &catalog,
            Focus::Chest,
            Goal::Strength,
            &tables,
            &ctx,
            constraint.as_ref(),
        );

        assert_eq!(names(&pools.primary), vec!["Push-Up"]);
        assert_eq!(
            names(&pools.secondary),
            vec!["Push-Up", "Doorway Chest Stretch"]
        );
        assert_eq!(names(&pools.accessory), vec!["Bench Dip", "Pike Push-Up"]);
        assert!(!names(&pools.fallback).contains(&"Burpee".to_string()));
    }

    #[test]
    fn test_dislikes_and_low_impact() {
        let catalog = catalog();
        let tables = EngineTables::standard();
        let inventory = EquipmentInventory::bodyweight_only();
        let preferences = Preferences {
            disliked: vec!["PUSH-UP".to_string()],
            accessibility: vec![Accessibility::LowImpact],
            ..Preferences::default()
        };
        let ctx = FilterContext {
            inventory: &inventory,
            preferences: &preferences,
        };

        let all = filter(&catalog, Focus::FullBody, &tables, &ctx, None);
        let names = names(&all);
        assert!(!names.iter().any(|n| n.contains("Push-Up")));
        assert!(!names.contains(&"Burpee".to_string()));
        assert!(names.contains(&"Bench Dip".to_string()));
    }

    #[test]
    fn test_cardio_whitelist() {
        let catalog = catalog();
        let tables = EngineTables::standard();
        let mut inventory = EquipmentInventory::bodyweight_only();
        inventory.machines.bike = true;
        let preferences = Preferences {
            cardio_activities: Some(vec!["bike".to_string()]),
            ..Preferences::default()
        };
        let ctx = FilterContext {
            inventory: &inventory,
            preferences: &preferences,
        };

        let cardio = filter(&catalog, Focus::Cardio, &tables, &ctx, None);
        assert_eq!(names(&cardio), vec!["Stationary Bike"]);
    }
}
