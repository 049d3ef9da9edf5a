//! In-progress scheduling units owned by a single build call.

use crate::load;
use crate::models::{
    EquipmentInventory, EquipmentOption, Exercise, ExerciseLoad, Experience, Goal, Intensity,
    MovementFamily, PoolSource, Prescription, SessionExercise,
};
use crate::prescription::{self, PrescriptionOptions};
use crate::tables::EngineTables;
use crate::timing::{self, TimeEstimate};

use super::bounds::SessionBounds;

/// Upper limit on sets for any single exercise.
const ABSOLUTE_MAX_SETS: u8 = 6;

/// Session-wide inputs needed to plan one exercise.
#[derive(Debug, Clone, Copy)]
pub struct PlanningContext<'a> {
    pub tables: &'a EngineTables,
    pub inventory: &'a EquipmentInventory,
    pub goal: Goal,
    pub intensity: Intensity,
    pub experience: Experience,
    pub options: PrescriptionOptions,
    pub bounds: SessionBounds,
}

/// An exercise accepted into a session with its evolving prescription.
#[derive(Debug, Clone)]
pub struct PlannedExercise<'c> {
    pub exercise: &'c Exercise,
    /// Equipment alternative resolved against the inventory
    pub option: EquipmentOption,
    pub source: PoolSource,
    pub family: MovementFamily,
    pub goal: Goal,
    pub prescription: Prescription,
    pub load: Option<ExerciseLoad>,
    pub estimate: TimeEstimate,
    pub min_sets: u8,
    pub max_sets: u8,
}

impl<'c> PlannedExercise<'c> {
    /// Plans an exercise, or `None` when no equipment alternative is
    /// satisfiable.
    pub fn new(exercise: &'c Exercise, source: PoolSource, ctx: &PlanningContext<'_>) -> Option<Self> {
        let option = ctx.inventory.first_satisfied(&exercise.equipment)?.clone();
        let prescription = prescription::adapt(
            exercise,
            ctx.goal,
            ctx.intensity,
            ctx.experience,
            ctx.options,
        );
        let min_sets = ctx.bounds.min_sets.min(prescription.sets);
        let max_sets = ctx
            .bounds
            .max_sets
            .max(prescription.sets)
            .min(ABSOLUTE_MAX_SETS);
        let load = load::resolve(&option, exercise.load_target, ctx.inventory);
        let estimate = timing::estimate(exercise, &prescription, Some(&option), ctx.goal);
        Some(Self {
            exercise,
            option,
            source,
            family: ctx.tables.family(exercise),
            goal: ctx.goal,
            prescription,
            load,
            estimate,
            min_sets,
            max_sets,
        })
    }

    pub fn name(&self) -> &str {
        &self.exercise.name
    }

    pub fn sets(&self) -> u8 {
        self.prescription.sets
    }

    pub fn minutes(&self) -> f64 {
        self.estimate.total_minutes
    }

    /// Minutes this exercise would take with a different set count.
    pub fn minutes_with_sets(&self, sets: u8) -> f64 {
        let prescription = Prescription {
            sets,
            ..self.prescription.clone()
        };
        timing::estimate(self.exercise, &prescription, Some(&self.option), self.goal).total_minutes
    }

    /// Changes the set count and recomputes the estimate.
    pub fn set_sets(&mut self, sets: u8) {
        self.prescription.sets = sets;
        self.estimate = timing::estimate(
            self.exercise,
            &self.prescription,
            Some(&self.option),
            self.goal,
        );
    }

    pub fn can_add_set(&self) -> bool {
        self.sets() < self.max_sets
    }

    /// Whether a set fits under the absolute ceiling, ignoring the
    /// duration band.
    pub fn can_extend_set(&self) -> bool {
        self.sets() < ABSOLUTE_MAX_SETS
    }

    pub fn can_remove_set(&self) -> bool {
        self.sets() > self.min_sets
    }

    pub fn into_session_exercise(self) -> SessionExercise {
        let mut equipment = vec![self.option.item];
        equipment.extend(self.option.requires.iter().map(|req| req.item));
        SessionExercise {
            name: self.exercise.name.clone(),
            category: self.exercise.category,
            primary_muscle: self.exercise.primary_muscle.clone(),
            secondary_muscles: self.exercise.secondary_muscles.clone(),
            movement_pattern: self.exercise.movement_pattern.clone(),
            family: self.family,
            equipment,
            source: self.source,
            sets: self.prescription.sets,
            reps: self.prescription.reps,
            rpe: self.prescription.rpe,
            rest_seconds: self.prescription.rest_seconds,
            load: self.load,
            estimated_minutes: round1(self.estimate.total_minutes),
            setup_minutes: self.estimate.setup_minutes,
        }
    }
}

/// Total estimated minutes of a set of picks.
pub fn total_minutes(picks: &[PlannedExercise<'_>]) -> f64 {
    picks.iter().map(PlannedExercise::minutes).sum()
}

/// Total prescribed sets of a set of picks.
pub fn total_sets(picks: &[PlannedExercise<'_>]) -> u32 {
    picks.iter().map(|p| u32::from(p.sets())).sum()
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
