//! Mapping abstract load targets onto available equipment.

use std::collections::BTreeMap;

use crate::models::{Equipment, EquipmentInventory, EquipmentKind, EquipmentOption, ExerciseLoad};

/// Targets above this are read as a two-hand total for dumbbells.
const DUMBBELL_TOTAL_THRESHOLD: f64 = 80.0;

fn closest(weights: &[f64], target: f64) -> Option<f64> {
    weights
        .iter()
        .copied()
        .filter(|w| w.is_finite())
        .min_by(|a, b| {
            (a - target)
                .abs()
                .total_cmp(&(b - target).abs())
                .then(a.total_cmp(b))
        })
}

/// Every achievable barbell total (bar plus both sides) keyed by hundredths,
/// with one side's plates for each.
fn barbell_totals(bar: f64, plate_pairs: &[f64]) -> BTreeMap<i64, Vec<f64>> {
    let mut sides: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    sides.insert(0, Vec::new());
    for plate in plate_pairs {
        let current: Vec<(i64, Vec<f64>)> = sides
            .iter()
            .map(|(sum, plates)| (*sum, plates.clone()))
            .collect();
        for (sum, plates) in current {
            let key = sum + (plate * 100.0).round() as i64;
            sides.entry(key).or_insert_with(|| {
                let mut next = plates;
                next.push(*plate);
                next
            });
        }
    }
    let bar_key = (bar * 100.0).round() as i64;
    sides
        .into_iter()
        .map(|(side, plates)| (bar_key + 2 * side, plates))
        .collect()
}

/// Resolves a target load for the chosen equipment option. Returns `None`
/// when there is no target or the equipment carries no external load.
pub fn resolve(
    option: &EquipmentOption,
    target: Option<f64>,
    inventory: &EquipmentInventory,
) -> Option<ExerciseLoad> {
    let target = target.filter(|t| t.is_finite() && *t > 0.0)?;
    match option.item {
        Equipment::Dumbbell => {
            let per_hand_target = if target > DUMBBELL_TOTAL_THRESHOLD {
                target / 2.0
            } else {
                target
            };
            let per_hand = closest(&inventory.dumbbells, per_hand_target)?;
            Some(ExerciseLoad::Dumbbells {
                per_hand,
                total: per_hand * 2.0,
            })
        }
        Equipment::Kettlebell => {
            closest(&inventory.kettlebells, target).map(|weight| ExerciseLoad::Kettlebell { weight })
        }
        Equipment::Band => inventory
            .bands
            .iter()
            .max()
            .map(|tier| ExerciseLoad::Band { tier: *tier }),
        Equipment::Barbell | Equipment::SquatRack | Equipment::BenchPress => {
            let barbell = &inventory.barbell;
            let target_key = (target * 100.0).round() as i64;
            let (total, plates) = barbell_totals(barbell.bar_weight, &barbell.plates)
                .into_iter()
                .min_by_key(|(total, _)| ((total - target_key).abs(), *total))?;
            let mut plates_per_side = plates;
            plates_per_side.sort_by(|a, b| b.total_cmp(a));
            Some(ExerciseLoad::Barbell {
                total: total as f64 / 100.0,
                bar_weight: barbell.bar_weight,
                plates_per_side,
            })
        }
        item if item.kind() == EquipmentKind::Machine || item == Equipment::SmithMachine => {
            Some(ExerciseLoad::Machine { stack: target })
        }
        _ => None,
    }
}
