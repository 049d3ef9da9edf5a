//! Equipment inventory snapshot supplied by the caller.

use serde::{Deserialize, Serialize};

use super::exercise::{Equipment, EquipmentOption};

/// Resistance band tiers, ordered from lightest to heaviest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BandTier {
    Light,
    Medium,
    Heavy,
    ExtraHeavy,
}

impl BandTier {
    /// Nominal resistance of the tier.
    pub fn resistance(&self) -> f64 {
        match self {
            BandTier::Light => 5.0,
            BandTier::Medium => 10.0,
            BandTier::Heavy => 20.0,
            BandTier::ExtraHeavy => 30.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BandTier::Light => "light",
            BandTier::Medium => "medium",
            BandTier::Heavy => "heavy",
            BandTier::ExtraHeavy => "extra heavy",
        }
    }
}

/// Barbell availability and plate set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarbellInventory {
    pub available: bool,

    /// Weight of the empty bar
    pub bar_weight: f64,

    /// Available plates; each entry is one pair of that weight
    pub plates: Vec<f64>,

    pub squat_rack: bool,

    pub bench_press: bool,
}

impl Default for BarbellInventory {
    fn default() -> Self {
        Self {
            available: false,
            bar_weight: 20.0,
            plates: Vec::new(),
            squat_rack: false,
            bench_press: false,
        }
    }
}

/// Machine-type flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MachineInventory {
    pub cable: bool,
    pub leg_press: bool,
    pub lat_pulldown: bool,
    pub smith_machine: bool,
    pub leg_extension: bool,
    pub leg_curl: bool,
    pub chest_press: bool,
    pub treadmill: bool,
    pub bike: bool,
    pub rower: bool,
}

impl MachineInventory {
    fn any(&self) -> bool {
        self.cable
            || self.leg_press
            || self.lat_pulldown
            || self.smith_machine
            || self.leg_extension
            || self.leg_curl
            || self.chest_press
            || self.treadmill
            || self.bike
            || self.rower
    }
}

/// What the user has available. Read-only for the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EquipmentInventory {
    pub bodyweight: bool,

    /// Per-hand dumbbell weights
    pub dumbbells: Vec<f64>,

    pub kettlebells: Vec<f64>,

    pub bands: Vec<BandTier>,

    pub barbell: BarbellInventory,

    pub machines: MachineInventory,

    pub bench: bool,

    pub pullup_bar: bool,
}

impl Default for EquipmentInventory {
    fn default() -> Self {
        Self::bodyweight_only()
    }
}

impl EquipmentInventory {
    /// Inventory with nothing but bodyweight.
    pub fn bodyweight_only() -> Self {
        Self {
            bodyweight: true,
            dumbbells: Vec::new(),
            kettlebells: Vec::new(),
            bands: Vec::new(),
            barbell: BarbellInventory::default(),
            machines: MachineInventory::default(),
            bench: false,
            pullup_bar: false,
        }
    }

    /// Inventory with nothing at all.
    pub fn empty() -> Self {
        Self {
            bodyweight: false,
            ..Self::bodyweight_only()
        }
    }

    /// Whether a single piece of equipment is available.
    pub fn has(&self, item: Equipment) -> bool {
        match item {
            Equipment::Bodyweight => self.bodyweight,
            Equipment::Dumbbell => !self.dumbbells.is_empty(),
            Equipment::Kettlebell => !self.kettlebells.is_empty(),
            Equipment::Band => !self.bands.is_empty(),
            Equipment::Barbell => self.barbell.available,
            Equipment::SquatRack => self.barbell.squat_rack,
            Equipment::BenchPress => self.barbell.bench_press,
            Equipment::Bench => self.bench,
            Equipment::PullupBar => self.pullup_bar,
            Equipment::Cable => self.machines.cable,
            Equipment::LegPress => self.machines.leg_press,
            Equipment::LatPulldown => self.machines.lat_pulldown,
            Equipment::SmithMachine => self.machines.smith_machine,
            Equipment::LegExtension => self.machines.leg_extension,
            Equipment::LegCurl => self.machines.leg_curl,
            Equipment::ChestPress => self.machines.chest_press,
            Equipment::Treadmill => self.machines.treadmill,
            Equipment::Bike => self.machines.bike,
            Equipment::Rower => self.machines.rower,
        }
    }

    /// Whether an equipment option, including all of its nested
    /// requirements, is available.
    pub fn satisfies(&self, option: &EquipmentOption) -> bool {
        self.has(option.item) && option.requires.iter().all(|req| self.satisfies(req))
    }

    /// First option of the list that this inventory satisfies.
    pub fn first_satisfied<'a>(&self, options: &'a [EquipmentOption]) -> Option<&'a EquipmentOption> {
        options.iter().find(|option| self.satisfies(option))
    }

    /// Whether anything at all is available.
    pub fn has_any(&self) -> bool {
        self.bodyweight
            || !self.dumbbells.is_empty()
            || !self.kettlebells.is_empty()
            || !self.bands.is_empty()
            || self.barbell.available
            || self.bench
            || self.pullup_bar
            || self.machines.any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_requirements_are_checked() {
        let mut inventory = EquipmentInventory::bodyweight_only();
        inventory.barbell.available = true;

        let bench = EquipmentOption::new(Equipment::Barbell).requiring(Equipment::BenchPress);
        assert!(!inventory.satisfies(&bench));

        inventory.barbell.bench_press = true;
        assert!(inventory.satisfies(&bench));
    }

    #[test]
    fn test_partial_barbell_object_keeps_defaults() {
        let inventory: EquipmentInventory =
            serde_json::from_str(r#"{"barbell":{"available":true}}"#).unwrap();
        assert!(inventory.barbell.available);
        assert_eq!(inventory.barbell.bar_weight, 20.0);
        assert!(inventory.bodyweight);
    }

    #[test]
    fn test_empty_inventory_has_nothing() {
        assert!(!EquipmentInventory::empty().has_any());
        assert!(EquipmentInventory::bodyweight_only().has_any());
    }
}
