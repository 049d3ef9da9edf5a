//! Static lookup tables: focus→muscle maps, focus constraints, parent
//! regions and name-keyword heuristics.
//!
//! The tables are built once by the engine and passed by reference into the
//! filter, scorer and builder.

use std::collections::BTreeMap;

use crate::models::{Category, Exercise, Focus, MovementFamily};

/// The rule that a body-part focus's primary muscles must dominate the
/// prescribed sets, with a narrower set of accessory muscles allowed to fill
/// the remaining capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusConstraint {
    pub primary_muscles: Vec<String>,
    pub accessory_muscles: Vec<String>,
}

impl FocusConstraint {
    pub fn is_primary(&self, muscle: &str) -> bool {
        self.primary_muscles
            .iter()
            .any(|m| m.eq_ignore_ascii_case(muscle))
    }

    pub fn is_accessory(&self, muscle: &str) -> bool {
        self.accessory_muscles
            .iter()
            .any(|m| m.eq_ignore_ascii_case(muscle))
    }

    /// Drops accessory muscles that another focus of the same request owns.
    pub fn without_accessories<'a>(&self, excluded: impl IntoIterator<Item = &'a str>) -> Self {
        let excluded: Vec<&str> = excluded.into_iter().collect();
        Self {
            primary_muscles: self.primary_muscles.clone(),
            accessory_muscles: self
                .accessory_muscles
                .iter()
                .filter(|m| !excluded.iter().any(|e| e.eq_ignore_ascii_case(m)))
                .cloned()
                .collect(),
        }
    }
}

/// Immutable lookup data shared by every build call.
#[derive(Debug, Clone)]
pub struct EngineTables {
    focus_muscles: BTreeMap<Focus, Vec<String>>,
    accessory_muscles: BTreeMap<Focus, Vec<String>>,
    parent_regions: BTreeMap<Focus, Focus>,
    /// Ordered; the first family with a matching keyword wins
    family_keywords: Vec<(MovementFamily, Vec<String>)>,
    high_impact_keywords: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for EngineTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl EngineTables {
    /// The standard tables.
    pub fn standard() -> Self {
        let chest = strings(&["chest"]);
        let back = strings(&["lats", "upper_back", "lower_back"]);
        let shoulders = strings(&["shoulders"]);
        let arms = strings(&["biceps", "triceps", "forearms"]);
        let legs = strings(&["quads", "hamstrings", "glutes", "calves", "adductors"]);

        let mut upper_body = Vec::new();
        for group in [&chest, &back, &shoulders, &arms] {
            upper_body.extend(group.iter().cloned());
        }
        let mut lower_body = legs.clone();
        lower_body.push("hip_flexors".to_string());

        let focus_muscles = BTreeMap::from([
            (Focus::Chest, chest),
            (Focus::Back, back),
            (Focus::Shoulders, shoulders),
            (Focus::Arms, arms),
            (Focus::Legs, legs),
            (Focus::Glutes, strings(&["glutes", "hamstrings"])),
            (
                Focus::Core,
                strings(&["abs", "obliques", "lower_back", "hip_flexors"]),
            ),
            (Focus::UpperBody, upper_body),
            (Focus::LowerBody, lower_body),
        ]);

        let accessory_muscles = BTreeMap::from([
            (Focus::Chest, strings(&["triceps", "shoulders"])),
            (Focus::Back, strings(&["biceps", "shoulders", "forearms"])),
            (Focus::Shoulders, strings(&["triceps", "upper_back"])),
            (Focus::Arms, strings(&["shoulders", "chest"])),
            (Focus::Legs, strings(&["abs", "lower_back"])),
            (
                Focus::Glutes,
                strings(&["quads", "adductors", "lower_back"]),
            ),
            (Focus::Core, strings(&["glutes"])),
        ]);

        let parent_regions = Focus::ALL
            .into_iter()
            .map(|focus| {
                let parent = match focus {
                    Focus::Chest | Focus::Back | Focus::Shoulders | Focus::Arms => {
                        Focus::UpperBody
                    }
                    Focus::Legs | Focus::Glutes => Focus::LowerBody,
                    _ => Focus::FullBody,
                };
                (focus, parent)
            })
            .collect();

        let family_keywords = vec![
            (
                MovementFamily::Lunge,
                strings(&["split squat", "lunge", "step-up", "step up"]),
            ),
            (
                MovementFamily::Squat,
                strings(&["squat", "leg press", "leg extension"]),
            ),
            (
                MovementFamily::Hinge,
                strings(&[
                    "deadlift",
                    "rdl",
                    "good morning",
                    "hip thrust",
                    "bridge",
                    "swing",
                    "back extension",
                    "leg curl",
                    "superman",
                ]),
            ),
            (MovementFamily::Carry, strings(&["carry"])),
            (
                MovementFamily::Core,
                strings(&[
                    "plank",
                    "crunch",
                    "dead bug",
                    "hollow",
                    "twist",
                    "leg raise",
                    "bird dog",
                    "woodchop",
                    "rollout",
                    "pallof",
                ]),
            ),
            (
                MovementFamily::Press,
                strings(&["press", "push-up", "pushup", "push up", "dip"]),
            ),
            (
                MovementFamily::Pull,
                strings(&["pull", "row", "chin-up", "chin up", "pulldown"]),
            ),
            (MovementFamily::Curl, strings(&["curl"])),
            (
                MovementFamily::Extension,
                strings(&["pushdown", "extension", "skull crusher"]),
            ),
            (MovementFamily::Raise, strings(&["raise", "fly"])),
        ];

        let high_impact_keywords =
            strings(&["jump", "burpee", "sprint", "plyo", "box", "skip", "run"]);

        Self {
            focus_muscles,
            accessory_muscles,
            parent_regions,
            family_keywords,
            high_impact_keywords,
        }
    }

    /// Muscles mapped onto a body-part focus. Empty for full_body, cardio and
    /// mobility, which match on category instead.
    pub fn focus_muscles(&self, focus: Focus) -> &[String] {
        self.focus_muscles
            .get(&focus)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether an exercise maps onto the focus.
    pub fn matches_focus(&self, exercise: &Exercise, focus: Focus) -> bool {
        match focus {
            Focus::FullBody => true,
            Focus::Cardio => exercise.category == Category::Cardio,
            Focus::Mobility => exercise.category == Category::Mobility,
            _ => self
                .focus_muscles(focus)
                .iter()
                .any(|m| m.eq_ignore_ascii_case(&exercise.primary_muscle)),
        }
    }

    /// The focus constraint for body-part focuses that declare one.
    pub fn constraint(&self, focus: Focus) -> Option<FocusConstraint> {
        let accessory = self.accessory_muscles.get(&focus)?;
        Some(FocusConstraint {
            primary_muscles: self.focus_muscles(focus).to_vec(),
            accessory_muscles: accessory.clone(),
        })
    }

    pub fn parent_region(&self, focus: Focus) -> Focus {
        self.parent_regions
            .get(&focus)
            .copied()
            .unwrap_or(Focus::FullBody)
    }

    /// Classifies an exercise into a movement family from its category and
    /// name keywords.
    pub fn family(&self, exercise: &Exercise) -> MovementFamily {
        match exercise.category {
            Category::Cardio => return MovementFamily::Cardio,
            Category::Mobility => return MovementFamily::Mobility,
            Category::Strength => {}
        }
        self.family_of_name(&exercise.name)
    }

    /// Keywords, which may span several words, match from the start of a
    /// word, so "row" flags "Cable Row" but not "Medicine Ball Throw".
    pub fn family_of_name(&self, name: &str) -> MovementFamily {
        let name = name.to_lowercase();
        self.family_keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| starts_word(&name, k)))
            .map(|(family, _)| *family)
            .unwrap_or(MovementFamily::Other)
    }

    /// Whether an exercise is a high-impact movement. Keywords match the
    /// start of a word, so "run" flags "running" but not "crunch".
    pub fn is_high_impact(&self, exercise: &Exercise) -> bool {
        if exercise.high_impact {
            return true;
        }
        let name = exercise.name.to_lowercase();
        name.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| {
                self.high_impact_keywords
                    .iter()
                    .any(|k| word.starts_with(k.as_str()))
            })
    }

    /// Strength exercises of a multi-joint family.
    pub fn is_compound(&self, exercise: &Exercise) -> bool {
        exercise.category == Category::Strength && self.family(exercise).is_compound()
    }
}

fn starts_word(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword)
        .any(|(at, _)| !matches!(text[..at].chars().next_back(), Some(c) if c.is_alphanumeric()))
}
