//! Weekly templates: training-day selection, per-day focus layout and
//! history threading across the week's sessions.

use jiff::civil::Date;
use jiff::ToSpan;
use log::{debug, info};

use crate::error::Result;
use crate::impact;
use crate::merge::{self, MergeSpec};
use crate::models::{
    Focus, GeneratedPlan, Goal, PlanInput, ScheduledSession, SessionHistory, Weekday,
};
use crate::rationale;
use crate::rng::derive_seed;
use crate::session::BuildEnv;

/// Shortest session a weekly total may be split into.
const MIN_SLOT_MINUTES: u32 = 20;

/// One training day of the week with what to train on it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSlot {
    pub day: Weekday,
    pub focuses: Vec<Focus>,
    pub goal: Goal,
}

fn gap(from: Weekday, to: Weekday) -> u8 {
    (to.index() + 7 - from.index()) % 7
}

fn greedy_from(days: &[Weekday], start: usize, spacing: u8) -> Vec<Weekday> {
    let mut picked: Vec<Weekday> = Vec::new();
    for &day in &days[start..] {
        match picked.last() {
            Some(&last) if day.index() - last.index() < spacing => {}
            _ => picked.push(day),
        }
    }
    // the week wraps into the next one
    while picked.len() > 1 {
        let (Some(&first), Some(&last)) = (picked.first(), picked.last()) else {
            break;
        };
        if gap(last, first) >= spacing {
            break;
        }
        picked.pop();
    }
    picked
}

/// Picks training days from the available ones, Monday first, so that
/// consecutive sessions, including the wrap into the next week, are
/// separated by at least `min_rest_days` days off.
pub fn select_days(available: &[Weekday], min_rest_days: u8, cap: Option<u8>) -> Vec<Weekday> {
    let mut days = available.to_vec();
    days.sort();
    days.dedup();
    if days.is_empty() {
        return days;
    }

    let spacing = min_rest_days + 1;
    // starting later in the week can fit more sessions
    let mut best = Vec::new();
    for start in 0..days.len() {
        let candidate = greedy_from(&days, start, spacing);
        if candidate.len() > best.len() {
            best = candidate;
        }
    }

    if let Some(cap) = cap {
        best.truncate(usize::from(cap.max(1)));
    }
    best
}

fn default_layout(goal: Goal, sessions: usize) -> Vec<Vec<Focus>> {
    let cycle: Vec<Focus> = match (goal, sessions) {
        (Goal::Mobility, _) => vec![Focus::Mobility],
        (Goal::Cardio, _) => vec![Focus::Cardio, Focus::FullBody],
        (_, 0..=3) => vec![Focus::FullBody],
        (_, 4) => vec![Focus::UpperBody, Focus::LowerBody],
        (_, 5) => vec![
            Focus::UpperBody,
            Focus::LowerBody,
            Focus::FullBody,
            Focus::UpperBody,
            Focus::LowerBody,
        ],
        _ => vec![
            Focus::Chest,
            Focus::Back,
            Focus::Legs,
            Focus::Shoulders,
            Focus::Arms,
            Focus::Core,
        ],
    };
    cycle.iter().cycle().take(sessions).map(|f| vec![*f]).collect()
}

/// Focuses per session, in training-day order.
pub fn layout(input: &PlanInput, days: &[Weekday]) -> Vec<WeekSlot> {
    let goal = input.goal();
    let sessions = days.len();

    let assignments: Vec<(Vec<Focus>, Goal)> = match input.schedule.layout.as_deref() {
        Some(explicit) if !explicit.is_empty() => explicit
            .iter()
            .cycle()
            .take(sessions)
            .map(|slot| {
                let focuses = if slot.focuses.is_empty() {
                    vec![Focus::FullBody]
                } else {
                    slot.focuses.clone()
                };
                (focuses, slot.goal.unwrap_or(goal))
            })
            .collect(),
        _ if !input.intent.focuses.is_empty() => {
            let focuses = &input.intent.focuses;
            if sessions >= focuses.len() {
                focuses
                    .iter()
                    .cycle()
                    .take(sessions)
                    .map(|f| (vec![*f], goal))
                    .collect()
            } else {
                // fewer days than focuses: each day trains a group
                (0..sessions)
                    .map(|slot| {
                        let group = focuses
                            .iter()
                            .skip(slot)
                            .step_by(sessions)
                            .copied()
                            .collect();
                        (group, goal)
                    })
                    .collect()
            }
        }
        _ => default_layout(goal, sessions)
            .into_iter()
            .map(|focuses| (focuses, goal))
            .collect(),
    };

    days.iter()
        .zip(assignments)
        .map(|(&day, (focuses, goal))| WeekSlot { day, focuses, goal })
        .collect()
}

/// Per-session minutes, reduced to an even share of the weekly total when
/// one is given.
pub fn slot_minutes(input: &PlanInput, sessions: usize) -> u32 {
    let per_session = input.time.minutes_per_session;
    match (input.time.weekly_minutes, u32::try_from(sessions)) {
        (Some(weekly), Ok(count)) if count > 0 => {
            per_session.min((weekly / count).max(MIN_SLOT_MINUTES))
        }
        _ => per_session,
    }
}

/// Calendar date of a weekday in the week starting at `week_start`.
pub fn date_for(week_start: Date, day: Weekday) -> Result<Date> {
    let offset = gap(Weekday::from_jiff(week_start.weekday()), day);
    Ok(week_start.checked_add(i64::from(offset).days())?)
}

/// Builds the weekly plan. Each session sees the history of the sessions
/// scheduled before it.
pub fn build_week(
    env: &BuildEnv<'_>,
    input: &PlanInput,
    history: &SessionHistory,
    seed: u32,
) -> Result<GeneratedPlan> {
    let days = select_days(
        &input.schedule.days_available,
        input.schedule.min_rest_days,
        input.schedule.sessions_per_week,
    );
    let slots = layout(input, &days);
    let minutes = slot_minutes(input, slots.len());
    debug!(
        "Scheduling {} sessions of {minutes} min on {:?}",
        slots.len(),
        days
    );

    let mut rolling = history.clone();
    let mut sessions = Vec::with_capacity(slots.len());
    for (index, slot) in slots.iter().enumerate() {
        let spec = MergeSpec {
            focuses: &slot.focuses,
            goal: slot.goal,
            target_minutes: minutes,
            input,
            history: &rolling,
            seed: derive_seed(seed, &index.to_string()),
        };
        let session = merge::build_merged(env, &spec);
        rolling = rolling.prepend_session(&session);

        let date = input
            .schedule
            .week_start
            .map(|start| date_for(start, slot.day))
            .transpose()?;
        sessions.push(ScheduledSession {
            day: slot.day,
            date,
            session,
        });
    }

    let total_minutes = sessions.iter().map(|s| s.session.total_minutes).sum();
    let impact = impact::score(
        sessions.iter().flat_map(|s| s.session.exercises.iter()),
        total_minutes,
        env.workload,
    );
    let mut plan = GeneratedPlan {
        sessions,
        rationale: String::new(),
        impact,
    };
    plan.rationale = rationale::for_plan(&plan);
    info!(
        "Built weekly plan: {} sessions, {:.0} min",
        plan.sessions.len(),
        plan.total_minutes()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::SessionLayout;

    #[test]
    fn test_select_days_respects_rest() {
        use Weekday::*;
        let all = Weekday::ALL;
        assert_eq!(select_days(&all, 1, None), vec![Monday, Wednesday, Friday]);
        assert_eq!(select_days(&all, 0, None).len(), 7);
        assert_eq!(select_days(&all, 2, None), vec![Monday, Thursday]);
        assert_eq!(select_days(&all, 1, Some(2)), vec![Monday, Wednesday]);
    }

    #[test]
    fn test_select_days_checks_wrap_around() {
        use Weekday::*;
        // Sunday -> Monday leaves no rest day
        let days = select_days(&[Monday, Wednesday, Sunday], 1, None);
        assert_eq!(days.len(), 2);
        assert!(days.windows(2).all(|w| gap(w[0], w[1]) >= 2));
        assert!(gap(days[1], days[0]) >= 2);
    }

    #[test]
    fn test_default_layouts() {
        let mut input = PlanInput::default();
        let days = [Weekday::Monday, Weekday::Tuesday, Weekday::Thursday, Weekday::Friday];
        let slots = layout(&input, &days);
        let focuses: Vec<_> = slots.iter().map(|s| s.focuses[0]).collect();
        assert_eq!(
            focuses,
            vec![Focus::UpperBody, Focus::LowerBody, Focus::UpperBody, Focus::LowerBody]
        );

        input.intent.goal = Some(Goal::Mobility);
        assert!(layout(&input, &days)
            .iter()
            .all(|s| s.focuses == vec![Focus::Mobility]));
    }

    #[test]
    fn test_requested_focuses_are_grouped_when_days_are_short() {
        let mut input = PlanInput::default();
        input.intent.focuses = vec![Focus::Chest, Focus::Back, Focus::Legs];
        let slots = layout(&input, &[Weekday::Monday, Weekday::Thursday]);
        assert_eq!(slots[0].focuses, vec![Focus::Chest, Focus::Legs]);
        assert_eq!(slots[1].focuses, vec![Focus::Back]);
    }

    #[test]
    fn test_explicit_layout_cycles_and_overrides_goal() {
        let mut input = PlanInput::default();
        input.schedule.layout = Some(vec![SessionLayout {
            focuses: vec![Focus::Core],
            goal: Some(Goal::Endurance),
        }]);
        let slots = layout(&input, &[Weekday::Monday, Weekday::Friday]);
        assert_eq!(slots.len(), 2);
        assert!(slots
            .iter()
            .all(|s| s.focuses == vec![Focus::Core] && s.goal == Goal::Endurance));
    }

    #[test]
    fn test_slot_minutes_splits_weekly_total() {
        let mut input = PlanInput::default();
        assert_eq!(slot_minutes(&input, 3), 45);
        input.time.weekly_minutes = Some(90);
        assert_eq!(slot_minutes(&input, 3), 30);
        input.time.weekly_minutes = Some(30);
        assert_eq!(slot_minutes(&input, 3), 20);
    }

    #[test]
    fn test_date_for_weekday() {
        // 2024-01-01 is a Monday
        let start = date(2024, 1, 1);
        assert_eq!(date_for(start, Weekday::Wednesday).unwrap(), date(2024, 1, 3));
        // a Thursday start puts Monday in the following week
        let start = date(2024, 1, 4);
        assert_eq!(date_for(start, Weekday::Monday).unwrap(), date(2024, 1, 8));
    }
}
