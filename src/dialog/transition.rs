//! Pure dialog transition
//!
//! One call handles one turn: entry prompt, input consumption,
//! completion check, and advancement, exactly one of which produces
//! this turn's reply. Given the same cursor, remembered city, and
//! extraction, the result is always the same — no I/O here.

use super::state::{DialogCursor, Extraction, MemoryEffect, StepReply, COLLECT_CITY, REPORT_WEATHER};
use crate::config::RecallPolicy;
use crate::nlp::City;

/// Prompt shown when the dialog needs a city and none is remembered.
pub(crate) const COLLECT_PROMPT: &str =
    "I'll find out for you. What city are you in right now?";

fn confirm_prompt(city: &City) -> String {
    format!("Are you still in {}?", city.name)
}

/// Result of one dialog turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub reply: StepReply,
    pub effects: Vec<MemoryEffect>,
    pub next: DialogCursor,
}

/// True when this turn stops at the collect-city entry prompt, i.e.
/// the machine will not consume the message as input. A remembered
/// city under the `Overwrite` policy skips the stop and lets the turn
/// run straight through to the report.
pub(crate) fn awaits_entry(
    cursor: DialogCursor,
    has_remembered: bool,
    policy: RecallPolicy,
) -> bool {
    cursor.index == COLLECT_CITY
        && !cursor.entered
        && (!has_remembered || policy == RecallPolicy::Confirm)
}

/// True when the collect-city state will consume this turn's message,
/// which is the only time the driver needs to call the extractor.
pub(crate) fn needs_input(
    cursor: DialogCursor,
    has_remembered: bool,
    policy: RecallPolicy,
) -> bool {
    cursor.index == COLLECT_CITY && !awaits_entry(cursor, has_remembered, policy)
}

/// Advance the dialog by one turn.
pub fn step(
    cursor: DialogCursor,
    remembered: Option<City>,
    extraction: &Extraction,
    policy: RecallPolicy,
) -> Step {
    if cursor.index != COLLECT_CITY {
        // Terminal state (or a corrupt cursor read back from memory):
        // input is a no-op, completion is immediate, and advancing past
        // the end fires the reset.
        return Step {
            reply: StepReply::Silence,
            effects: vec![MemoryEffect::ClearCity],
            next: DialogCursor::default(),
        };
    }

    // Entry phase: prompt and wait for the next turn.
    if awaits_entry(cursor, remembered.is_some(), policy) {
        let prompt = match &remembered {
            Some(city) => confirm_prompt(city),
            None => COLLECT_PROMPT.to_string(),
        };
        return Step {
            reply: StepReply::Prompt(prompt),
            effects: vec![],
            next: DialogCursor::entered(COLLECT_CITY),
        };
    }

    // Input phase: a freshly extracted city is stored and replaces
    // whatever was remembered. "Not found" and hard failures leave
    // memory untouched.
    let mut effects = Vec::new();
    let resolved = match extraction {
        Extraction::City(city) => {
            effects.push(MemoryEffect::StoreCity(city.clone()));
            Some(city.clone())
        }
        Extraction::None | Extraction::Failed => remembered,
    };

    // Completion: done iff a city is now remembered. Incomplete turns
    // stay put and say nothing.
    let Some(city) = resolved else {
        return Step {
            reply: StepReply::Silence,
            effects,
            next: DialogCursor::entered(COLLECT_CITY),
        };
    };

    // Advance into report-weather; its entry is this turn's reply. The
    // cursor parks there so the following turn completes and resets.
    Step {
        reply: StepReply::Weather(city),
        effects,
        next: DialogCursor::entered(REPORT_WEATHER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicago() -> City {
        City::named("Chicago")
    }

    fn boston() -> City {
        City::named("Boston")
    }

    #[test]
    fn test_fresh_dialog_prompts_for_city() {
        let result = step(
            DialogCursor::default(),
            None,
            &Extraction::None,
            RecallPolicy::Confirm,
        );

        assert_eq!(result.reply, StepReply::Prompt(COLLECT_PROMPT.to_string()));
        assert!(result.effects.is_empty());
        assert_eq!(result.next, DialogCursor::entered(COLLECT_CITY));
    }

    #[test]
    fn test_remembered_city_confirm_policy_asks() {
        let result = step(
            DialogCursor::default(),
            Some(boston()),
            &Extraction::None,
            RecallPolicy::Confirm,
        );

        assert_eq!(
            result.reply,
            StepReply::Prompt("Are you still in Boston?".to_string())
        );
        assert_eq!(result.next, DialogCursor::entered(COLLECT_CITY));
    }

    #[test]
    fn test_remembered_city_overwrite_policy_reports_immediately() {
        let result = step(
            DialogCursor::default(),
            Some(boston()),
            &Extraction::None,
            RecallPolicy::Overwrite,
        );

        assert_eq!(result.reply, StepReply::Weather(boston()));
        assert_eq!(result.next, DialogCursor::entered(REPORT_WEATHER));
    }

    #[test]
    fn test_supplied_city_is_stored_and_reported() {
        let result = step(
            DialogCursor::entered(COLLECT_CITY),
            None,
            &Extraction::City(chicago()),
            RecallPolicy::Confirm,
        );

        assert_eq!(result.effects, vec![MemoryEffect::StoreCity(chicago())]);
        assert_eq!(result.reply, StepReply::Weather(chicago()));
        assert_eq!(result.next, DialogCursor::entered(REPORT_WEATHER));
    }

    #[test]
    fn test_fresh_city_replaces_remembered_one() {
        let result = step(
            DialogCursor::entered(COLLECT_CITY),
            Some(boston()),
            &Extraction::City(chicago()),
            RecallPolicy::Confirm,
        );

        // "actually, I'm in Chicago" wins over memory.
        assert_eq!(result.effects, vec![MemoryEffect::StoreCity(chicago())]);
        assert_eq!(result.reply, StepReply::Weather(chicago()));
    }

    #[test]
    fn test_confirmation_without_new_city_keeps_remembered() {
        let result = step(
            DialogCursor::entered(COLLECT_CITY),
            Some(boston()),
            &Extraction::None,
            RecallPolicy::Confirm,
        );

        assert!(result.effects.is_empty());
        assert_eq!(result.reply, StepReply::Weather(boston()));
    }

    #[test]
    fn test_no_city_supplied_waits_silently() {
        let result = step(
            DialogCursor::entered(COLLECT_CITY),
            None,
            &Extraction::None,
            RecallPolicy::Confirm,
        );

        assert_eq!(result.reply, StepReply::Silence);
        assert!(result.effects.is_empty());
        assert_eq!(result.next, DialogCursor::entered(COLLECT_CITY));
    }

    #[test]
    fn test_extraction_failure_is_swallowed_and_waits() {
        let result = step(
            DialogCursor::entered(COLLECT_CITY),
            None,
            &Extraction::Failed,
            RecallPolicy::Confirm,
        );

        assert_eq!(result.reply, StepReply::Silence);
        assert_eq!(result.next, DialogCursor::entered(COLLECT_CITY));
    }

    #[test]
    fn test_terminal_state_resets_and_clears_city() {
        let result = step(
            DialogCursor::entered(REPORT_WEATHER),
            Some(chicago()),
            &Extraction::None,
            RecallPolicy::Confirm,
        );

        assert_eq!(result.reply, StepReply::Silence);
        assert_eq!(result.effects, vec![MemoryEffect::ClearCity]);
        assert_eq!(result.next, DialogCursor::default());
    }

    #[test]
    fn test_corrupt_cursor_resets() {
        let result = step(
            DialogCursor {
                index: 7,
                entered: false,
            },
            None,
            &Extraction::None,
            RecallPolicy::Confirm,
        );

        assert_eq!(result.next, DialogCursor::default());
        assert_eq!(result.effects, vec![MemoryEffect::ClearCity]);
    }
}
