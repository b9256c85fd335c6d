//! Property-style tests for the rule-based fallback derivers
//!
//! The fallback path must be total over all string inputs, deterministic,
//! and indistinguishable from the AI path by result cardinality alone.

use pretty_assertions::assert_eq;

use clearmind_engine::config::AnalysisLimits;
use clearmind_engine::engine::{AnalysisMethod, ConversationTurn};
use clearmind_engine::fallback::{
    derive_action_plan, derive_categorization, derive_chat_reply, derive_distortion_analysis,
    derive_reminder, derive_summary,
};
use clearmind_engine::taxonomy::Catalogs;

fn limits() -> AnalysisLimits {
    AnalysisLimits::default()
}

const AWKWARD_INPUTS: &[&str] = &[
    "",
    " ",
    "a",
    "no keyword overlap here at all, purely descriptive text",
    "ALWAYS NEVER EVERYTHING NOTHING",
    "unicode: café déjà-vu naïveté 思考 🤯",
    "\n\t\r",
];

#[test]
fn fallback_is_total_over_awkward_inputs() {
    let catalogs = Catalogs::builtin();
    let l = limits();

    for input in AWKWARD_INPUTS {
        let analysis = derive_distortion_analysis(input, &catalogs, &l);
        assert!(analysis.success, "input {input:?}");
        assert_eq!(analysis.analysis_method, AnalysisMethod::RuleBased);
        assert_eq!(analysis.original_thought, *input);
        assert!(analysis.identified_distortions.len() <= l.max_distortions);
        assert!(!analysis.reframes.is_empty());
        assert!(analysis.reframes.len() <= l.max_reframes);
        assert!(!analysis.compassionate_response.is_empty());
        assert!(analysis.suggested_exercises.len() <= l.max_exercises);

        let categorization = derive_categorization(input, &l);
        assert!(!categorization.themes.is_empty());
        assert!(categorization.themes.len() <= l.max_themes);
        assert!(!categorization.emotions.is_empty());
        assert!(categorization.emotions.len() <= l.max_emotions);

        let chat = derive_chat_reply(input, &[], &l);
        assert!(!chat.response.is_empty());
        assert!(!chat.metadata.detected_emotions.is_empty());
        assert!(!chat.metadata.themes.is_empty());

        let plan = derive_action_plan(input, &l);
        assert!(!plan.steps.is_empty());
        assert!(plan.steps.len() <= l.max_plan_steps);

        let reminder = derive_reminder(input, "");
        assert!(!reminder.reminder_text.is_empty());
    }
}

#[test]
fn fallback_is_deterministic() {
    let catalogs = Catalogs::builtin();
    let l = limits();

    for input in AWKWARD_INPUTS {
        let first =
            serde_json::to_string(&derive_distortion_analysis(input, &catalogs, &l)).unwrap();
        let second =
            serde_json::to_string(&derive_distortion_analysis(input, &catalogs, &l)).unwrap();
        assert_eq!(first, second, "input {input:?}");

        let first = serde_json::to_string(&derive_categorization(input, &l)).unwrap();
        let second = serde_json::to_string(&derive_categorization(input, &l)).unwrap();
        assert_eq!(first, second, "input {input:?}");
    }
}

#[test]
fn confidence_is_always_bounded() {
    let catalogs = Catalogs::builtin();
    let l = limits();

    for input in AWKWARD_INPUTS {
        for d in derive_distortion_analysis(input, &catalogs, &l).identified_distortions {
            assert!((0.0..=1.0).contains(&d.confidence), "input {input:?}");
        }
    }
}

#[test]
fn scenario_absolutes_match_all_or_nothing_at_fixed_confidence() {
    let catalogs = Catalogs::builtin();
    let result = derive_distortion_analysis("I always fail at everything", &catalogs, &limits());

    assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
    let hit = result
        .identified_distortions
        .iter()
        .find(|d| d.id == "all_or_nothing")
        .expect("all_or_nothing identified");
    assert_eq!(hit.confidence, 0.6);
    assert!(hit.specific_explanation.contains("'always'"));
}

#[test]
fn scenario_short_categorization_uses_documented_defaults() {
    let result = derive_categorization("abc", &limits());
    assert_eq!(result.themes, vec!["general"]);
    assert_eq!(result.emotions, vec!["neutral"]);
    assert_eq!(result.key_phrase, "abc");
    assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
}

#[test]
fn scenario_chat_with_empty_history_uses_fixed_opener() {
    let result = derive_chat_reply("so much is happening at once", &[], &limits());
    assert_eq!(
        result.response,
        "I hear you. That sounds like a lot to deal with. What feels like the most pressing \
         concern right now?"
    );
    assert!(!result.metadata.is_complete);
}

#[test]
fn summary_derives_from_user_turns_with_caps() {
    let history = vec![
        ConversationTurn::user("work deadline stress, money worries, family obligations"),
        ConversationTurn::assistant("That is a lot at once."),
        ConversationTurn::user("mostly I feel overwhelmed and anxious about my job"),
    ];
    let result = derive_summary(&history, &limits());

    assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
    assert_eq!(result.themes.len(), 2);
    assert_eq!(result.themes[0], "work");
    assert_eq!(result.emotions, vec!["anxious", "overwhelmed"]);
    assert!(!result.action_items.is_empty());
}

#[test]
fn custom_fallback_confidence_is_respected() {
    let catalogs = Catalogs::builtin();
    let custom = AnalysisLimits {
        fallback_confidence: 0.4,
        ..AnalysisLimits::default()
    };
    let result = derive_distortion_analysis("I never do anything right", &catalogs, &custom);
    assert!(!result.identified_distortions.is_empty());
    for d in result.identified_distortions {
        assert_eq!(d.confidence, 0.4);
    }
}
