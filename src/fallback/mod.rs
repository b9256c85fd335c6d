//! Rule-based fallback derivers.
//!
//! One pure, synchronous function per capability, producing the same result
//! shapes as the AI path from lexical heuristics alone. These are the
//! terminal fallback: total over every string input (including the empty
//! string), deterministic, and never touching the network. Results carry
//! `AnalysisMethod::RuleBased` and the same cardinality caps as the AI path.

mod keywords;

pub use keywords::{match_categories, KeywordCategory, EMOTION_KEYWORDS, THEME_KEYWORDS};

use crate::config::AnalysisLimits;
use crate::engine::{
    ActionPlan, ActionStep, AnalysisMethod, Categorization, ChatReply, ConversationTurn,
    DistortionAnalysis, MessageMetadata, Reframe, ReminderSuggestion, SessionSummary, TurnRole,
};
use crate::taxonomy::Catalogs;

/// Default theme tag when no keyword matches.
pub const DEFAULT_THEME: &str = "general";
/// Default emotion tag for chat and summary when no keyword matches.
pub const DEFAULT_EMOTION: &str = "processing";
/// Default emotion tag for categorization when no keyword matches.
pub const NEUTRAL_EMOTION: &str = "neutral";

const FALLBACK_COMPASSION: &str = "It's understandable to have thoughts like this. Many people \
     experience similar thinking patterns. Remember, thoughts are not facts, and you have the \
     power to examine and reshape them.";

/// Keyword-based distortion analysis.
///
/// Walks the distortion catalog in order; the first keyword hit within a
/// record claims it. Reframes are built from the matched records' reframe
/// prompts, exercises from the exercise table's `helpful_for` joins.
pub fn derive_distortion_analysis(
    thought: &str,
    catalogs: &Catalogs,
    limits: &AnalysisLimits,
) -> DistortionAnalysis {
    let lowered = thought.to_lowercase();

    let mut identified = Vec::new();
    for record in catalogs.distortions() {
        let hit = record
            .keywords
            .iter()
            .find(|kw| lowered.contains(&kw.to_lowercase()));
        if let Some(keyword) = hit {
            identified.push(record.enriched(
                limits.fallback_confidence,
                format!(
                    "Your thought contains '{}', which may indicate {}.",
                    keyword,
                    record.name.to_lowercase()
                ),
            ));
        }
        if identified.len() == limits.max_distortions {
            break;
        }
    }

    let mut reframes: Vec<Reframe> = identified
        .iter()
        .take(limits.max_reframes)
        .map(|d| Reframe {
            perspective: d.reframe_prompt.clone(),
            explanation: format!("This helps counter {}.", d.name.to_lowercase()),
        })
        .collect();
    if reframes.is_empty() {
        reframes.push(Reframe {
            perspective: "Consider whether there might be another way to look at this situation."
                .to_string(),
            explanation: "Taking a step back can help us see things more clearly.".to_string(),
        });
    }

    let identified_ids: Vec<&str> = identified.iter().map(|d| d.id.as_str()).collect();
    let mut suggested_exercises = catalogs.exercises_for(&identified_ids);
    suggested_exercises.truncate(limits.max_exercises);

    DistortionAnalysis {
        success: true,
        original_thought: thought.to_string(),
        identified_distortions: identified,
        reframes,
        compassionate_response: FALLBACK_COMPASSION.to_string(),
        suggested_exercises,
        analysis_method: AnalysisMethod::RuleBased,
    }
}

/// Keyword-derived metadata for a chat message.
///
/// Used on both paths; the AI path produces only the reply text.
pub fn derive_metadata(message: &str, limits: &AnalysisLimits) -> MessageMetadata {
    MessageMetadata {
        detected_emotions: match_categories(
            message,
            EMOTION_KEYWORDS,
            limits.max_emotions,
            DEFAULT_EMOTION,
        ),
        themes: match_categories(message, THEME_KEYWORDS, limits.max_themes, DEFAULT_THEME),
        is_complete: false,
    }
}

/// Canned coaching reply keyed on history length and message keywords.
pub fn derive_chat_reply(
    message: &str,
    history: &[ConversationTurn],
    limits: &AnalysisLimits,
) -> ChatReply {
    let lowered = message.to_lowercase();

    let contains_any = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

    let response = if history.is_empty() {
        "I hear you. That sounds like a lot to deal with. What feels like the most pressing \
         concern right now?"
    } else if contains_any(&["don't know", "not sure", "confused"]) {
        "That's okay - sometimes things feel unclear. Can you describe what you're feeling in \
         your body right now? Sometimes that helps us understand what's really going on."
    } else if contains_any(&["stressed", "overwhelmed", "too much"]) {
        "It makes sense you're feeling that way. Let's try to break this down. If you could \
         only focus on one thing today, what would have the biggest impact?"
    } else if contains_any(&["can't", "impossible", "stuck"]) {
        "I understand it feels that way right now. What's one small step - even tiny - that \
         might move things forward?"
    } else {
        "Thanks for sharing that. What do you think is the core issue here? Sometimes naming \
         it specifically helps."
    };

    ChatReply {
        success: true,
        response: response.to_string(),
        metadata: derive_metadata(message, limits),
        analysis_method: AnalysisMethod::RuleBased,
    }
}

/// Keyword-derived session summary over the user's side of the history.
pub fn derive_summary(history: &[ConversationTurn], limits: &AnalysisLimits) -> SessionSummary {
    let user_text = history
        .iter()
        .filter(|turn| turn.role == TurnRole::User)
        .map(|turn| turn.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    SessionSummary {
        success: true,
        summary: "You took time to process your thoughts and work through what's on your mind."
            .to_string(),
        themes: match_categories(&user_text, THEME_KEYWORDS, limits.max_themes, DEFAULT_THEME),
        emotions: match_categories(
            &user_text,
            EMOTION_KEYWORDS,
            limits.max_emotions,
            DEFAULT_EMOTION,
        ),
        action_items: vec![
            "Take a few deep breaths when feeling overwhelmed".to_string(),
            "Write down one small step you can take tomorrow".to_string(),
        ],
        analysis_method: AnalysisMethod::RuleBased,
    }
}

/// Keyword-based thought categorization.
pub fn derive_categorization(thought: &str, limits: &AnalysisLimits) -> Categorization {
    Categorization {
        success: true,
        themes: match_categories(thought, THEME_KEYWORDS, limits.max_themes, DEFAULT_THEME),
        emotions: match_categories(
            thought,
            EMOTION_KEYWORDS,
            limits.max_emotions,
            NEUTRAL_EMOTION,
        ),
        key_phrase: key_phrase_of(thought),
        analysis_method: AnalysisMethod::RuleBased,
    }
}

/// Fixed generic action plan.
pub fn derive_action_plan(_thought: &str, limits: &AnalysisLimits) -> ActionPlan {
    let step = |action: &str, timeframe: &str, difficulty: &str| ActionStep {
        action: action.to_string(),
        timeframe: timeframe.to_string(),
        difficulty: difficulty.to_string(),
    };

    let mut steps = vec![
        step("Write down the specific concern clearly", "today", "easy"),
        step(
            "Identify what's in your control vs. what isn't",
            "today",
            "easy",
        ),
        step("Choose one small action you can take", "this week", "medium"),
        step("Set a reminder to check progress", "next week", "easy"),
    ];
    steps.truncate(limits.max_plan_steps);

    ActionPlan {
        success: true,
        goal: "Work through this concern step by step".to_string(),
        steps,
        first_step: "Take 2 minutes to write down exactly what's bothering you".to_string(),
        analysis_method: AnalysisMethod::RuleBased,
    }
}

/// Fixed reminder suggestion; the caller's note takes precedence over the
/// generic text.
pub fn derive_reminder(_thought: &str, note: &str) -> ReminderSuggestion {
    let reminder_text = if note.is_empty() {
        "Check in on this thought".to_string()
    } else {
        note.to_string()
    };

    ReminderSuggestion {
        success: true,
        reminder_text,
        suggested_time: "tomorrow morning".to_string(),
        category: "reflection".to_string(),
        analysis_method: AnalysisMethod::RuleBased,
    }
}

/// First 50 characters of the thought, on a char boundary, with an ellipsis
/// when truncated.
pub fn key_phrase_of(thought: &str) -> String {
    const MAX_CHARS: usize = 50;
    let mut phrase: String = thought.chars().take(MAX_CHARS).collect();
    if thought.chars().count() > MAX_CHARS {
        phrase.push_str("...");
    }
    phrase
}
