//! Centralized prompt definitions and builders for the analysis capabilities
//!
//! Every builder is a pure function: no I/O, no clock, no randomness, and
//! byte-identical output for identical input. The embedded JSON examples are
//! the schema contract the response normalizer enforces.

use crate::engine::{ConversationTurn, TurnRole};
use crate::taxonomy::Catalogs;

/// System prompt for the coaching chat capability.
pub const COACH_SYSTEM_PROMPT: &str = r#"You are a practical life coach helping someone process racing thoughts. Your style:
- Acknowledge their feelings briefly, then focus on understanding the core issue
- Ask clarifying questions to break down vague worries into specific concerns
- Help identify what's in their control vs. what isn't
- Suggest small, actionable next steps when appropriate
- Keep responses concise (2-3 sentences typical, max 4)
- End with a question to keep the conversation going, unless they seem ready to wrap up

Important: Be warm but practical. Don't be overly therapeutic or use clinical language. Talk like a supportive friend who's good at problem-solving."#;

/// System prompt for the session summary capability.
pub const SUMMARY_SYSTEM_PROMPT: &str = r#"You are analyzing a conversation between a user and a life coach. The user was processing racing thoughts or worries.

Analyze the conversation and provide a structured summary in JSON format:
{
    "summary": "A 1-2 sentence summary of what the user was working through",
    "themes": ["theme1", "theme2"],
    "emotions": ["emotion1", "emotion2"],
    "action_items": ["action1", "action2"]
}

Theme categories to use: work, relationships, health, finance, self, family, social, future, past, other
Emotion categories to use: anxious, overwhelmed, sad, angry, frustrated, confused, hopeful, relieved, other

Action items should be specific, actionable steps discussed or implied in the conversation.
If no clear action items emerged, provide 1-2 gentle suggestions based on what was discussed.

Respond ONLY with valid JSON."#;

/// Build the distortion-analysis prompt.
///
/// The full distortion catalog is serialized inline so the model can only
/// reference valid identifiers; anything else is dropped at enrichment.
pub fn build_distortion_prompt(thought: &str, catalogs: &Catalogs) -> String {
    let distortions_list = catalogs
        .distortions()
        .iter()
        .map(|d| format!("- {}: {} - {}", d.id, d.name, d.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a compassionate cognitive behavioral therapy (CBT) assistant. Analyze the following thought and identify any cognitive distortions present.

THOUGHT TO ANALYZE:
"{thought}"

COGNITIVE DISTORTIONS TO CHECK FOR:
{distortions_list}

Please respond in the following JSON format:
{{
    "identified_distortions": [
        {{
            "distortion_id": "the_distortion_id",
            "confidence": 0.0 to 1.0,
            "explanation": "Brief explanation of why this distortion applies to this thought"
        }}
    ],
    "reframes": [
        {{
            "perspective": "A healthier way to view this situation",
            "explanation": "Why this perspective is more balanced"
        }}
    ],
    "compassionate_response": "A warm, supportive message acknowledging the person's feelings while gently encouraging a different perspective",
    "suggested_exercises": ["exercise_id_1", "exercise_id_2"]
}}

Guidelines:
- Only identify distortions that are clearly present (confidence > 0.6)
- Provide 2-3 reframes that are realistic and achievable
- Be warm and non-judgmental in your compassionate response
- Suggest 1-3 exercises that would be most helpful
- Focus on validation first, then gentle reframing

Respond ONLY with valid JSON, no additional text."#
    )
}

/// Format a conversation history into the summary capability's user message.
pub fn build_summary_user_message(history: &[ConversationTurn]) -> String {
    let transcript = history
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                TurnRole::User => "User",
                TurnRole::Assistant => "Coach",
            };
            format!("{}: {}", speaker, turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Please analyze this conversation:\n\n{transcript}")
}

/// Build the thought-categorization prompt.
pub fn build_categorize_prompt(thought: &str) -> String {
    format!(
        r#"Categorize this thought snippet. Respond in JSON only:
{{
    "themes": ["theme1"],
    "emotions": ["emotion1"],
    "key_phrase": "short summary phrase"
}}

Themes: work, relationships, family, health, finance, social, future, self, past, other
Emotions: anxious, overwhelmed, sad, angry, frustrated, confused, hopeful, relieved, neutral

Thought: "{thought}"

JSON:"#
    )
}

/// Build the action-plan prompt.
pub fn build_action_plan_prompt(thought: &str, context: &str) -> String {
    let context_line = if context.is_empty() {
        String::new()
    } else {
        format!("\nAdditional context: {context}")
    };

    format!(
        r#"Create an action plan for this concern. Respond in JSON only:
{{
    "goal": "the main goal or outcome",
    "steps": [
        {{
            "action": "specific action to take",
            "timeframe": "when to do it (today, this week, etc.)",
            "difficulty": "easy/medium/hard"
        }}
    ],
    "first_step": "the very first small action to take right now"
}}

Keep steps practical, specific, and achievable. Maximum 5 steps.

Concern: "{thought}"{context_line}

JSON:"#
    )
}

/// Build the reminder-generation prompt.
pub fn build_reminder_prompt(thought: &str, note: &str) -> String {
    let note_line = if note.is_empty() {
        String::new()
    } else {
        format!("\nUser note: {note}")
    };

    format!(
        r#"Create a gentle reminder for someone who had this thought. Respond in JSON:
{{
    "reminder_text": "encouraging reminder message",
    "suggested_time": "when to remind (e.g., tomorrow morning, in 3 days)",
    "category": "reflection/action/check-in"
}}

Thought: "{thought}"{note_line}

JSON:"#
    )
}
