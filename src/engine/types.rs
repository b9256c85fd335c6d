use serde::{Deserialize, Serialize};

use crate::taxonomy::EnrichedDistortion;

/// Which path produced a result.
///
/// This tag is the only observable signal of which path executed; result
/// cardinalities are capped identically on both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    Ai,
    RuleBased,
}

/// One turn of a coaching conversation, owned by the caller.
///
/// The engine is stateless across calls; history is passed in on every chat
/// or summary invocation and never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

/// Speaker role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl ConversationTurn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-message metadata derived for the chat capability; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// At most two emotion tags
    pub detected_emotions: Vec<String>,
    /// At most two theme tags
    pub themes: Vec<String>,
    pub is_complete: bool,
}

/// A healthier perspective on the analyzed thought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reframe {
    pub perspective: String,
    pub explanation: String,
}

/// Result of the distortion-analysis capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistortionAnalysis {
    pub success: bool,
    pub original_thought: String,
    pub identified_distortions: Vec<EnrichedDistortion>,
    pub reframes: Vec<Reframe>,
    pub compassionate_response: String,
    pub suggested_exercises: Vec<String>,
    pub analysis_method: AnalysisMethod,
}

/// Result of the coaching-chat capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
    pub metadata: MessageMetadata,
    pub analysis_method: AnalysisMethod,
}

/// Result of the session-summary capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub success: bool,
    pub summary: String,
    pub themes: Vec<String>,
    pub emotions: Vec<String>,
    pub action_items: Vec<String>,
    pub analysis_method: AnalysisMethod,
}

/// Result of the thought-categorization capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Categorization {
    pub success: bool,
    pub themes: Vec<String>,
    pub emotions: Vec<String>,
    pub key_phrase: String,
    pub analysis_method: AnalysisMethod,
}

/// One step of an action plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionStep {
    pub action: String,
    pub timeframe: String,
    pub difficulty: String,
}

/// Result of the action-plan capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub success: bool,
    pub goal: String,
    pub steps: Vec<ActionStep>,
    pub first_step: String,
    pub analysis_method: AnalysisMethod,
}

/// Result of the reminder capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderSuggestion {
    pub success: bool,
    pub reminder_text: String,
    pub suggested_time: String,
    pub category: String,
    pub analysis_method: AnalysisMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_method_wire_format() {
        assert_eq!(
            serde_json::to_value(AnalysisMethod::Ai).unwrap(),
            serde_json::json!("ai")
        );
        assert_eq!(
            serde_json::to_value(AnalysisMethod::RuleBased).unwrap(),
            serde_json::json!("rule_based")
        );
    }

    #[test]
    fn test_turn_role_wire_format() {
        let turn = ConversationTurn::assistant("hello");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
