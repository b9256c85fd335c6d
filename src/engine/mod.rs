//! Capability orchestrators.
//!
//! Each public method runs the same state machine: build the prompt, call
//! the backend gateway, normalize and enrich the response, and tag the
//! result `ai` - or, on any failure at any stage, derive the same result
//! shape from the rule-based path and tag it `rule_based`. Failures never
//! propagate to the caller; a capability call always returns a complete
//! result. No state is retained between calls.

mod types;

pub use types::{
    ActionPlan, ActionStep, AnalysisMethod, Categorization, ChatReply, ConversationTurn,
    DistortionAnalysis, MessageMetadata, Reframe, ReminderSuggestion, SessionSummary, TurnRole,
};

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::backend::{AnthropicClient, ChatMessage, TextBackend};
use crate::config::{AnalysisLimits, Config};
use crate::error::{BackendError, EngineResult, NormalizeError};
use crate::fallback;
use crate::prompts;
use crate::schema::{self, ResponseSchema};
use crate::taxonomy::{Catalogs, RawDistortion};

/// Token budgets per capability (the reply sizes each one needs).
const ANALYSIS_MAX_TOKENS: u32 = 1024;
const CHAT_MAX_TOKENS: u32 = 300;
const SUMMARY_MAX_TOKENS: u32 = 500;
const CATEGORIZE_MAX_TOKENS: u32 = 200;
const ACTION_PLAN_MAX_TOKENS: u32 = 400;
const REMINDER_MAX_TOKENS: u32 = 150;

/// Confidence assumed when the model omits it on an identified distortion.
const DEFAULT_AI_CONFIDENCE: f64 = 0.7;

/// Outcome of one AI-path attempt.
///
/// The degrade path is a visible branch rather than a caught exception:
/// every non-`Ok` variant sends the orchestrator to the fallback deriver.
enum AiAttempt<T> {
    Ok(T),
    Unavailable,
    Failed(BackendError),
    Malformed(NormalizeError),
}

impl<T> AiAttempt<T> {
    /// Log why the rule-based path is taking over. `Unavailable` is an
    /// expected deployment mode and stays at debug level.
    fn log_fallback(&self, capability: &str) {
        match self {
            AiAttempt::Ok(_) => {}
            AiAttempt::Unavailable => {
                debug!(capability, "Backend unavailable, using rule-based analysis");
            }
            AiAttempt::Failed(e) => {
                warn!(capability, error = %e, "Backend call failed, using rule-based analysis");
            }
            AiAttempt::Malformed(e) => {
                warn!(capability, error = %e, "Malformed backend response, using rule-based analysis");
            }
        }
    }
}

/// The dual-path analysis engine.
///
/// Stateless across calls; safe to share behind an `Arc` and invoke
/// concurrently. The only shared data are the read-only catalogs.
pub struct AnalysisEngine {
    backend: Arc<dyn TextBackend>,
    catalogs: Arc<Catalogs>,
    limits: AnalysisLimits,
}

impl AnalysisEngine {
    /// Create an engine over an explicit backend and catalogs.
    pub fn new(backend: Arc<dyn TextBackend>, catalogs: Arc<Catalogs>, limits: AnalysisLimits) -> Self {
        Self {
            backend,
            catalogs,
            limits,
        }
    }

    /// Create an engine from configuration, with the built-in catalogs and
    /// the production HTTP backend.
    pub fn from_config(config: &Config) -> EngineResult<Self> {
        let backend = AnthropicClient::new(&config.backend, config.request.clone())?;
        Ok(Self::new(
            Arc::new(backend),
            Arc::new(Catalogs::builtin()),
            config.limits.clone(),
        ))
    }

    /// Analyze a thought for cognitive distortions and reframes.
    pub async fn analyze_distortions(&self, thought: &str) -> DistortionAnalysis {
        if self.too_short(thought) {
            return fallback::derive_distortion_analysis(thought, &self.catalogs, &self.limits);
        }

        let attempt = self.ai_distortion_analysis(thought).await;
        match attempt {
            AiAttempt::Ok(result) => result,
            _ => {
                attempt.log_fallback("distortion_analysis");
                fallback::derive_distortion_analysis(thought, &self.catalogs, &self.limits)
            }
        }
    }

    /// Produce one coaching reply for a message and its conversation history.
    pub async fn chat(&self, message: &str, history: &[ConversationTurn]) -> ChatReply {
        let mut messages: Vec<ChatMessage> = history
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => ChatMessage::user(&turn.content),
                TurnRole::Assistant => ChatMessage::assistant(&turn.content),
            })
            .collect();
        messages.push(ChatMessage::user(message));

        // Chat is the one capability whose AI reply is free text, so there
        // is no normalization stage. Metadata is keyword-derived on both
        // paths.
        match self
            .backend
            .complete(Some(prompts::COACH_SYSTEM_PROMPT), messages, CHAT_MAX_TOKENS)
            .await
        {
            Ok(response) => ChatReply {
                success: true,
                response,
                metadata: fallback::derive_metadata(message, &self.limits),
                analysis_method: AnalysisMethod::Ai,
            },
            Err(e) => {
                let attempt: AiAttempt<()> = match e {
                    BackendError::Unavailable => AiAttempt::Unavailable,
                    other => AiAttempt::Failed(other),
                };
                attempt.log_fallback("chat");
                fallback::derive_chat_reply(message, history, &self.limits)
            }
        }
    }

    /// Summarize a conversation session: themes, emotions, action items.
    pub async fn summarize(&self, history: &[ConversationTurn]) -> SessionSummary {
        let attempt = self.ai_summary(history).await;
        match attempt {
            AiAttempt::Ok(result) => result,
            _ => {
                attempt.log_fallback("session_summary");
                fallback::derive_summary(history, &self.limits)
            }
        }
    }

    /// Categorize a thought snippet into themes and emotions.
    pub async fn categorize(&self, thought: &str) -> Categorization {
        if self.too_short(thought) {
            return fallback::derive_categorization(thought, &self.limits);
        }

        let attempt = self.ai_categorization(thought).await;
        match attempt {
            AiAttempt::Ok(result) => result,
            _ => {
                attempt.log_fallback("categorization");
                fallback::derive_categorization(thought, &self.limits)
            }
        }
    }

    /// Break a concern down into an actionable plan.
    pub async fn action_plan(&self, thought: &str, context: &str) -> ActionPlan {
        if self.too_short(thought) {
            return fallback::derive_action_plan(thought, &self.limits);
        }

        let attempt = self.ai_action_plan(thought, context).await;
        match attempt {
            AiAttempt::Ok(result) => result,
            _ => {
                attempt.log_fallback("action_plan");
                fallback::derive_action_plan(thought, &self.limits)
            }
        }
    }

    /// Generate a reminder suggestion for a thought.
    pub async fn reminder(&self, thought: &str, note: &str) -> ReminderSuggestion {
        let attempt = self.ai_reminder(thought, note).await;
        match attempt {
            AiAttempt::Ok(result) => result,
            _ => {
                attempt.log_fallback("reminder");
                fallback::derive_reminder(thought, note)
            }
        }
    }

    fn too_short(&self, thought: &str) -> bool {
        thought.trim().chars().count() < self.limits.min_analysis_chars
    }

    /// Run one prompt through the gateway and the normalizer.
    async fn attempt_json(
        &self,
        system: Option<&str>,
        prompt: String,
        max_tokens: u32,
        response_schema: &ResponseSchema,
    ) -> AiAttempt<Value> {
        let completion = match self
            .backend
            .complete(system, vec![ChatMessage::user(prompt)], max_tokens)
            .await
        {
            Ok(text) => text,
            Err(BackendError::Unavailable) => return AiAttempt::Unavailable,
            Err(e) => return AiAttempt::Failed(e),
        };

        match schema::normalize(&completion, response_schema) {
            Ok(value) => AiAttempt::Ok(value),
            Err(e) => AiAttempt::Malformed(e),
        }
    }

    async fn ai_distortion_analysis(&self, thought: &str) -> AiAttempt<DistortionAnalysis> {
        let prompt = prompts::build_distortion_prompt(thought, &self.catalogs);
        let value = match self
            .attempt_json(None, prompt, ANALYSIS_MAX_TOKENS, &schema::DISTORTION_ANALYSIS_SCHEMA)
            .await
        {
            AiAttempt::Ok(value) => value,
            AiAttempt::Unavailable => return AiAttempt::Unavailable,
            AiAttempt::Failed(e) => return AiAttempt::Failed(e),
            AiAttempt::Malformed(e) => return AiAttempt::Malformed(e),
        };

        let payload: RawDistortionPayload = match extract(value) {
            Ok(p) => p,
            Err(e) => return AiAttempt::Malformed(e),
        };

        let raw: Vec<RawDistortion> = payload
            .identified_distortions
            .into_iter()
            .map(|d| RawDistortion {
                distortion_id: d.distortion_id,
                confidence: d.confidence,
                explanation: d.explanation,
            })
            .collect();

        let mut identified = self.catalogs.enrich(&raw);
        identified.truncate(self.limits.max_distortions);

        let mut reframes: Vec<Reframe> = payload
            .reframes
            .into_iter()
            .map(|r| Reframe {
                perspective: r.perspective,
                explanation: r.explanation,
            })
            .collect();
        reframes.truncate(self.limits.max_reframes);

        let mut suggested_exercises = payload.suggested_exercises;
        suggested_exercises.truncate(self.limits.max_exercises);

        AiAttempt::Ok(DistortionAnalysis {
            success: true,
            original_thought: thought.to_string(),
            identified_distortions: identified,
            reframes,
            compassionate_response: payload.compassionate_response,
            suggested_exercises,
            analysis_method: AnalysisMethod::Ai,
        })
    }

    async fn ai_summary(&self, history: &[ConversationTurn]) -> AiAttempt<SessionSummary> {
        let user_message = prompts::build_summary_user_message(history);
        let value = match self
            .attempt_json(
                Some(prompts::SUMMARY_SYSTEM_PROMPT),
                user_message,
                SUMMARY_MAX_TOKENS,
                &schema::SESSION_SUMMARY_SCHEMA,
            )
            .await
        {
            AiAttempt::Ok(value) => value,
            AiAttempt::Unavailable => return AiAttempt::Unavailable,
            AiAttempt::Failed(e) => return AiAttempt::Failed(e),
            AiAttempt::Malformed(e) => return AiAttempt::Malformed(e),
        };

        let payload: RawSummaryPayload = match extract(value) {
            Ok(p) => p,
            Err(e) => return AiAttempt::Malformed(e),
        };

        let mut themes = default_if_empty(payload.themes, fallback::DEFAULT_THEME);
        themes.truncate(self.limits.max_themes);
        let mut emotions = default_if_empty(payload.emotions, fallback::DEFAULT_EMOTION);
        emotions.truncate(self.limits.max_emotions);

        AiAttempt::Ok(SessionSummary {
            success: true,
            summary: payload.summary,
            themes,
            emotions,
            action_items: payload.action_items,
            analysis_method: AnalysisMethod::Ai,
        })
    }

    async fn ai_categorization(&self, thought: &str) -> AiAttempt<Categorization> {
        let prompt = prompts::build_categorize_prompt(thought);
        let value = match self
            .attempt_json(None, prompt, CATEGORIZE_MAX_TOKENS, &schema::CATEGORIZATION_SCHEMA)
            .await
        {
            AiAttempt::Ok(value) => value,
            AiAttempt::Unavailable => return AiAttempt::Unavailable,
            AiAttempt::Failed(e) => return AiAttempt::Failed(e),
            AiAttempt::Malformed(e) => return AiAttempt::Malformed(e),
        };

        let payload: RawCategorizationPayload = match extract(value) {
            Ok(p) => p,
            Err(e) => return AiAttempt::Malformed(e),
        };

        let mut themes = default_if_empty(payload.themes, fallback::DEFAULT_THEME);
        themes.truncate(self.limits.max_themes);
        let mut emotions = default_if_empty(payload.emotions, fallback::NEUTRAL_EMOTION);
        emotions.truncate(self.limits.max_emotions);

        let key_phrase = if payload.key_phrase.is_empty() {
            fallback::key_phrase_of(thought)
        } else {
            payload.key_phrase
        };

        AiAttempt::Ok(Categorization {
            success: true,
            themes,
            emotions,
            key_phrase,
            analysis_method: AnalysisMethod::Ai,
        })
    }

    async fn ai_action_plan(&self, thought: &str, context: &str) -> AiAttempt<ActionPlan> {
        let prompt = prompts::build_action_plan_prompt(thought, context);
        let value = match self
            .attempt_json(None, prompt, ACTION_PLAN_MAX_TOKENS, &schema::ACTION_PLAN_SCHEMA)
            .await
        {
            AiAttempt::Ok(value) => value,
            AiAttempt::Unavailable => return AiAttempt::Unavailable,
            AiAttempt::Failed(e) => return AiAttempt::Failed(e),
            AiAttempt::Malformed(e) => return AiAttempt::Malformed(e),
        };

        let payload: RawActionPlanPayload = match extract(value) {
            Ok(p) => p,
            Err(e) => return AiAttempt::Malformed(e),
        };

        let mut steps: Vec<ActionStep> = payload
            .steps
            .into_iter()
            .map(|s| ActionStep {
                action: s.action,
                timeframe: s.timeframe,
                difficulty: s.difficulty,
            })
            .collect();
        steps.truncate(self.limits.max_plan_steps);

        let first_step = if payload.first_step.is_empty() {
            "Take a moment to reflect on what you can control".to_string()
        } else {
            payload.first_step
        };

        AiAttempt::Ok(ActionPlan {
            success: true,
            goal: payload.goal,
            steps,
            first_step,
            analysis_method: AnalysisMethod::Ai,
        })
    }

    async fn ai_reminder(&self, thought: &str, note: &str) -> AiAttempt<ReminderSuggestion> {
        let prompt = prompts::build_reminder_prompt(thought, note);
        let value = match self
            .attempt_json(None, prompt, REMINDER_MAX_TOKENS, &schema::REMINDER_SCHEMA)
            .await
        {
            AiAttempt::Ok(value) => value,
            AiAttempt::Unavailable => return AiAttempt::Unavailable,
            AiAttempt::Failed(e) => return AiAttempt::Failed(e),
            AiAttempt::Malformed(e) => return AiAttempt::Malformed(e),
        };

        let payload: RawReminderPayload = match extract(value) {
            Ok(p) => p,
            Err(e) => return AiAttempt::Malformed(e),
        };

        let suggested_time = if payload.suggested_time.is_empty() {
            "tomorrow".to_string()
        } else {
            payload.suggested_time
        };
        let category = if payload.category.is_empty() {
            "reflection".to_string()
        } else {
            payload.category
        };

        AiAttempt::Ok(ReminderSuggestion {
            success: true,
            reminder_text: payload.reminder_text,
            suggested_time,
            category,
            analysis_method: AnalysisMethod::Ai,
        })
    }
}

/// Typed extraction of a schema-validated value; optional fields default
/// here, not in the normalizer.
fn extract<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, NormalizeError> {
    serde_json::from_value(value).map_err(|e| NormalizeError::Parse {
        message: e.to_string(),
    })
}

fn default_if_empty(tags: Vec<String>, default: &str) -> Vec<String> {
    if tags.is_empty() {
        vec![default.to_string()]
    } else {
        tags
    }
}

fn default_ai_confidence() -> f64 {
    DEFAULT_AI_CONFIDENCE
}

#[derive(Debug, Deserialize)]
struct RawDistortionPayload {
    identified_distortions: Vec<RawIdentifiedDistortion>,
    reframes: Vec<RawReframe>,
    #[serde(default)]
    compassionate_response: String,
    #[serde(default)]
    suggested_exercises: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawIdentifiedDistortion {
    distortion_id: String,
    #[serde(default = "default_ai_confidence")]
    confidence: f64,
    #[serde(default)]
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct RawReframe {
    perspective: String,
    #[serde(default)]
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct RawSummaryPayload {
    summary: String,
    #[serde(default)]
    themes: Vec<String>,
    #[serde(default)]
    emotions: Vec<String>,
    #[serde(default)]
    action_items: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategorizationPayload {
    themes: Vec<String>,
    emotions: Vec<String>,
    #[serde(default)]
    key_phrase: String,
}

#[derive(Debug, Deserialize)]
struct RawActionPlanPayload {
    goal: String,
    steps: Vec<RawActionStep>,
    #[serde(default)]
    first_step: String,
}

#[derive(Debug, Deserialize)]
struct RawActionStep {
    action: String,
    #[serde(default)]
    timeframe: String,
    #[serde(default)]
    difficulty: String,
}

#[derive(Debug, Deserialize)]
struct RawReminderPayload {
    reminder_text: String,
    #[serde(default)]
    suggested_time: String,
    #[serde(default)]
    category: String,
}
