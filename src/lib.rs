//! # ClearMind Analysis Engine
//!
//! A dual-path engine that analyzes short pieces of free text ("thoughts")
//! for cognitive-behavioral patterns: distortion detection, reframing,
//! conversational coaching, session summaries, thought categorization,
//! action planning, and reminder generation.
//!
//! ## Dual-path design
//!
//! Every capability works whether or not a remote model backend is
//! reachable. The AI path builds a deterministic prompt, calls the backend
//! once, strictly normalizes the response against the capability's schema,
//! and enriches distortion identifiers against the static catalog. Any
//! failure anywhere on that path - no credential, transport fault,
//! malformed output, unknown identifiers - silently and completely degrades
//! to a pure, deterministic rule-based deriver that produces the same
//! result shape. The `analysis_method` tag (`ai` / `rule_based`) is the
//! only observable signal of which path ran.
//!
//! ## Architecture
//!
//! ```text
//! Orchestrator → Prompt Builder → Backend Gateway → Normalizer → Enricher
//!        ↓ (on any failure)
//!   Fallback Deriver (keyword heuristics, never fails)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use clearmind_engine::{AnalysisEngine, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let engine = AnalysisEngine::from_config(&config)?;
//!     let result = engine.analyze_distortions("I always mess things up").await;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Backend client gateway for the remote model API.
pub mod backend;
/// Configuration management.
pub mod config;
/// Capability orchestrators and result types.
pub mod engine;
/// Error types and result aliases.
pub mod error;
/// Rule-based fallback derivers and keyword tables.
pub mod fallback;
/// Prompt templates and builders.
pub mod prompts;
/// Response normalization schemas and the strict parse routine.
pub mod schema;
/// Static distortion/exercise taxonomies and enrichment.
pub mod taxonomy;

pub use config::Config;
pub use engine::{AnalysisEngine, AnalysisMethod, ConversationTurn, TurnRole};
pub use error::{EngineError, EngineResult};
pub use taxonomy::Catalogs;
