use serde::{Deserialize, Serialize};

/// One cognitive distortion in the static reference catalog.
///
/// Loaded once at process start and never mutated. The keyword list is used
/// only by the rule-based fallback path; the AI path references records by
/// id via the serialized catalog embedded in its prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistortionRecord {
    /// Stable string key (e.g. "all_or_nothing")
    pub id: String,
    /// Display name
    pub name: String,
    /// Human description
    pub description: String,
    /// Example thoughts exhibiting the pattern
    pub examples: Vec<String>,
    /// Template question used to build reframes
    pub reframe_prompt: String,
    /// Substrings that suggest the pattern (fallback path only)
    pub keywords: Vec<String>,
}

/// One exercise in the static reference catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Distortion ids this exercise targets
    pub helpful_for: Vec<String>,
}

/// A distortion identified on a specific thought: the static record joined
/// with the per-invocation confidence and explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedDistortion {
    pub id: String,
    pub name: String,
    pub description: String,
    pub examples: Vec<String>,
    pub reframe_prompt: String,
    /// Always within [0, 1]; model-supplied values are clamped
    pub confidence: f64,
    /// Why this distortion applies to this particular thought
    pub specific_explanation: String,
}

impl DistortionRecord {
    /// Join this record with per-invocation analysis fields.
    pub fn enriched(&self, confidence: f64, specific_explanation: String) -> EnrichedDistortion {
        EnrichedDistortion {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            examples: self.examples.clone(),
            reframe_prompt: self.reframe_prompt.clone(),
            confidence: confidence.clamp(0.0, 1.0),
            specific_explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DistortionRecord {
        DistortionRecord {
            id: "all_or_nothing".to_string(),
            name: "All-or-Nothing Thinking".to_string(),
            description: "Seeing things in absolute terms".to_string(),
            examples: vec!["I always fail".to_string()],
            reframe_prompt: "Are there exceptions?".to_string(),
            keywords: vec!["always".to_string(), "never".to_string()],
        }
    }

    #[test]
    fn test_enriched_carries_static_fields() {
        let e = record().enriched(0.8, "uses 'always'".to_string());
        assert_eq!(e.id, "all_or_nothing");
        assert_eq!(e.name, "All-or-Nothing Thinking");
        assert_eq!(e.confidence, 0.8);
        assert_eq!(e.specific_explanation, "uses 'always'");
    }

    #[test]
    fn test_enriched_clamps_confidence() {
        assert_eq!(record().enriched(1.7, String::new()).confidence, 1.0);
        assert_eq!(record().enriched(-0.2, String::new()).confidence, 0.0);
    }
}
