//! Built-in reference data: the classic CBT distortion catalog and the
//! exercise catalog with its distortion joins.

use super::types::{DistortionRecord, ExerciseRecord};

fn distortion(
    id: &str,
    name: &str,
    description: &str,
    examples: &[&str],
    reframe_prompt: &str,
    keywords: &[&str],
) -> DistortionRecord {
    DistortionRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
        reframe_prompt: reframe_prompt.to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
    }
}

fn exercise(id: &str, name: &str, category: &str, helpful_for: &[&str]) -> ExerciseRecord {
    ExerciseRecord {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        helpful_for: helpful_for.iter().map(|s| s.to_string()).collect(),
    }
}

/// The built-in distortion catalog, in its canonical evaluation order.
///
/// Order matters: the fallback deriver walks this list front to back, so the
/// same input always yields the same identification sequence.
pub fn builtin_distortions() -> Vec<DistortionRecord> {
    vec![
        distortion(
            "all_or_nothing",
            "All-or-Nothing Thinking",
            "Seeing things in absolute, black-and-white categories with no middle ground.",
            &[
                "I always mess everything up.",
                "If I'm not perfect, I'm a total failure.",
            ],
            "Are there exceptions? Could the situation be more nuanced than all-or-nothing?",
            &[
                "always", "never", "everyone", "no one", "everything", "nothing", "completely",
                "totally",
            ],
        ),
        distortion(
            "overgeneralization",
            "Overgeneralization",
            "Treating a single negative event as a never-ending pattern of defeat.",
            &[
                "I failed this interview, so I'll fail every interview.",
                "This kind of thing happens to me every time.",
            ],
            "Is one event really enough evidence for a pattern? What has gone differently before?",
            &["every time", "all the time", "again and again", "typical", "as usual"],
        ),
        distortion(
            "mental_filter",
            "Mental Filter",
            "Dwelling on a single negative detail until it colors the entire situation.",
            &[
                "The talk went fine but I stumbled on one answer, so it was a disaster.",
                "All I can think about is the one critical comment.",
            ],
            "What went well that this view is filtering out?",
            &["only bad", "can't stop thinking", "keep thinking about", "ruined the whole"],
        ),
        distortion(
            "discounting_positives",
            "Discounting the Positives",
            "Insisting that positive experiences or qualities don't count.",
            &[
                "They only said that to be nice.",
                "Anyone could have done what I did.",
            ],
            "If a friend achieved the same thing, would you dismiss it this easily?",
            &["doesn't count", "don't count", "just luck", "only because", "anyone could"],
        ),
        distortion(
            "mind_reading",
            "Mind Reading",
            "Assuming you know what other people are thinking without evidence.",
            &[
                "They think I'm incompetent.",
                "Everyone at the party noticed how awkward I was.",
            ],
            "What evidence do you have for what they're thinking? Could there be another explanation?",
            &["they think", "they must think", "everyone thinks", "she thinks", "he thinks"],
        ),
        distortion(
            "fortune_telling",
            "Fortune Telling",
            "Predicting that things will turn out badly as if it were an established fact.",
            &[
                "I'm going to bomb the presentation.",
                "This relationship is doomed.",
            ],
            "How often have past predictions like this actually come true?",
            &["going to fail", "will never", "won't work", "doomed", "no point trying"],
        ),
        distortion(
            "magnification",
            "Magnification (Catastrophizing)",
            "Blowing the importance of problems out of proportion and expecting the worst.",
            &[
                "Missing this deadline will end my career.",
                "This is an absolute disaster.",
            ],
            "What's a more realistic outcome? What would you tell a friend facing the same thing?",
            &["worst", "terrible", "disaster", "catastrophe", "ruined", "unbearable", "end of the world"],
        ),
        distortion(
            "emotional_reasoning",
            "Emotional Reasoning",
            "Taking emotions as evidence for the way things really are.",
            &[
                "I feel like a burden, so I must be one.",
                "I feel hopeless, so the situation must be hopeless.",
            ],
            "Feelings are real, but are they accurate? What do the facts say?",
            &["i feel like", "i feel that", "must be true", "i just know"],
        ),
        distortion(
            "should_statements",
            "Should Statements",
            "Criticizing yourself or others with rigid rules about how things should be.",
            &[
                "I should have handled that better.",
                "I must never let anyone down.",
            ],
            "Try replacing 'should' with 'I would prefer' - does the thought soften?",
            &["should", "shouldn't", "must", "have to", "ought to", "supposed to"],
        ),
        distortion(
            "personalization",
            "Personalization",
            "Holding yourself responsible for events that aren't entirely under your control.",
            &[
                "The project failed because of me.",
                "My friend is upset; it must be something I did.",
            ],
            "How much of this was actually within your control? Who or what else contributed?",
            &["my fault", "because of me", "i'm to blame", "i caused", "i ruined"],
        ),
        distortion(
            "labeling",
            "Labeling",
            "Attaching a global negative label to yourself instead of describing the event.",
            &["I'm such an idiot.", "I'm a loser."],
            "You are describing one moment, not a whole person. What happened, specifically?",
            &["i'm an idiot", "i'm stupid", "i'm a loser", "i'm a failure", "i'm worthless"],
        ),
    ]
}

/// The built-in exercise catalog.
pub fn builtin_exercises() -> Vec<ExerciseRecord> {
    vec![
        exercise(
            "thought_record",
            "Thought Record",
            "cognitive",
            &["all_or_nothing", "overgeneralization", "mental_filter"],
        ),
        exercise(
            "evidence_examination",
            "Examine the Evidence",
            "cognitive",
            &["mind_reading", "fortune_telling", "emotional_reasoning"],
        ),
        exercise(
            "grounding_54321",
            "5-4-3-2-1 Grounding",
            "somatic",
            &["magnification", "emotional_reasoning"],
        ),
        exercise(
            "should_to_could",
            "Should to Could",
            "cognitive",
            &["should_statements"],
        ),
        exercise(
            "responsibility_pie",
            "Responsibility Pie",
            "cognitive",
            &["personalization"],
        ),
        exercise(
            "self_compassion_break",
            "Self-Compassion Break",
            "emotional",
            &["labeling", "discounting_positives"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_distortion_ids_are_unique() {
        let distortions = builtin_distortions();
        let ids: HashSet<_> = distortions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), distortions.len());
    }

    #[test]
    fn test_distortions_are_fully_populated() {
        for d in builtin_distortions() {
            assert!(!d.name.is_empty(), "{} has no name", d.id);
            assert!(!d.description.is_empty(), "{} has no description", d.id);
            assert!(!d.examples.is_empty(), "{} has no examples", d.id);
            assert!(!d.reframe_prompt.is_empty(), "{} has no reframe prompt", d.id);
            assert!(!d.keywords.is_empty(), "{} has no keywords", d.id);
        }
    }

    #[test]
    fn test_exercises_reference_known_distortions() {
        let known: HashSet<_> = builtin_distortions()
            .into_iter()
            .map(|d| d.id)
            .collect();
        for e in builtin_exercises() {
            for target in &e.helpful_for {
                assert!(known.contains(target), "{} targets unknown {}", e.id, target);
            }
        }
    }
}
