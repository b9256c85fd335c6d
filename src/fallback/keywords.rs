//! Declarative keyword tables for the rule-based path.
//!
//! Each table is an ordered list of categories; evaluation walks it front to
//! back and the first keyword hit claims the category, so output ordering is
//! reproducible across runs. Matching is case-insensitive substring
//! containment on the input; the tables themselves keep original casing.

/// One category tag with the substrings that suggest it.
#[derive(Debug, Clone, Copy)]
pub struct KeywordCategory {
    pub tag: &'static str,
    pub keywords: &'static [&'static str],
}

/// Emotion categories, in evaluation order.
pub const EMOTION_KEYWORDS: &[KeywordCategory] = &[
    KeywordCategory {
        tag: "anxious",
        keywords: &["anxious", "worried", "nervous", "stress", "panic", "fear"],
    },
    KeywordCategory {
        tag: "overwhelmed",
        keywords: &["overwhelmed", "too much", "can't handle", "drowning", "exhausted"],
    },
    KeywordCategory {
        tag: "sad",
        keywords: &["sad", "depressed", "down", "unhappy", "hopeless", "crying"],
    },
    KeywordCategory {
        tag: "angry",
        keywords: &["angry", "mad", "furious", "annoyed", "irritated"],
    },
    KeywordCategory {
        tag: "frustrated",
        keywords: &["frustrated", "stuck", "blocked", "can't", "impossible"],
    },
    KeywordCategory {
        tag: "confused",
        keywords: &["confused", "don't know", "uncertain", "lost", "unclear"],
    },
];

/// Theme categories, in evaluation order.
pub const THEME_KEYWORDS: &[KeywordCategory] = &[
    KeywordCategory {
        tag: "work",
        keywords: &["work", "job", "boss", "colleague", "deadline", "project", "career", "office"],
    },
    KeywordCategory {
        tag: "relationships",
        keywords: &["relationship", "partner", "boyfriend", "girlfriend", "spouse", "dating"],
    },
    KeywordCategory {
        tag: "family",
        keywords: &["family", "parent", "mom", "dad", "sibling", "child", "kid"],
    },
    KeywordCategory {
        tag: "health",
        keywords: &["health", "sick", "doctor", "tired", "sleep", "exercise", "body"],
    },
    KeywordCategory {
        tag: "finance",
        keywords: &["money", "bills", "debt", "afford", "salary", "pay", "financial"],
    },
    KeywordCategory {
        tag: "social",
        keywords: &["friend", "social", "lonely", "people", "party", "gathering"],
    },
    KeywordCategory {
        tag: "future",
        keywords: &["future", "tomorrow", "plan", "goal", "dream", "someday"],
    },
    KeywordCategory {
        tag: "self",
        keywords: &["myself", "self", "worth", "confidence", "identity", "purpose"],
    },
];

/// Collect the tags of every category with a keyword hit in `text`,
/// lowercased before matching, in table order, capped at `max`. Returns the
/// given default when nothing matches.
pub fn match_categories(
    text: &str,
    table: &[KeywordCategory],
    max: usize,
    default: &str,
) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut tags: Vec<String> = table
        .iter()
        .filter(|category| {
            category
                .keywords
                .iter()
                .any(|kw| lowered.contains(&kw.to_lowercase()))
        })
        .map(|category| category.tag.to_string())
        .collect();

    tags.truncate(max);

    if tags.is_empty() {
        vec![default.to_string()]
    } else {
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_case_insensitive() {
        let tags = match_categories("My BOSS is upset", THEME_KEYWORDS, 2, "general");
        assert_eq!(tags, vec!["work"]);
    }

    #[test]
    fn test_match_order_follows_table_order() {
        let tags = match_categories(
            "worried about money and my job",
            THEME_KEYWORDS,
            3,
            "general",
        );
        assert_eq!(tags, vec!["work", "finance"]);
    }

    #[test]
    fn test_match_respects_cap() {
        let tags = match_categories(
            "job partner family doctor money",
            THEME_KEYWORDS,
            2,
            "general",
        );
        assert_eq!(tags.len(), 2);
        assert_eq!(tags, vec!["work", "relationships"]);
    }

    #[test]
    fn test_no_match_yields_default() {
        let tags = match_categories("xyzzy", EMOTION_KEYWORDS, 2, "processing");
        assert_eq!(tags, vec!["processing"]);
    }

    #[test]
    fn test_empty_input_yields_default() {
        let tags = match_categories("", THEME_KEYWORDS, 2, "general");
        assert_eq!(tags, vec!["general"]);
    }

    #[test]
    fn test_category_tags_are_unique() {
        for table in [EMOTION_KEYWORDS, THEME_KEYWORDS] {
            let mut tags: Vec<_> = table.iter().map(|c| c.tag).collect();
            tags.sort_unstable();
            tags.dedup();
            assert_eq!(tags.len(), table.len());
        }
    }
}
