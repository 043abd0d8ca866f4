//! Keyword-based content classification for transcript chunks.
//!
//! Rally speech arrives in Sinhala, Tamil, or English, so every keyword set
//! carries entries in all three scripts. Matching is plain case-insensitive
//! substring search: cheap, language-model-free, and known to false-positive
//! when a short keyword lands inside an unrelated word.

use serde::{Deserialize, Serialize};

/// Keywords that count as a mention of Nimal Jayaweera (People's United Front).
const JAYAWEERA_KEYWORDS: &[&str] = &[
    "jayaweera",
    "nimal jayaweera",
    "people's united front",
    "puf",
    "ජයවීර",
    "නිමල්",
    "ஜயவீர",
    "நிமல்",
];

/// Keywords that count as a mention of Selvi Raveendran (Democratic People's Congress).
const RAVEENDRAN_KEYWORDS: &[&str] = &[
    "raveendran",
    "selvi raveendran",
    "democratic people's congress",
    "dpc",
    "රවීන්ද්‍රන්",
    "සෙල්වි",
    "ரவீந்திரன்",
    "செல்வி",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "good", "great", "win", "victory", "support", "hope", "develop",
    "ජය", "හොඳ", "සංවර්ධන",
    "வெற்றி", "நல்ல", "ஆதரவு",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad", "corrupt", "fail", "crisis", "fraud",
    "නරක", "දූෂණ", "අර්බුද",
    "மோசம்", "ஊழல்", "தோல்வி",
];

/// Coarse sentiment of a transcript chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Classification result for one chunk of recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTags {
    pub mentions_jayaweera: bool,
    pub mentions_raveendran: bool,
    pub sentiment: Sentiment,
}

/// Classify a chunk of text by keyword matching.
///
/// Pure and deterministic: the same text always produces the same tags.
pub fn classify(text: &str) -> ContentTags {
    let lowered = text.to_lowercase();

    let positive = count_matches(&lowered, POSITIVE_KEYWORDS);
    let negative = count_matches(&lowered, NEGATIVE_KEYWORDS);

    // Strict majority decides; ties (including zero matches) stay neutral.
    let sentiment = if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    ContentTags {
        mentions_jayaweera: contains_any(&lowered, JAYAWEERA_KEYWORDS),
        mentions_raveendran: contains_any(&lowered, RAVEENDRAN_KEYWORDS),
        sentiment,
    }
}

fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lowered.contains(k))
}

fn count_matches(lowered: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lowered.contains(*k)).count()
}
