#![forbid(unsafe_code)]

//! Built-in rule table compiled into the binary
//!
//! The table is immutable and ordered: term rules first (orthography, then DIN
//! transliteration), then prefix words, phrases, symbols and the closing marker.
//! Scan results follow this order.

use crate::types::RuleCategory;

/// A glossary entry: every incorrect surface form maps to one canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermEntry {
    pub incorrect: &'static [&'static str],
    pub correct: &'static str,
    pub category: RuleCategory,
    /// Spelling in the origin script, exported to the public glossary
    pub origin: Option<&'static str>,
}

/// A prohibited destructive-verb form and its meaning-preserving substitute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixEntry {
    pub word: &'static str,
    pub replacement: &'static str,
}

/// Closing marker every conforming text ends with
pub const REQUIRED_SUFFIX: &str = "Q!";

/// Characters on each side of an orthography match searched for a citation marker
pub const CITATION_WINDOW: usize = 50;

/// Proper names that mark quoted third-party material
pub const CITATION_MARKERS: &[&str] = &["Berg"];

/// Evidence of an EOM Matrix sigillum in a document (matched case-insensitively)
pub const SIGILLUM_MARKERS: &[&str] = &["sigillum", "𝌇"];

pub const TERM_RULES: &[TermEntry] = &[
    // Q instead of K
    TermEntry {
        incorrect: &["Kabbala", "Kabbalah"],
        correct: "Qabbala",
        category: RuleCategory::Orthography,
        origin: Some("קבלה"),
    },
    TermEntry {
        incorrect: &["Kawana", "Kavanah"],
        correct: "Qawana",
        category: RuleCategory::Orthography,
        origin: Some("כוונה"),
    },
    // DIN 31636
    TermEntry {
        incorrect: &["Tzimtzum", "Tzimzum"],
        correct: "Zimzum",
        category: RuleCategory::DinTransliteration,
        origin: Some("צמצום"),
    },
    TermEntry {
        incorrect: &["Tikkun", "Tikun"],
        correct: "Tiqqun",
        category: RuleCategory::DinTransliteration,
        origin: Some("תיקון"),
    },
    TermEntry {
        incorrect: &["Dvekut", "Devekut"],
        correct: "Dwekut",
        category: RuleCategory::DinTransliteration,
        origin: Some("דבקות"),
    },
    TermEntry {
        incorrect: &["Zohar"],
        correct: "Sohar",
        category: RuleCategory::DinTransliteration,
        origin: Some("זוהר"),
    },
    TermEntry {
        incorrect: &["Atzilut"],
        correct: "Azilut",
        category: RuleCategory::DinTransliteration,
        origin: Some("אצילות"),
    },
    TermEntry {
        incorrect: &["Partzufim"],
        correct: "Parzufim",
        category: RuleCategory::DinTransliteration,
        origin: Some("פרצופים"),
    },
    // Sefirot
    TermEntry {
        incorrect: &["Kether"],
        correct: "Keter",
        category: RuleCategory::DinTransliteration,
        origin: Some("כתר"),
    },
    TermEntry {
        incorrect: &["Chochmah"],
        correct: "Chochma",
        category: RuleCategory::DinTransliteration,
        origin: Some("חכמה"),
    },
    TermEntry {
        incorrect: &["Binah"],
        correct: "Bina",
        category: RuleCategory::DinTransliteration,
        origin: Some("בינה"),
    },
    TermEntry {
        incorrect: &["Chesed"],
        correct: "Chessed",
        category: RuleCategory::DinTransliteration,
        origin: Some("חסד"),
    },
    TermEntry {
        incorrect: &["Gewurah", "Geburah"],
        correct: "Gewura",
        category: RuleCategory::DinTransliteration,
        origin: Some("גבורה"),
    },
    TermEntry {
        incorrect: &["Tifferet"],
        correct: "Tiferet",
        category: RuleCategory::DinTransliteration,
        origin: Some("תפארת"),
    },
    TermEntry {
        incorrect: &["Netzach"],
        correct: "Nezach",
        category: RuleCategory::DinTransliteration,
        origin: Some("נצח"),
    },
    TermEntry {
        incorrect: &["Jesod", "Yesod"],
        correct: "Jessod",
        category: RuleCategory::DinTransliteration,
        origin: Some("יסוד"),
    },
    TermEntry {
        incorrect: &["Malkuth"],
        correct: "Malchut",
        category: RuleCategory::DinTransliteration,
        origin: Some("מלכות"),
    },
];

pub const PREFIX_WORDS: &[PrefixEntry] = &[
    PrefixEntry {
        word: "zerbrechen",
        replacement: "bersten",
    },
    PrefixEntry {
        word: "zerbrach",
        replacement: "barst",
    },
    PrefixEntry {
        word: "zerbrachen",
        replacement: "barsten",
    },
    PrefixEntry {
        word: "zerbricht",
        replacement: "berstet",
    },
    PrefixEntry {
        word: "zerbrochen",
        replacement: "geborsten",
    },
    PrefixEntry {
        word: "zerstören",
        replacement: "wandeln",
    },
    PrefixEntry {
        word: "zerstört",
        replacement: "gewandelt",
    },
    PrefixEntry {
        word: "zerstörte",
        replacement: "wandelte",
    },
    PrefixEntry {
        word: "zerreißen",
        replacement: "öffnen",
    },
    PrefixEntry {
        word: "zerfallen",
        replacement: "sich wandeln",
    },
];

/// Sentimental or anthropomorphizing phrasing, matched as lowercase substrings
pub const PROHIBITED_PHRASES: &[&str] = &[
    "von herz zu herz",
    "liebevoll",
    "sanft",
    "zauber",
    "magie",
    "gemeinsam auf dem weg",
];

/// Decorative symbols and emoji
pub const PROHIBITED_SYMBOLS: &[char] = &[
    '❤', '💖', '💕', '💗', '💝', '✨', '💫', '🌟', '⭐', '🙏', '🕊', '😊', '🥰', '🌈', '🌸',
    '🦋', '🔥', '🎉',
];

/// Emoji presentation selector that trails many symbols (as in "❤️")
pub const VARIATION_SELECTOR: char = '\u{FE0F}';

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_surface_forms_are_unique() {
        let mut seen = HashSet::new();
        for entry in TERM_RULES {
            for form in entry.incorrect {
                assert!(seen.insert(form.to_lowercase()), "duplicate form {}", form);
            }
        }
        for entry in PREFIX_WORDS {
            assert!(seen.insert(entry.word.to_lowercase()), "duplicate form {}", entry.word);
        }
    }

    #[test]
    fn test_canonical_forms_are_not_flagged() {
        let forms: HashSet<String> = TERM_RULES
            .iter()
            .flat_map(|e| e.incorrect.iter().map(|f| f.to_lowercase()))
            .collect();
        for entry in TERM_RULES {
            assert!(!forms.contains(&entry.correct.to_lowercase()));
        }
        for entry in PREFIX_WORDS {
            assert!(!entry.replacement.to_lowercase().contains("zer"));
        }
    }

    #[test]
    fn test_phrases_are_lowercase() {
        for phrase in PROHIBITED_PHRASES {
            assert_eq!(*phrase, phrase.to_lowercase());
        }
    }
}
