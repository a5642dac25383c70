//! Behavior of the text conformance engine on realistic German prose

#[macro_use]
mod common;

use wwaq::rules::builtin::{PREFIX_WORDS, TERM_RULES};
use wwaq::{FindingKind, RuleCategory, Severity, TextConformanceEngine};

fn engine() -> TextConformanceEngine {
    assert_ok!(TextConformanceEngine::new())
}

fn count_kind(findings: &[wwaq::Finding], kind: FindingKind) -> usize {
    findings.iter().filter(|f| f.kind == kind).count()
}

#[test]
fn test_clean_text_scores_full() {
    let text = "Die Qabbala lehrt uns über die Einheit.\n\
                Die Gefäße barsten beim Überfluss des Lichts.\n\
                Nach Baal HaSulam ist Tiqqun der Weg.\n\nQ!";
    let result = engine().validate(text);
    assert!(result.is_valid());
    assert_eq!(result.score(), 100);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_single_orthography_violation() {
    let engine = engine();
    let result = engine.validate("Die Kabbala lehrt uns.\nQ!");

    assert_eq!(result.errors.len(), 1);
    let finding = &result.errors[0];
    assert_eq!(finding.kind, FindingKind::Orthography);
    assert_eq!(finding.matched.as_deref(), Some("Kabbala"));
    assert_eq!(finding.suggestion.as_deref(), Some("Qabbala"));
    let position = assert_some!(finding.position);
    assert_eq!((position.line, position.column), (1, 5));

    let fixed = engine.transform("Die Kabbala lehrt uns.\nQ!");
    assert!(fixed.contains("Qabbala"));
    assert!(!fixed.contains("Kabbala"));
}

#[test]
fn test_prefix_words_detected() {
    let engine = engine();
    for text in ["Die Kelim zerbrachen", "Der Tempel wurde zerstört"] {
        let result = engine.validate(text);
        assert_eq!(
            count_kind(&result.errors, FindingKind::ProhibitedPrefix),
            1,
            "not detected in: {}",
            text
        );
    }
    for text in ["Die Gefäße barsten", "Das Licht wandelte sich"] {
        let result = engine.validate(text);
        assert_eq!(count_kind(&result.errors, FindingKind::ProhibitedPrefix), 0);
    }
}

#[test]
fn test_q_instead_of_k() {
    let engine = engine();
    let cases = [
        ("Die Kabbala lehrt uns", false),
        ("Die Qabbala lehrt uns", true),
        ("Berg Kabbalah Centre", true),
        ("Mit Kawana beten", false),
        ("Mit Qawana beten", true),
    ];
    for (text, clean) in cases {
        let result = engine.validate(text);
        let found = count_kind(&result.errors, FindingKind::Orthography);
        assert_eq!(found == 0, clean, "unexpected result for: {}", text);
    }
}

#[test]
fn test_sentimental_phrasing_and_symbols() {
    let engine = engine();
    for text in [
        "Von Herz zu Herz teilen wir",
        "Die liebevolle Aufnahme",
        "Sanfte Korrektur",
        "Der Zauber der Qabbala",
        "❤️ Liebe",
    ] {
        let result = engine.validate(text);
        assert!(!result.is_valid(), "not detected: {}", text);
        assert!(result.errors.iter().all(|f| matches!(
            f.kind,
            FindingKind::ProhibitedPhrase | FindingKind::ProhibitedSymbol
        )));
    }
}

#[test]
fn test_din_spellings_are_warnings() {
    let engine = engine();
    let cases = [
        ("Tikkun olam", Some("Tiqqun")),
        ("Tzimtzum Prozess", Some("Zimzum")),
        ("Dvekut erreichen", Some("Dwekut")),
        ("Tiqqun Prozess", None),
    ];
    for (text, suggestion) in cases {
        let result = engine.validate(text);
        assert!(result.is_valid());
        let din: Vec<_> = result
            .warnings
            .iter()
            .filter(|f| f.kind == FindingKind::Transliteration)
            .collect();
        match suggestion {
            Some(expected) => {
                assert_eq!(din.len(), 1, "{}", text);
                assert_eq!(din[0].severity, Severity::Warning);
                assert_eq!(din[0].suggestion.as_deref(), Some(expected));
            }
            None => assert!(din.is_empty()),
        }
    }
}

#[test]
fn test_spec_example_sentence() {
    let engine = engine();
    let text = "Die Kabbala lehrt Tzimtzum durch Qawana.";
    let result = engine.validate(text);

    assert!(result.findings().count() >= 2);
    assert_eq!(count_kind(&result.errors, FindingKind::Orthography), 1);
    assert_eq!(count_kind(&result.warnings, FindingKind::Transliteration), 1);
    assert_eq!(count_kind(&result.warnings, FindingKind::MissingMarker), 1);

    assert_eq!(
        engine.transform(text),
        "Die Qabbala lehrt Zimzum durch Qawana.\nQ!"
    );
}

#[test]
fn test_transformation_of_mixed_text() {
    let transformed =
        engine().transform("Die Kabbala lehrt dass die Kelim zerbrachen durch Tzimtzum.");
    for part in ["Qabbala", "barsten", "Zimzum", "Q!"] {
        assert!(transformed.contains(part), "'{}' missing in {}", part, transformed);
    }
    for banned in ["Kabbala", "zerbrachen", "Tzimtzum"] {
        assert!(!transformed.contains(banned));
    }
}

#[test]
fn test_transform_removes_sentences_and_symbols() {
    let transformed = engine().transform(
        "Die Qabbala lehrt. Sie spricht liebevoll zu uns. Das Licht ✨️ scheint.",
    );
    assert_eq!(transformed, "Die Qabbala lehrt. Das Licht  scheint.\nQ!");
}

#[test]
fn test_case_is_carried_over() {
    let engine = engine();
    assert_eq!(engine.transform("KABBALA\nQ!"), "Qabbala\nQ!");
    assert_eq!(engine.transform("Kabbala lehrt.\nQ!"), "Qabbala lehrt.\nQ!");
    assert_eq!(engine.transform("die kabbala\nQ!"), "die qabbala\nQ!");
    assert_eq!(
        engine.transform("Zerbrachen die Gefäße?\nQ!"),
        "Barsten die Gefäße?\nQ!"
    );
}

#[test]
fn test_transform_is_idempotent() {
    let engine = engine();
    let inputs = [
        "",
        "Q!",
        "Die Kabbala lehrt liebevoll von Herz zu Herz.\nDie Gefäße zerbrachen mit sanfter Magie ❤️\nTikkun durch Tzimtzum.",
        "Berg Kabbalah Centre zitiert die Kabbala.",
        "Zerfallen ist nichts. Alles wird zerstört!",
        "Die Kab✨bala lehrt. Q!",
        "Tik💫kun und Zer✨fallen.",
    ];
    for input in inputs {
        let once = engine.transform(input);
        assert_eq!(engine.transform(&once), once, "not idempotent for {:?}", input);
        assert!(once.trim_end().ends_with("Q!"));
    }
}

#[test]
fn test_transform_citation_window_after_length_change() {
    let engine = engine();
    let text = format!("Berg zerfallen{}Kabbala lehrt. Q!", " ".repeat(36));

    let once = engine.transform(&text);
    assert_eq!(
        once,
        format!("Berg sich wandeln{}Qabbala lehrt. Q!", " ".repeat(36))
    );
    assert_eq!(engine.transform(&once), once);
}

#[test]
fn test_transform_symbol_inside_term() {
    let engine = engine();
    let once = engine.transform("Die Kab✨bala lehrt. Q!");
    assert_eq!(once, "Die Qabbala lehrt. Q!");
    assert!(engine.validate(&once).is_valid());
    assert_eq!(engine.transform(&once), once);
}

/// Inserts `symbol` after the first half of `word`
fn split_with(word: &str, symbol: char) -> String {
    let mid = word.chars().count() / 2;
    word.chars()
        .take(mid)
        .chain(std::iter::once(symbol))
        .chain(word.chars().skip(mid))
        .collect()
}

#[test]
fn test_transform_fixed_point_over_combinations() {
    let engine = engine();
    let gaps = [1, 20, 33, 36, 40, 47, 50, 55];

    for entry in TERM_RULES {
        for form in entry.incorrect {
            for prefix in PREFIX_WORDS.iter().take(3).chain(PREFIX_WORDS.iter().rev().take(1)) {
                for gap in gaps {
                    for (split, cited, phrase) in [
                        (false, true, false),
                        (true, false, false),
                        (true, true, false),
                        (false, true, true),
                        (true, true, true),
                    ] {
                        let term = if split {
                            split_with(form, '✨')
                        } else {
                            form.to_string()
                        };
                        let lead = if cited { "Berg " } else { "" };
                        let tail = if phrase { " Das war liebevoll." } else { "" };
                        let text = format!(
                            "{}{}{}{} lehrt 🙏{}.{}",
                            lead,
                            prefix.word,
                            " ".repeat(gap),
                            term,
                            '\u{FE0F}',
                            tail
                        );

                        let once = engine.transform(&text);
                        assert_eq!(engine.transform(&once), once, "not a fixed point for {:?}", text);
                        assert!(
                            engine.validate(&once).is_valid(),
                            "invalid output {:?} for {:?}",
                            once,
                            text
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_transform_does_not_mutate_input() {
    let input = String::from("Die Kabbala lehrt.");
    let copy = input.clone();
    let _ = engine().transform(&input);
    assert_eq!(input, copy);
}

#[test]
fn test_complete_invalid_text() {
    let text = "Die Kabbala lehrt liebevoll von Herz zu Herz.\n\
                Die Gefäße zerbrachen mit sanfter Magie ❤️\n\
                Tikkun durch Tzimtzum.";
    let result = engine().validate(text);
    assert!(!result.is_valid());
    assert!(result.score() < 50, "score too high: {}", result.score());
    assert!(result.errors.len() >= 4);
}

#[test]
fn test_edge_cases() {
    let engine = engine();

    let empty = engine.validate("");
    assert!(empty.is_valid());
    assert_eq!(empty.warnings.len(), 1);

    let marker = engine.validate("Q!");
    assert!(marker.is_valid());
    assert_eq!(marker.score(), 100);

    let mixed = engine.validate("Die KABBALA und kabbala");
    assert_eq!(mixed.errors.len(), 2);
}

#[test]
fn test_citation_window() {
    let engine = engine();
    let near = "Berg nennt es Kabbala.";
    assert!(engine.validate(near).is_valid());

    let far = format!("Berg sagte etwas. {} Die Kabbala lehrt.", "x".repeat(60));
    assert_eq!(engine.validate(&far).errors.len(), 1);
}

#[test]
fn test_every_table_form_is_detected() {
    let engine = engine();
    for entry in TERM_RULES {
        for form in entry.incorrect {
            let result = engine.validate(&format!("Hier steht {} im Satz.\nQ!", form));
            let expected = match entry.category {
                RuleCategory::DinTransliteration => result.warnings.len(),
                _ => result.errors.len(),
            };
            assert_eq!(expected, 1, "form {} not detected", form);
        }
    }
    for entry in PREFIX_WORDS {
        let result = engine.validate(&format!("Es ist {}.\nQ!", entry.word));
        assert_eq!(result.errors.len(), 1, "prefix word {} not detected", entry.word);
    }
}

#[test]
fn test_score_formula() {
    // 2 critical + 2 warnings
    let result = engine().validate("Kabbala Kawana Tikkun");
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.warnings.len(), 2);
    assert_eq!(result.score(), 70);
}

#[test]
fn test_engine_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TextConformanceEngine>();
}
