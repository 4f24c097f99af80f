use symptips::{include_lexicon, CorrectionStrategy, SpellCorrector};

#[test]
fn test_include_macro_word_list() {
    // Embedded at compile time from tests/data/words.txt
    let lexicon = include_lexicon!("tests/data/words.txt");

    assert!(lexicon.contains("hurts"));
    assert!(lexicon.contains("can't"));
    // Comment lines are not words.
    assert!(!lexicon.contains("# common words for spelling correction"));
    assert_eq!(lexicon.frequency("throat"), Some(1));
    // Sorted insertion since phf order is unspecified.
    let words = lexicon.words();
    assert!(words.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_include_macro_frequencies() {
    let lexicon = include_lexicon!("tests/data/frequencies.txt", has_freq = true);

    assert_eq!(lexicon.frequency("the"), Some(1000));
    assert_eq!(lexicon.frequency("rough"), Some(90));
    assert_eq!(lexicon.len(), 8);
}

#[test]
fn test_embedded_lexicon_drives_correction() {
    let lexicon = include_lexicon!("tests/data/frequencies.txt", has_freq = true);
    let corrector = SpellCorrector::new(
        lexicon,
        CorrectionStrategy::Frequency {
            max_edit_distance: 2,
        },
    );

    // "xough" is one edit from "cough" (55) and "rough" (90).
    assert_eq!(corrector.correct_word("xough"), "rough");
    assert_eq!(corrector.correct_sentence("I have pain"), "I have pain");
}
