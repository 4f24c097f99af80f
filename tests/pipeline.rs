use std::collections::HashSet;
use std::sync::Arc;

use symptips::{
    Catalog, CorrectionStrategy, EmptyTipsPolicy, Lexicon, LexiconFormat, Pipeline,
    PipelineConfig, Symptom, SymptomTipResult, TipSet, TipsRequest,
};

const DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");

fn catalog() -> Catalog {
    Catalog::from_csv_paths(format!("{DATA}/symptoms.csv"), format!("{DATA}/tips.csv")).unwrap()
}

fn lexicon() -> Lexicon {
    Lexicon::from_path(format!("{DATA}/words.txt"), LexiconFormat::WordList).unwrap()
}

fn strategies() -> Vec<CorrectionStrategy> {
    vec![
        CorrectionStrategy::ClosestMatch { cutoff: 0.8 },
        CorrectionStrategy::Frequency {
            max_edit_distance: 2,
        },
    ]
}

fn pipeline_with(config: PipelineConfig) -> Pipeline {
    Pipeline::new(catalog(), lexicon(), config).unwrap()
}

fn pipelines() -> Vec<Pipeline> {
    strategies()
        .into_iter()
        .map(|correction| {
            pipeline_with(PipelineConfig {
                correction,
                ..PipelineConfig::default()
            })
        })
        .collect()
}

fn names_of(results: &[SymptomTipResult]) -> Vec<&str> {
    results.iter().map(|r| r.symptom_name.as_str()).collect()
}

#[test]
fn test_misspelled_acne_returns_its_tips() {
    for pipeline in pipelines() {
        let results = pipeline.process("I have acn and it hurts");
        assert_eq!(
            results,
            vec![SymptomTipResult {
                symptom_name: "Acne".into(),
                tips: vec!["Wash face twice daily".into(), "Avoid oily foods".into()],
            }]
        );
    }
}

#[test]
fn test_gibberish_returns_nothing() {
    for pipeline in pipelines() {
        assert!(pipeline.process("xyzzy nonsense gibberish").is_empty());
        assert!(pipeline.process("").is_empty());
    }
}

#[test]
fn test_every_symptom_name_matches_itself() {
    for correction in strategies() {
        for threshold in [85.0, 100.0] {
            let pipeline = pipeline_with(PipelineConfig {
                correction,
                match_threshold: threshold,
                ..PipelineConfig::default()
            });
            for symptom in pipeline.catalog().symptoms() {
                let results = pipeline.process(&symptom.name);
                assert!(
                    names_of(&results).contains(&symptom.name.as_str()),
                    "{} not found at threshold {threshold}: {results:?}",
                    symptom.name
                );
            }
        }
    }
}

#[test]
fn test_punctuated_and_long_names_match_exactly() {
    let names = [
        "Run-down",
        "Shortness of Breath (Dyspnea)",
        "Pain in the lower back",
        "Pins and needles in the hands and feet",
        "Acne",
    ];
    let symptoms = names.iter().zip(1..).map(|(name, id)| Symptom {
        id,
        name: name.to_string(),
    });
    let tips = (1..=names.len() as u64).map(|id| TipSet {
        symptom_id: id,
        tips: vec!["Rest".into()],
    });
    let catalog = Catalog::join(symptoms, tips).unwrap();

    for correction in strategies() {
        let pipeline = Pipeline::new(
            catalog.clone(),
            lexicon(),
            PipelineConfig {
                correction,
                match_threshold: 100.0,
                ..PipelineConfig::default()
            },
        )
        .unwrap();
        for name in names {
            let explanation = pipeline.explain(name);
            assert_eq!(explanation.corrected, name);
            assert_eq!(names_of(&explanation.results), vec![name], "{name}");
            assert_eq!(explanation.candidates[0].score, 100.0);
        }
    }
}

#[test]
fn test_single_edit_typos_are_tolerated() {
    let cases = [
        ("acn", "Acne"),
        ("hedache", "Headache"),
        ("insomia", "Insomnia"),
        ("nausa", "Nausea"),
        ("sore throt", "Sore Throat"),
        ("coughh", "Cough"),
        ("dizzines", "Dizziness"),
    ];
    for pipeline in pipelines() {
        for (input, expected) in cases {
            let results = pipeline.process(input);
            assert!(
                names_of(&results).contains(&expected),
                "{input:?} should yield {expected}, got {results:?}"
            );
        }
    }
}

#[test]
fn test_raising_threshold_never_adds_matches() {
    let inputs = [
        "I have acn and it hurts",
        "bad hedache and a runny nose since yesterday",
        "my back hurts after eating and I feel nausea",
        "sore throat, fever and a cough",
        "cannot sleep at night",
    ];
    let thresholds = [0.0, 50.0, 70.0, 85.0, 90.0, 95.0, 100.0];
    for correction in strategies() {
        let runs: Vec<Vec<HashSet<String>>> = thresholds
            .iter()
            .map(|&match_threshold| {
                let pipeline = pipeline_with(PipelineConfig {
                    correction,
                    match_threshold,
                    ..PipelineConfig::default()
                });
                inputs
                    .iter()
                    .map(|input| {
                        pipeline
                            .process(input)
                            .into_iter()
                            .map(|r| r.symptom_name)
                            .collect()
                    })
                    .collect()
            })
            .collect();
        for pair in runs.windows(2) {
            for (lower, higher) in pair[0].iter().zip(&pair[1]) {
                assert!(higher.is_subset(lower), "{higher:?} not within {lower:?}");
            }
        }
    }
}

#[test]
fn test_no_duplicate_symptoms() {
    let inputs = [
        "acne acne ACNE and acn",
        "sore throat and my throat is sore",
        "fever fever fevr",
    ];
    for pipeline in pipelines() {
        for input in inputs {
            let results = pipeline.process(input);
            let unique: HashSet<&str> = names_of(&results).into_iter().collect();
            assert_eq!(unique.len(), results.len(), "{input}: {results:?}");
            assert!(!results.is_empty(), "{input}");
        }
    }
}

#[test]
fn test_several_symptoms_in_one_complaint() {
    for pipeline in pipelines() {
        let results = pipeline.process("I have a bad hedache and a runny nose since yesterday");
        let found = names_of(&results);
        assert!(found.contains(&"Headache"), "{found:?}");
        assert!(found.contains(&"Runny Nose"), "{found:?}");
        let runny = results.iter().find(|r| r.symptom_name == "Runny Nose").unwrap();
        assert_eq!(runny.tips, vec!["Use saline nasal spray", "Stay hydrated"]);
    }
}

#[test]
fn test_tipless_symptom_is_kept() {
    let pipeline = pipeline_with(PipelineConfig::default());
    let results = pipeline.process("dizziness");
    assert_eq!(names_of(&results), vec!["Dizziness"]);
    assert!(results[0].tips.is_empty());

    let pipeline = pipeline_with(PipelineConfig {
        empty_tips: EmptyTipsPolicy::Placeholder,
        ..PipelineConfig::default()
    });
    let results = pipeline.process("dizziness");
    assert_eq!(results[0].tips, vec!["No tips found for 'Dizziness'."]);
}

#[test]
fn test_correction_is_idempotent_on_correct_sentences() {
    for pipeline in pipelines() {
        let sentence = "I have a sore throat and a runny nose since yesterday";
        let once = pipeline.explain(sentence).corrected;
        assert_eq!(once, sentence);
        assert_eq!(pipeline.explain(&once).corrected, once);
    }
}

#[test]
fn test_json_request_round() {
    let pipeline = pipeline_with(PipelineConfig::default());
    let response = pipeline.process_request(&TipsRequest::from_json(r#"{"text": "fevr"}"#));
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["symptoms"][0]["symptom"], "Fever");
    assert_eq!(json["symptoms"][0]["tips"].as_array().map(Vec::len), Some(3));

    let empty = pipeline.process_request(&TipsRequest::from_json("not json"));
    assert!(empty.symptoms.is_empty());
}

#[test]
fn test_shared_pipeline_across_threads() {
    let pipeline = Arc::new(pipeline_with(PipelineConfig::default()));
    let expected = pipeline.process("hedache and coughh");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let pipeline = Arc::clone(&pipeline);
            let expected = &expected;
            scope.spawn(move || {
                assert_eq!(&pipeline.process("hedache and coughh"), expected);
            });
        }
    });
}
