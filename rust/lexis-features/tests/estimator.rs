use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use lexis_corpus::{Candidate, CorpusError, CorpusFormat, Instance, parse_corpus};
use lexis_features::feature::{UNDEFINED_MAX_DEPTH, UNDEFINED_MIN_DEPTH};
use lexis_features::model::{MemoryLanguageModel, Sense, SenseInventory, Syllabifier};
use lexis_features::{
    EstimatorConfig, FeatureError, FeatureEstimator, FeatureSpec, FileResourceFactory,
    Orientation, Preloaded, Resource, ResourceFactory, ResourceKey,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const CORPUS: &str = "\
the cat perched on the mat\tperched\t2\t1:sat\t2:roosted\t3:settled down
quickly they left\tquickly\t0\t1:fast\t2:zippily
";

fn language_model() -> Resource {
    Resource::LanguageModel(Arc::new(
        MemoryLanguageModel::new(-30.0)
            .with_score("sat", -2.0)
            .with_score("sat on", -3.0)
            .with_score("cat sat", -4.0)
            .with_score("cat sat on", -5.0)
            .with_anchored_score("fast they", true, false, -6.0),
    ))
}

fn lexical_database() -> Resource {
    Resource::LexicalDatabase(Arc::new(
        SenseInventory::new()
            .with_word(
                "sat",
                [Sense::new("sit.v.01").with_lemmas(["sit", "sat"]).with_depths(1, 3)],
            )
            .with_word("perched", [Sense::new("sit.v.01").with_depths(1, 3)]),
    ))
}

fn senses() -> FeatureSpec {
    FeatureSpec::SenseCount { database: "wordnet".into() }
}

fn estimator() -> FeatureEstimator {
    let mut estimator = FeatureEstimator::new(Preloaded);
    estimator
        .register("lm", language_model())
        .register("wordnet", lexical_database());
    estimator
}

#[test]
fn one_row_per_candidate_in_corpus_order() -> Result<()> {
    let mut estimator = estimator();
    estimator.add_feature(&FeatureSpec::Length, Orientation::Complexity)?;

    let instances = parse_corpus(CORPUS, CorpusFormat::Victor)?;
    let matrix = estimator.compute_batch(&instances)?;

    let lengths: Vec<f64> = matrix.column(0).collect();
    assert_eq!(lengths, vec![3.0, 7.0, 12.0, 4.0, 7.0]);
    Ok(())
}

#[test]
fn collocational_sweep_emits_four_columns_in_span_order() -> Result<()> {
    let mut estimator = estimator();
    estimator.add_feature(
        &FeatureSpec::Collocational {
            language_model: "lm".into(),
            left: 1,
            right: 1,
        },
        Orientation::Simplicity,
    )?;
    assert_eq!(estimator.width(), 4);

    let instances = parse_corpus(CORPUS, CorpusFormat::Victor)?;
    let matrix = estimator.compute_batch(&instances)?;

    assert_eq!(matrix.row(0), Some(&[-2.0, -3.0, -4.0, -5.0][..]));
    // Head at sentence start: (0, 1) is anchored at the beginning.
    assert_eq!(matrix.row(3), Some(&[-30.0, -6.0, -30.0, -6.0][..]));
    Ok(())
}

#[test]
fn candidate_without_senses_reports_sentinels() -> Result<()> {
    let mut estimator = estimator();
    for spec in [
        FeatureSpec::SenseCount { database: "wordnet".into() },
        FeatureSpec::SynonymCount { database: "wordnet".into() },
        FeatureSpec::HypernymCount { database: "wordnet".into() },
        FeatureSpec::HyponymCount { database: "wordnet".into() },
        FeatureSpec::MinDepth { database: "wordnet".into() },
        FeatureSpec::MaxDepth { database: "wordnet".into() },
        FeatureSpec::IsSynonym { database: "wordnet".into() },
    ] {
        estimator.add_feature(&spec, Orientation::Simplicity)?;
    }

    let instances = parse_corpus(CORPUS, CorpusFormat::Victor)?;
    let matrix = estimator.compute_batch(&instances)?;

    assert_eq!(matrix.row(0), Some(&[1.0, 2.0, 0.0, 0.0, 1.0, 3.0, 1.0][..]));
    // "roosted" has no senses while its target does.
    assert_eq!(
        matrix.row(1),
        Some(&[0.0, 0.0, 0.0, 0.0, UNDEFINED_MIN_DEPTH, UNDEFINED_MAX_DEPTH, 0.0][..])
    );
    // "fast" has no senses and neither has its target.
    assert_eq!(
        matrix.row(3),
        Some(&[0.0, 0.0, 0.0, 0.0, UNDEFINED_MIN_DEPTH, UNDEFINED_MAX_DEPTH, 1.0][..])
    );
    Ok(())
}

#[test]
fn normalized_columns_have_unit_norm() -> Result<()> {
    let mut estimator = estimator().with_normalization(true);
    estimator
        .add_feature(&FeatureSpec::Length, Orientation::Complexity)?
        .add_feature(&senses(), Orientation::Simplicity)?
        .add_feature(
            &FeatureSpec::HypernymCount { database: "wordnet".into() },
            Orientation::Simplicity,
        )?;

    let instances = parse_corpus(CORPUS, CorpusFormat::Victor)?;
    let matrix = estimator.compute_batch(&instances)?;

    for column in 0..2 {
        let norm = matrix.column(column).map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12, "column {column} has norm {norm}");
    }
    assert!(matrix.column(2).all(|v| v == 0.0));
    Ok(())
}

#[test]
fn resources_shared_between_features_load_once() -> Result<()> {
    struct Counting(Rc<Cell<usize>>);

    impl ResourceFactory for Counting {
        fn load(&self, _: &ResourceKey) -> Result<Resource, FeatureError> {
            self.0.set(self.0.get() + 1);
            Ok(lexical_database())
        }
    }

    let loads = Rc::new(Cell::new(0));
    let mut estimator = FeatureEstimator::new(Counting(loads.clone()));
    estimator
        .add_feature(&senses(), Orientation::Simplicity)?
        .add_feature(
            &FeatureSpec::MinDepth { database: "wordnet".into() },
            Orientation::Complexity,
        )?
        .add_feature(&senses(), Orientation::Simplicity)?;

    assert_eq!(loads.get(), 1);
    assert_eq!(estimator.width(), 3);
    Ok(())
}

#[test]
fn invalid_orientation_is_a_configuration_error() {
    assert!(matches!(
        "Simpler".parse::<Orientation>(),
        Err(FeatureError::Configuration(_))
    ));
}

#[test]
fn plan_file_builds_an_estimator_over_resource_files() -> Result<()> {
    let mut lexicon = tempfile::NamedTempFile::new()?;
    writeln!(lexicon, "sat\nfast")?;
    let mut plan = tempfile::NamedTempFile::new()?;
    write!(
        plan,
        r#"{{"features": [{{"orientation": "Simplicity",
              "feature": {{"kind": "lexicon", "lexicon": "{}"}}}}]}}"#,
        lexicon.path().display()
    )?;

    let config = EstimatorConfig::from_path(plan.path())?;
    let estimator = FeatureEstimator::from_config(&config, FileResourceFactory::new())?;

    let instances = parse_corpus(CORPUS, CorpusFormat::Victor)?;
    let values: Vec<f64> = estimator.compute_batch(&instances)?.column(0).collect();
    assert_eq!(values, vec![1.0, 0.0, 0.0, 1.0, 0.0]);
    Ok(())
}

#[test]
fn single_candidate_matches_its_batch_row() -> Result<()> {
    let mut estimator = estimator();
    estimator.add_feature(
        &FeatureSpec::PopCollocational {
            language_model: "lm".into(),
            left: 1,
            right: 0,
        },
        Orientation::Simplicity,
    )?;

    let instances = parse_corpus(CORPUS, CorpusFormat::Victor)?;
    let matrix = estimator.compute_batch(&instances)?;
    let single = estimator.compute_single("the cat perched on the mat", "perched", 2, "sat")?;
    assert_eq!(Some(single.as_slice()), matrix.row(0));
    Ok(())
}

/// Splits every word into two-letter syllables.
struct Pairs;

impl Syllabifier for Pairs {
    fn split_syllables(&self, surfaces: &[&str]) -> Result<Vec<String>, FeatureError> {
        Ok(surfaces
            .iter()
            .map(|surface| {
                surface
                    .split_whitespace()
                    .map(|word| {
                        let chars: Vec<char> = word.chars().collect();
                        chars
                            .chunks(2)
                            .map(|pair| pair.iter().collect::<String>())
                            .collect::<Vec<_>>()
                            .join("-")
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect())
    }
}

#[test]
fn syllable_count_comes_from_the_registered_syllabifier() -> Result<()> {
    let mut estimator = estimator();
    estimator.register("pairs", Resource::Syllabifier(Arc::new(Pairs)));
    estimator.add_feature(
        &FeatureSpec::SyllableCount {
            syllabifier: "pairs".into(),
        },
        Orientation::Complexity,
    )?;
    assert_eq!(estimator.identifiers(), vec!["Syllable Count"]);

    let instances = parse_corpus(CORPUS, CorpusFormat::Victor)?;
    let counts: Vec<f64> = estimator.compute_batch(&instances)?.column(0).collect();
    assert_eq!(counts, vec![2.0, 4.0, 6.0, 2.0, 4.0]);
    Ok(())
}

#[test]
fn hand_built_instance_with_bad_head_is_an_error() -> Result<()> {
    let mut estimator = estimator();
    estimator.add_feature(
        &FeatureSpec::Collocational {
            language_model: "lm".into(),
            left: 1,
            right: 1,
        },
        Orientation::Simplicity,
    )?;

    let instances = vec![Instance {
        sentence: vec!["a".to_string()],
        target: "a".to_string(),
        head: 3,
        candidates: vec![Candidate::new(1, "b")],
    }];
    let result = estimator.compute_batch(&instances);
    assert!(matches!(
        result,
        Err(FeatureError::Corpus(CorpusError::HeadOutOfRange { head: 3, tokens: 1 }))
    ));
    Ok(())
}

proptest! {
    #[test]
    fn row_count_is_candidate_count(
        lines in prop::collection::vec((1usize..6, 1usize..5), 1..6),
    ) {
        let corpus: String = lines
            .iter()
            .map(|(words, candidates)| {
                let sentence: Vec<String> = (0..*words).map(|i| format!("w{i}")).collect();
                let candidates: Vec<String> =
                    (0..*candidates).map(|i| format!("{}:c{i}", i + 1)).collect();
                format!("{}\tw0\t0\t{}\n", sentence.join(" "), candidates.join("\t"))
            })
            .collect();
        let instances = parse_corpus(&corpus, CorpusFormat::Victor).unwrap();

        let mut estimator = estimator();
        let counts = [("w0", 3.0)].into_iter().collect();
        estimator.register("counts", Resource::NgramCounts(Arc::new(counts)));
        estimator
            .add_feature(&FeatureSpec::Length, Orientation::Complexity)
            .unwrap()
            .add_feature(
                &FeatureSpec::FrequencyCollocational { ngrams: "counts".into(), left: 2, right: 1 },
                Orientation::Simplicity,
            )
            .unwrap();

        let matrix = estimator.compute_batch(&instances).unwrap();
        let expected: usize = lines.iter().map(|(_, candidates)| candidates).sum();
        prop_assert_eq!(matrix.len(), expected);
        prop_assert!(matrix.rows().iter().all(|row| row.len() == estimator.width()));
    }
}
