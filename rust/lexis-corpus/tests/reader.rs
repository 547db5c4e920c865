use anyhow::Result;
use lexis_corpus::{CorpusError, CorpusFormat, candidate_count, parse_corpus, read_corpus};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;

const CORPUS: &str = "\
the cat perched on the mat\tperched\t2\t1:sat\t2:roosted
a rapid decline followed\trapid\t1\t2:quick\t1:fast\t3:speedy
";

#[test]
fn reads_corpus_file_in_order() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(CORPUS.as_bytes())?;

    let instances = read_corpus(file.path(), "victor".parse()?)?;

    assert_eq!(instances.len(), 2);
    assert_eq!(candidate_count(&instances), 5);
    let surfaces: Vec<_> = instances
        .iter()
        .flat_map(|i| i.candidates.iter().map(|c| c.surface.as_str()))
        .collect();
    assert_eq!(surfaces, vec!["sat", "roosted", "quick", "fast", "speedy"]);
    Ok(())
}

#[test]
fn complexity_label_corpus_has_one_candidate_per_line() -> Result<()> {
    let instances = parse_corpus(
        "a rapid decline\trapid\t1\t1\nthe end\tend\t1\t0\n",
        CorpusFormat::Cwictor,
    )?;
    assert_eq!(candidate_count(&instances), 2);
    assert_eq!(instances[1].candidates[0].surface, "end");
    assert_eq!(instances[1].candidates[0].gold_rank, None);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = read_corpus("/definitely/not/here.txt", CorpusFormat::Victor);
    assert!(matches!(result, Err(CorpusError::Io(_))));
}

proptest! {
    #[test]
    fn candidate_count_matches_fields(
        ranks in prop::collection::vec(1u32..10, 1..8),
        head in 0usize..4,
    ) {
        let candidates: Vec<String> = ranks
            .iter()
            .enumerate()
            .map(|(i, rank)| format!("{rank}:word{i}"))
            .collect();
        let line = format!("w0 w1 w2 w3\tw{head}\t{head}\t{}", candidates.join("\t"));

        let instances = parse_corpus(&line, CorpusFormat::Victor).unwrap();

        prop_assert_eq!(instances.len(), 1);
        prop_assert_eq!(instances[0].candidates.len(), ranks.len());
        prop_assert_eq!(instances[0].head_word(), format!("w{head}"));
    }
}
