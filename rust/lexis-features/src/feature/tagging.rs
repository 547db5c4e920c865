//! Features that depend on the part-of-speech tag of the target.

use std::sync::Arc;

use crate::batch::Batch;
use crate::error::FeatureError;
use crate::model::{PosTagger, TagConditional};
use crate::resource::ResourceKey;
use crate::tags::TagSet;
use crate::value::FeatureValue;

use super::Feature;

/// P(tag of the head token | candidate), using the tagger's own tags.
/// Unseen (candidate, tag) pairs score 0.
pub struct TargetPosTagProbability {
    id: String,
    table: Arc<TagConditional>,
    tagger_key: ResourceKey,
    tagger: Arc<dyn PosTagger>,
}

impl TargetPosTagProbability {
    pub fn new(
        id: impl Into<String>,
        table: Arc<TagConditional>,
        tagger_key: ResourceKey,
        tagger: Arc<dyn PosTagger>,
    ) -> Self {
        TargetPosTagProbability {
            id: id.into(),
            table,
            tagger_key,
            tagger,
        }
    }
}

impl Feature for TargetPosTagProbability {
    fn columns(&self) -> Vec<String> {
        vec![format!("Target POS Tag Probability (Model: {})", self.id)]
    }

    fn compute(&self, batch: &mut Batch<'_>) -> Result<Vec<FeatureValue>, FeatureError> {
        let tags = batch.tags(&self.tagger_key, self.tagger.as_ref(), TagSet::Treebank)?;
        let mut values = Vec::with_capacity(batch.candidate_count());
        for (index, instance) in batch.instances().iter().enumerate() {
            let tag = &tags[index][instance.head];
            values.extend(instance.candidates.iter().map(|candidate| {
                FeatureValue::Scalar(self.table.probability(&candidate.surface, tag))
            }));
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LexiconTagger;
    use crate::resource::ResourceKind;
    use lexis_corpus::{CorpusFormat, parse_corpus};
    use pretty_assertions::assert_eq;

    #[test]
    fn probability_of_the_head_tag() {
        let instances = parse_corpus(
            "they ran fast\tfast\t2\t1:quickly\t2:rapid",
            CorpusFormat::Victor,
        )
        .unwrap();
        let mut table = TagConditional::new();
        table.insert("quickly", "RB", 0.9);
        table.insert("rapid", "JJ", 0.8);

        let feature = TargetPosTagProbability::new(
            "condprob.txt",
            Arc::new(table),
            ResourceKey::new(ResourceKind::Tagger, "lexicon"),
            Arc::new(LexiconTagger::new("NN").with_tag("fast", "RB")),
        );
        let values = feature.compute(&mut Batch::new(&instances).unwrap()).unwrap();
        assert_eq!(values, vec![FeatureValue::Scalar(0.9), FeatureValue::Scalar(0.0)]);
    }
}
