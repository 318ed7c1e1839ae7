use sched_core::scoring::Evaluator;
use sched_core::{validate, validate_genes, EngineError};
use serde::Serialize;
use types::{Gene, Instance, Scores, Weights};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub fitness: u64,
    pub weights: Weights,
    pub scores: Scores,
}

/// Penalty breakdown for a gene list produced elsewhere, e.g. after manual edits.
pub fn run(inst: &Instance, genes: &[Gene]) -> Result<Explanation, EngineError> {
    validate(inst)?;
    validate_genes(inst, genes)?;
    let scores = Evaluator::new(inst).scores(genes);
    Ok(Explanation {
        fitness: scores.total,
        weights: inst.policy.weights.clone(),
        scores,
    })
}
