use rand::seq::SliceRandom;
use rand::Rng;
use types::Individual;

use crate::Problem;

/// Returns a rescored copy where each gene, with probability `rate`, moves to a random
/// day and a random legal start period. Teacher and room are kept.
pub fn mutate<R: Rng + ?Sized>(
    ind: &Individual,
    rate: f64,
    problem: &Problem<'_>,
    rng: &mut R,
) -> Individual {
    let cal = problem.catalog.calendar();
    let mut genes = ind.genes.clone();
    for g in &mut genes {
        if rng.gen::<f64>() < rate {
            if let Some(&day) = cal.days.choose(rng) {
                g.day = day;
            }
            if let Some(&period) = problem.catalog.starts(g.span).choose(rng) {
                g.period = period;
            }
        }
    }
    problem.score(genes)
}

/// Uniform crossover: every position comes from either parent with equal probability.
///
/// Both parents must come from the same instance, so position `i` holds the same
/// (branch, subject) pair in each.
pub fn crossover<R: Rng + ?Sized>(
    a: &Individual,
    b: &Individual,
    problem: &Problem<'_>,
    rng: &mut R,
) -> Individual {
    debug_assert_eq!(a.genes.len(), b.genes.len(), "parents differ in length");
    let genes = a
        .genes
        .iter()
        .zip(&b.genes)
        .map(|(ga, gb)| (if rng.gen_bool(0.5) { ga } else { gb }).clone())
        .collect();
    problem.score(genes)
}
