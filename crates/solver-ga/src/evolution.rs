use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sched_core::{validate, validate_params, EngineError};
use tracing::{debug, info, warn};
use types::{Individual, Instance, SolveParams};

use crate::init::random_individual;
use crate::operators::{crossover, mutate};
use crate::Problem;

/// Outcome of one search.
#[derive(Clone, Debug)]
pub struct Evolution {
    /// Best individual seen in any generation.
    pub best: Individual,
    pub generations_run: usize,
    /// Tracked best fitness after each completed generation.
    pub history: Vec<u64>,
    pub timed_out: bool,
}

/// Validates the input and runs the search with a `ChaCha8Rng` seeded from `params.seed`.
pub fn evolve(inst: &Instance, params: &SolveParams) -> Result<Evolution, EngineError> {
    validate(inst)?;
    let problem = Problem::new(inst);
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    evolve_with(&problem, params, &mut rng)
}

/// Runs the generational loop on a problem built from a validated instance.
///
/// Every generation draws one seed per child from `rng`, then breeds the children
/// independently (in parallel when `params.parallel`), so the result depends only on
/// the generator and never on thread scheduling. The best individual is tracked outside
/// the population and replaced only on strict improvement.
pub fn evolve_with<R: Rng + ?Sized>(
    problem: &Problem<'_>,
    params: &SolveParams,
    rng: &mut R,
) -> Result<Evolution, EngineError> {
    validate_params(params)?;
    let started = Instant::now();
    let limit = params.time_limit_sec.map(Duration::from_secs);
    let size = params.population_size;
    let rate = params.mutation_rate;

    let ceiling = problem.evaluator.soft_ceiling();
    let min_hard = problem.evaluator.weights().min_hard();
    if ceiling >= min_hard {
        warn!(
            ceiling,
            min_hard,
            "soft penalties can outweigh a hard violation for this instance"
        );
    }

    let mut population = (0..size)
        .map(|_| random_individual(problem, rng))
        .collect::<Result<Vec<_>, _>>()?;
    population.sort_by_key(|ind| ind.fitness);
    let mut best = population[0].clone();
    info!(
        fitness = best.fitness,
        size,
        genes = best.genes.len(),
        seed = params.seed,
        "initial population built"
    );

    let mut history = Vec::with_capacity(params.generations);
    let mut timed_out = false;

    for generation in 0..params.generations {
        if limit.is_some_and(|l| started.elapsed() >= l) {
            warn!(generation, "time limit reached, returning best so far");
            timed_out = true;
            break;
        }

        let seeds: Vec<u64> = (0..size).map(|_| rng.gen()).collect();
        let current = &population;
        let breed = |seed: u64| {
            let mut r = ChaCha8Rng::seed_from_u64(seed);
            let a = &current[r.gen_range(0..current.len())];
            let b = &current[r.gen_range(0..current.len())];
            let child = crossover(a, b, problem, &mut r);
            mutate(&child, rate, problem, &mut r)
        };
        let mut next: Vec<Individual> = if params.parallel {
            seeds.into_par_iter().map(&breed).collect()
        } else {
            seeds.into_iter().map(&breed).collect()
        };
        next.sort_by_key(|ind| ind.fitness);
        population = next;

        if population[0].fitness < best.fitness {
            best = population[0].clone();
            debug!(generation, fitness = best.fitness, "new best");
        }
        history.push(best.fitness);
    }

    info!(
        fitness = best.fitness,
        generations = history.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search finished"
    );
    Ok(Evolution {
        best,
        generations_run: history.len(),
        history,
        timed_out,
    })
}
