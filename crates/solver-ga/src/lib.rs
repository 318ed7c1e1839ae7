pub mod evolution;
pub mod init;
pub mod operators;

use std::time::Instant;

use sched_core::scoring::Evaluator;
use sched_core::{Catalog, EngineError, Solver};
use serde_json::json;
use tracing::info;
use types::{Gene, Individual, Instance, SolveParams, SolveResult};

pub use evolution::{evolve, evolve_with, Evolution};

/// Lookups and the penalty function for one instance, shared read-only by every
/// worker during a run.
pub struct Problem<'a> {
    pub catalog: Catalog<'a>,
    pub evaluator: Evaluator<'a>,
}

impl<'a> Problem<'a> {
    pub fn new(inst: &'a Instance) -> Self {
        Self {
            catalog: Catalog::new(inst),
            evaluator: Evaluator::new(inst),
        }
    }

    pub fn score(&self, genes: Vec<Gene>) -> Individual {
        let fitness = self.evaluator.fitness(&genes);
        Individual { genes, fitness }
    }
}

pub struct GaSolver;

impl GaSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GaSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for GaSolver {
    fn solve(&self, inst: &Instance, params: &SolveParams) -> Result<SolveResult, EngineError> {
        let started = Instant::now();
        let run = evolve(inst, params)?;
        let scores = Evaluator::new(inst).scores(&run.best.genes);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            fitness = run.best.fitness,
            hard = scores.hard,
            soft = scores.soft,
            elapsed_ms,
            "timetable solved"
        );

        Ok(SolveResult {
            fitness: run.best.fitness,
            genes: run.best.genes,
            scores,
            stats: json!({
                "generations": run.generations_run,
                "population": params.population_size,
                "seed": params.seed,
                "timedOut": run.timed_out,
                "elapsedMs": elapsed_ms,
            }),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use types::*;

    pub fn seeded(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn teacher(id: &str, name: &str, short: &str) -> Teacher {
        Teacher {
            id: id.into(),
            name: name.into(),
            short: short.into(),
            max_per_day: Some(4),
        }
    }

    fn subject(id: &str, name: &str, code: &str) -> Subject {
        Subject {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            is_lab: None,
        }
    }

    fn room(id: &str, name: &str, kind: RoomKind) -> Room {
        Room {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    fn branch(id: &str, name: &str) -> Branch {
        Branch {
            id: id.into(),
            name: name.into(),
            semester: Some(3),
            section: Some("A".into()),
        }
    }

    /// A small engineering department: two sections sharing four teachers,
    /// four lectures and two labs named as such.
    pub fn institute() -> Instance {
        Instance {
            teachers: vec![
                teacher("T1", "Dr. A. Rao", "AR"),
                teacher("T2", "Prof. S. Iyer", "SI"),
                teacher("T3", "Dr. M. Khan", "MK"),
                teacher("T4", "Prof. L. Das", "LD"),
            ],
            subjects: vec![
                subject("S1", "Mathematics III", "MA301"),
                subject("S2", "Digital Electronics", "EC302"),
                subject("S3", "Data Structures", "CS303"),
                subject("S4", "Computer Organization", "CS304"),
                subject("S5", "Microprocessor Lab", "EC305L"),
                subject("S6", "DSA Lab", "CS306L"),
            ],
            rooms: vec![
                room("R1", "Room 101", RoomKind::Class),
                room("R2", "Room 102", RoomKind::Class),
                room("L1", "Electronics Lab", RoomKind::Lab),
                room("L2", "Computer Lab", RoomKind::Lab),
            ],
            branches: vec![branch("C1", "CSE 3A"), branch("C2", "ECE 3A")],
            calendar: Calendar::default(),
            policy: Policy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::institute;
    use super::*;

    #[test]
    fn solve_reports_scores_and_stats() {
        let inst = institute();
        let params = SolveParams {
            population_size: 10,
            generations: 8,
            seed: 3,
            ..SolveParams::default()
        };
        let res = GaSolver::new().solve(&inst, &params).unwrap();

        assert_eq!(res.genes.len(), 12);
        assert_eq!(res.fitness, res.scores.total);
        assert_eq!(res.stats["generations"], 8);
        assert_eq!(res.stats["population"], 10);
        assert_eq!(res.stats["seed"], 3);
        assert_eq!(res.stats["timedOut"], false);
        assert!(res.stats["elapsedMs"].is_u64());
    }

    #[test]
    fn solve_propagates_engine_errors() {
        let mut inst = institute();
        inst.branches.clear();
        let err = GaSolver::new()
            .solve(&inst, &SolveParams::default())
            .unwrap_err();
        assert_eq!(err, EngineError::InsufficientInputData { what: "branches" });
    }
}
