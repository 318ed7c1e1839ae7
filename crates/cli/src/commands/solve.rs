use std::path::Path;

use anyhow::{Context, Result};
use sched_core::Solver;
use solver_ga::GaSolver;
use tracing::info;
use types::{Instance, SolveResult};

use crate::config::{self, Overrides};

pub fn run(instance: &Path, params: Option<&Path>, flags: &Overrides) -> Result<SolveResult> {
    let inst: Instance = config::read_json(instance)?;
    let params = config::load(params, flags)?;
    info!(
        teachers = inst.teachers.len(),
        subjects = inst.subjects.len(),
        rooms = inst.rooms.len(),
        branches = inst.branches.len(),
        seed = params.seed,
        "solving"
    );
    GaSolver::new()
        .solve(&inst, &params)
        .with_context(|| format!("solving {}", instance.display()))
}
