use rand::seq::SliceRandom;
use rand::Rng;
use sched_core::EngineError;
use types::{Gene, Individual};

use crate::Problem;

/// Builds one candidate with a gene for every (branch, subject) pair, in input order.
///
/// Teacher, room, day and start period are drawn uniformly; the room always matches the
/// subject's lab-ness and the start period never touches lunch. Clashes are left for the
/// search to remove.
pub fn random_individual<R: Rng + ?Sized>(
    problem: &Problem<'_>,
    rng: &mut R,
) -> Result<Individual, EngineError> {
    let inst = problem.catalog.instance();
    let cal = problem.catalog.calendar();
    let mut genes = Vec::with_capacity(inst.branches.len() * inst.subjects.len());

    for branch in &inst.branches {
        for subject in &inst.subjects {
            let teacher = inst
                .teachers
                .choose(rng)
                .ok_or(EngineError::InsufficientInputData { what: "teachers" })?;
            let room = problem
                .catalog
                .rooms_for(subject)?
                .choose(rng)
                .ok_or_else(|| EngineError::NoRoomAvailable {
                    subject: subject.id.clone(),
                    kind: subject.room_kind(),
                })?;
            let day = *cal
                .days
                .choose(rng)
                .ok_or_else(|| EngineError::InvalidInstance("calendar has no days".into()))?;
            let span = subject.span();
            let period = *problem.catalog.starts(span).choose(rng).ok_or_else(|| {
                EngineError::InvalidInstance(format!(
                    "no start period fits a {}-period session",
                    span.count()
                ))
            })?;

            genes.push(Gene {
                branch_id: branch.id.clone(),
                subject_id: subject.id.clone(),
                teacher_id: teacher.id.clone(),
                room_id: room.id.clone(),
                day,
                period,
                span,
            });
        }
    }

    Ok(problem.score(genes))
}
