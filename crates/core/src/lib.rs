pub mod catalog;
pub mod edit;
pub mod error;
pub mod scoring;

use std::collections::HashSet;

use tracing::debug;

pub use catalog::Catalog;
pub use error::EngineError;
pub use types::{
    Branch, Calendar, Gene, Individual, Instance, Room, RoomKind, Scores, SolveParams,
    SolveResult, Span, Subject, Teacher,
};

/// Checks the reference data before a run. Empty lists are reported on their own;
/// every other problem is collected into a single `InvalidInstance` message.
pub fn validate(inst: &Instance) -> Result<(), EngineError> {
    if inst.teachers.is_empty() {
        return Err(EngineError::InsufficientInputData { what: "teachers" });
    }
    if inst.subjects.is_empty() {
        return Err(EngineError::InsufficientInputData { what: "subjects" });
    }
    if inst.rooms.is_empty() {
        return Err(EngineError::InsufficientInputData { what: "rooms" });
    }
    if inst.branches.is_empty() {
        return Err(EngineError::InsufficientInputData { what: "branches" });
    }

    let mut errors: Vec<String> = Vec::new();

    fn chk_unique<I: ToString>(name: &str, ids: impl Iterator<Item = I>, errors: &mut Vec<String>) {
        let mut seen = HashSet::new();
        for id in ids {
            let s = id.to_string();
            if !seen.insert(s.clone()) {
                errors.push(format!("duplicate {name} id: {s}"));
            }
        }
    }
    chk_unique("teacher", inst.teachers.iter().map(|x| &x.id), &mut errors);
    chk_unique("subject", inst.subjects.iter().map(|x| &x.id), &mut errors);
    chk_unique("room", inst.rooms.iter().map(|x| &x.id), &mut errors);
    chk_unique("branch", inst.branches.iter().map(|x| &x.id), &mut errors);

    let cal = &inst.calendar;
    if cal.days.is_empty() {
        errors.push("calendar has no days".into());
    }
    chk_unique("calendar day", cal.days.iter(), &mut errors);
    if cal.periods == 0 {
        errors.push("calendar has no periods".into());
    }
    if let Some(lunch) = cal.lunch {
        if lunch >= cal.periods {
            errors.push(format!(
                "lunch period {lunch} is outside 0..{}",
                cal.periods
            ));
        }
    }
    if cal.periods > 0 {
        for span in [Span::Single, Span::Double] {
            let needed = inst.subjects.iter().any(|s| s.span() == span);
            if needed && cal.starts(span).is_empty() {
                errors.push(format!(
                    "no start period fits a {}-period session",
                    span.count()
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(problems = errors.len(), "instance rejected");
        Err(EngineError::InvalidInstance(errors.join("; ")))
    }
}

pub fn validate_params(params: &SolveParams) -> Result<(), EngineError> {
    if params.population_size == 0 {
        return Err(EngineError::InvalidParams(
            "populationSize must be greater than zero".into(),
        ));
    }
    if !(0.0..=1.0).contains(&params.mutation_rate) {
        return Err(EngineError::InvalidParams(format!(
            "mutationRate {} is outside [0, 1]",
            params.mutation_rate
        )));
    }
    Ok(())
}

/// Checks a gene list produced outside the engine against `inst` before it is scored.
///
/// Every gene must name known ids, sit in a room of its subject's kind, and occupy periods
/// inside the day and off lunch. A lab always occupies two periods, whatever its `span`
/// says. All problems are reported in one `InvalidSchedule` message.
pub fn validate_genes(inst: &Instance, genes: &[Gene]) -> Result<(), EngineError> {
    let cat = Catalog::new(inst);
    let cal = cat.calendar();
    let mut errors: Vec<String> = Vec::new();

    for (i, g) in genes.iter().enumerate() {
        if cat.branch(&g.branch_id).is_none() {
            errors.push(format!("gene {i}: unknown branch {}", g.branch_id));
        }
        if cat.teacher(&g.teacher_id).is_none() {
            errors.push(format!("gene {i}: unknown teacher {}", g.teacher_id));
        }
        match (cat.subject(&g.subject_id), cat.room(&g.room_id)) {
            (None, _) => errors.push(format!("gene {i}: unknown subject {}", g.subject_id)),
            (Some(_), None) => errors.push(format!("gene {i}: unknown room {}", g.room_id)),
            (Some(subject), Some(room)) if !room.hosts(subject) => errors.push(format!(
                "gene {i}: {} room {} cannot host {}",
                room.kind, room.id, subject.id
            )),
            _ => {}
        }
        if !cal.has_day(g.day) {
            errors.push(format!("gene {i}: {} is not a working day", g.day));
        }

        let len: u16 = if cat.is_lab(&g.subject_id) { 2 } else { 1 };
        let end = u16::from(g.period) + len;
        if end > u16::from(cal.periods) {
            errors.push(format!(
                "gene {i}: periods {}..{end} run past the {}-period day",
                g.period, cal.periods
            ));
        } else if (g.period..end as u8).any(|p| cal.is_lunch(p)) {
            errors.push(format!("gene {i}: {}.{} covers lunch", g.day, g.period));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(EngineError::InvalidSchedule(errors.join("; ")))
    }
}

pub trait Solver: Send + Sync + 'static {
    fn solve(&self, inst: &Instance, params: &SolveParams) -> Result<SolveResult, EngineError>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use types::*;

    pub fn teacher(id: &str) -> Teacher {
        Teacher {
            id: TeacherId::from(id),
            name: format!("Teacher {id}"),
            short: id.to_lowercase(),
            max_per_day: None,
        }
    }

    pub fn subject(id: &str, is_lab: bool) -> Subject {
        Subject {
            id: SubjectId::from(id),
            name: format!("Subject {id}"),
            code: id.into(),
            is_lab: Some(is_lab),
        }
    }

    pub fn room(id: &str, kind: RoomKind) -> Room {
        Room {
            id: RoomId::from(id),
            name: id.into(),
            kind,
        }
    }

    pub fn branch(id: &str) -> Branch {
        Branch {
            id: BranchId::from(id),
            name: id.into(),
            semester: Some(3),
            section: Some("A".into()),
        }
    }

    /// Two branches, four lectures, two labs, as in a typical third semester.
    pub fn instance() -> Instance {
        Instance {
            teachers: vec![teacher("T1"), teacher("T2"), teacher("T3"), teacher("T4")],
            subjects: vec![
                subject("S1", false),
                subject("S2", false),
                subject("S3", false),
                subject("S4", false),
                subject("S5", true),
                subject("S6", true),
            ],
            rooms: vec![
                room("R1", RoomKind::Class),
                room("R2", RoomKind::Class),
                room("L1", RoomKind::Lab),
                room("L2", RoomKind::Lab),
            ],
            branches: vec![branch("C1"), branch("C2")],
            calendar: Calendar::default(),
            policy: Policy::default(),
        }
    }

    pub fn gene(
        branch: &str,
        subject: &str,
        teacher: &str,
        room: &str,
        day: DayOfWeek,
        period: u8,
        span: Span,
    ) -> Gene {
        Gene {
            branch_id: BranchId::from(branch),
            subject_id: SubjectId::from(subject),
            teacher_id: TeacherId::from(teacher),
            room_id: RoomId::from(room),
            day,
            period,
            span,
        }
    }
}
