use sched_core::{EngineError, Solver};
use solver_ga::{evolve, GaSolver};
use types::*;

fn teacher(id: &str) -> Teacher {
    Teacher {
        id: id.into(),
        name: format!("Teacher {id}"),
        short: id.into(),
        max_per_day: None,
    }
}

fn small_department() -> Instance {
    Instance {
        teachers: vec![teacher("T1"), teacher("T2")],
        subjects: vec![
            Subject {
                id: "MATH".into(),
                name: "Mathematics".into(),
                code: "MA101".into(),
                is_lab: Some(false),
            },
            Subject {
                id: "PHY-L".into(),
                name: "Physics Practical".into(),
                code: "PH101P".into(),
                is_lab: Some(true),
            },
        ],
        rooms: vec![
            Room {
                id: "R101".into(),
                name: "Room 101".into(),
                kind: RoomKind::Class,
            },
            Room {
                id: "LAB1".into(),
                name: "Physics Lab".into(),
                kind: RoomKind::Lab,
            },
        ],
        branches: vec![Branch {
            id: "CSE-1".into(),
            name: "CSE first year".into(),
            semester: Some(1),
            section: None,
        }],
        calendar: Calendar::default(),
        policy: Policy::default(),
    }
}

fn params() -> SolveParams {
    SolveParams {
        population_size: 10,
        generations: 20,
        seed: 2024,
        ..SolveParams::default()
    }
}

#[test]
fn small_department_gets_one_session_per_subject() {
    let inst = small_department();
    let run = evolve(&inst, &params()).unwrap();

    assert_eq!(run.best.genes.len(), 2);
    assert_eq!(run.generations_run, 20);

    let lab = run
        .best
        .genes
        .iter()
        .find(|g| g.subject_id.0 == "PHY-L")
        .unwrap();
    assert_eq!(lab.span, Span::Double);
    assert_eq!(lab.room_id.0, "LAB1");
    let periods: Vec<u8> = lab.periods().collect();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[1], periods[0] + 1);
    assert!(periods.iter().all(|&p| !inst.calendar.is_lunch(p)));
    assert!(periods.iter().all(|&p| p < inst.calendar.periods));

    let lecture = run
        .best
        .genes
        .iter()
        .find(|g| g.subject_id.0 == "MATH")
        .unwrap();
    assert_eq!(lecture.span, Span::Single);
    assert_eq!(lecture.room_id.0, "R101");
}

#[test]
fn small_department_fitness_matches_its_breakdown() {
    let inst = small_department();
    let res = GaSolver::new().solve(&inst, &params()).unwrap();
    assert_eq!(res.fitness, res.scores.total);
    // Two sessions in different rooms can only clash on a shared teacher.
    assert_eq!(res.scores.room_clashes, 0);
    assert_eq!(res.scores.missing_subjects, 0);
}

#[test]
fn lab_subject_without_lab_room_is_rejected() {
    let mut inst = small_department();
    inst.rooms.retain(|r| r.kind == RoomKind::Class);
    let err = evolve(&inst, &params()).unwrap_err();
    assert_eq!(
        err,
        EngineError::NoRoomAvailable {
            subject: "PHY-L".into(),
            kind: RoomKind::Lab,
        }
    );
}

#[test]
fn same_seed_gives_the_same_timetable() {
    let inst = small_department();
    let a = GaSolver::new().solve(&inst, &params()).unwrap();
    let b = GaSolver::new().solve(&inst, &params()).unwrap();
    assert_eq!(a.genes, b.genes);
    assert_eq!(a.fitness, b.fitness);
}

#[test]
fn params_and_instance_read_from_json() {
    let inst: Instance = serde_json::from_str(
        r#"{
            "teachers": [{ "id": "T1", "name": "Ada", "short": "AD" }],
            "subjects": [
                { "id": "S1", "name": "Algorithms", "code": "CS201" },
                { "id": "S2", "name": "Networks Lab", "code": "CS202L" }
            ],
            "rooms": [
                { "id": "R1", "name": "Hall", "type": "CLASS" },
                { "id": "L1", "name": "Net Lab", "type": "LAB" }
            ],
            "branches": [{ "id": "B1", "name": "CSE 2A" }]
        }"#,
    )
    .unwrap();
    let params: SolveParams =
        serde_json::from_str(r#"{ "populationSize": 6, "generations": 4, "seed": 1 }"#).unwrap();

    let res = GaSolver::new().solve(&inst, &params).unwrap();
    assert_eq!(res.genes.len(), 2);
    let lab = res.genes.iter().find(|g| g.subject_id.0 == "S2").unwrap();
    assert_eq!(lab.span, Span::Double);
    assert_eq!(lab.room_id.0, "L1");
}
