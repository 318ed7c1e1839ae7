use sched_core::{validate, EngineError};
use serde::Serialize;
use types::Instance;

#[derive(Debug, Serialize, PartialEq)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
}

pub fn run(inst: &Instance) -> ValidationReport {
    match validate(inst) {
        Ok(()) => ValidationReport {
            ok: true,
            errors: vec![],
        },
        Err(EngineError::InvalidInstance(msg)) => ValidationReport {
            ok: false,
            errors: msg
                .split(';')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        },
        Err(other) => ValidationReport {
            ok: false,
            errors: vec![other.to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Instance {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn splits_collected_problems() {
        let inst = parse(
            r#"{
                "teachers": [{ "id": "T1", "name": "A", "short": "A" },
                             { "id": "T1", "name": "B", "short": "B" }],
                "subjects": [{ "id": "S1", "name": "Maths", "code": "M1" }],
                "rooms": [{ "id": "R1", "name": "Hall", "type": "CLASS" }],
                "branches": [{ "id": "B1", "name": "CSE" }],
                "calendar": { "days": ["mon"], "periods": 4, "lunch": 9 }
            }"#,
        );
        let report = run(&inst);
        assert!(!report.ok);
        assert_eq!(
            report.errors,
            vec![
                "duplicate teacher id: T1".to_string(),
                "lunch period 9 is outside 0..4".to_string(),
            ]
        );
    }

    #[test]
    fn empty_list_is_reported_alone() {
        let inst = parse(r#"{ "teachers": [], "subjects": [], "rooms": [], "branches": [] }"#);
        let report = run(&inst);
        assert!(!report.ok);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("teachers"));
    }
}
