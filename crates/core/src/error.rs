use thiserror::Error;
use types::{RoomKind, SubjectId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("insufficient input data: no {what} supplied")]
    InsufficientInputData { what: &'static str },
    #[error("no {kind} room available for subject {subject}")]
    NoRoomAvailable { subject: SubjectId, kind: RoomKind },
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
    #[error("invalid solve params: {0}")]
    InvalidParams(String),
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}
