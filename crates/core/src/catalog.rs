use std::collections::HashMap;

use types::{
    Branch, BranchId, Calendar, Instance, Room, RoomId, RoomKind, Span, Subject, SubjectId,
    Teacher, TeacherId,
};

use crate::EngineError;

/// Read-only id lookups over one instance, built once per run.
pub struct Catalog<'a> {
    inst: &'a Instance,
    teachers: HashMap<&'a str, &'a Teacher>,
    subjects: HashMap<&'a str, &'a Subject>,
    rooms: HashMap<&'a str, &'a Room>,
    branches: HashMap<&'a str, &'a Branch>,
    class_rooms: Vec<&'a Room>,
    lab_rooms: Vec<&'a Room>,
    single_starts: Vec<u8>,
    double_starts: Vec<u8>,
}

impl<'a> Catalog<'a> {
    pub fn new(inst: &'a Instance) -> Self {
        let (lab_rooms, class_rooms): (Vec<&Room>, Vec<&Room>) =
            inst.rooms.iter().partition(|r| r.kind == RoomKind::Lab);
        Self {
            inst,
            teachers: inst.teachers.iter().map(|t| (t.id.0.as_str(), t)).collect(),
            subjects: inst.subjects.iter().map(|s| (s.id.0.as_str(), s)).collect(),
            rooms: inst.rooms.iter().map(|r| (r.id.0.as_str(), r)).collect(),
            branches: inst.branches.iter().map(|b| (b.id.0.as_str(), b)).collect(),
            class_rooms,
            lab_rooms,
            single_starts: inst.calendar.starts(Span::Single),
            double_starts: inst.calendar.starts(Span::Double),
        }
    }

    pub fn instance(&self) -> &'a Instance {
        self.inst
    }

    pub fn calendar(&self) -> &'a Calendar {
        &self.inst.calendar
    }

    pub fn teacher(&self, id: &TeacherId) -> Option<&'a Teacher> {
        self.teachers.get(id.0.as_str()).copied()
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&'a Subject> {
        self.subjects.get(id.0.as_str()).copied()
    }

    pub fn room(&self, id: &RoomId) -> Option<&'a Room> {
        self.rooms.get(id.0.as_str()).copied()
    }

    pub fn branch(&self, id: &BranchId) -> Option<&'a Branch> {
        self.branches.get(id.0.as_str()).copied()
    }

    pub fn rooms_of(&self, kind: RoomKind) -> &[&'a Room] {
        match kind {
            RoomKind::Class => &self.class_rooms,
            RoomKind::Lab => &self.lab_rooms,
        }
    }

    /// Rooms able to host `subject`; an empty list is a `NoRoomAvailable` error.
    pub fn rooms_for(&self, subject: &Subject) -> Result<&[&'a Room], EngineError> {
        let kind = subject.room_kind();
        let rooms = self.rooms_of(kind);
        if rooms.is_empty() {
            return Err(EngineError::NoRoomAvailable {
                subject: subject.id.clone(),
                kind,
            });
        }
        Ok(rooms)
    }

    /// Legal start periods for a session of `span`, lunch excluded.
    pub fn starts(&self, span: Span) -> &[u8] {
        match span {
            Span::Single => &self.single_starts,
            Span::Double => &self.double_starts,
        }
    }

    /// Subject lab-ness looked up by id. Unknown ids count as lectures.
    pub fn is_lab(&self, id: &SubjectId) -> bool {
        self.subject(id).is_some_and(Subject::is_lab)
    }
}
