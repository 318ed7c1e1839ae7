//! Legality checks for hand edits of a finished schedule.
//!
//! A [`Board`] indexes one schedule snapshot so that a proposed move (a user dragging a
//! cell of a branch timetable) can be accepted or rejected with a few hash lookups. It
//! enforces the same clash rules the evaluator scores, plus the structural rules for
//! two-period labs: both periods inside the day, neither on lunch, both empty.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use types::{BranchId, Calendar, DayOfWeek, Gene, RoomId, Slot, Span, SubjectId, TeacherId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalManualMove {
    #[error("slot {0} is outside the calendar")]
    OutOfRange(Slot),
    #[error("nothing is scheduled at {0}")]
    EmptySource(Slot),
    #[error("more than one session sits at {0}")]
    ContestedSlot(Slot),
    #[error("{0} is the lunch period")]
    LunchPeriod(Slot),
    #[error("cannot drop onto the lab block at {0}")]
    OntoLabBlock(Slot),
    #[error("a two-period lab starting at {0} runs past the end of the day")]
    LabOutOfRange(Slot),
    #[error("a two-period lab starting at {0} would cover lunch")]
    LabSpansLunch(Slot),
    #[error("a two-period lab needs {0} and the following period empty")]
    LabDestinationOccupied(Slot),
    #[error("teacher {teacher} already teaches at {slot}")]
    TeacherBusy { teacher: TeacherId, slot: Slot },
    #[error("room {room} is already in use at {slot}")]
    RoomBusy { room: RoomId, slot: Slot },
    #[error("branch {branch} already has {subject} on {day}")]
    SubjectRepeated {
        branch: BranchId,
        subject: SubjectId,
        day: DayOfWeek,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Relocation {
    /// Index into the gene slice the board was built from.
    pub gene: usize,
    pub from: Slot,
    pub to: Slot,
}

/// The genes an accepted move relocates. Empty when the move is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MoveDelta {
    pub relocations: Vec<Relocation>,
}

impl MoveDelta {
    pub fn is_empty(&self) -> bool {
        self.relocations.is_empty()
    }

    pub fn apply(&self, genes: &mut [Gene]) {
        for r in &self.relocations {
            let g = &mut genes[r.gene];
            g.day = r.to.day;
            g.period = r.to.period;
        }
    }
}

type Cell<'a> = (&'a str, DayOfWeek, u8);

pub struct Board<'a> {
    calendar: &'a Calendar,
    genes: &'a [Gene],
    cells: HashMap<Cell<'a>, Vec<usize>>,
    teacher_at: HashMap<Cell<'a>, Vec<usize>>,
    room_at: HashMap<Cell<'a>, Vec<usize>>,
    subject_days: HashMap<(&'a str, DayOfWeek, &'a str), Vec<usize>>,
}

impl<'a> Board<'a> {
    pub fn new(calendar: &'a Calendar, genes: &'a [Gene]) -> Self {
        let mut board = Self {
            calendar,
            genes,
            cells: HashMap::new(),
            teacher_at: HashMap::new(),
            room_at: HashMap::new(),
            subject_days: HashMap::new(),
        };
        for (i, g) in genes.iter().enumerate() {
            for p in g.periods() {
                board
                    .cells
                    .entry((g.branch_id.0.as_str(), g.day, p))
                    .or_default()
                    .push(i);
                board
                    .teacher_at
                    .entry((g.teacher_id.0.as_str(), g.day, p))
                    .or_default()
                    .push(i);
                board
                    .room_at
                    .entry((g.room_id.0.as_str(), g.day, p))
                    .or_default()
                    .push(i);
            }
            board
                .subject_days
                .entry((g.branch_id.0.as_str(), g.day, g.subject_id.0.as_str()))
                .or_default()
                .push(i);
        }
        board
    }

    /// Sessions of `branch` covering `slot`.
    pub fn occupants<'b>(&'b self, branch: &'b BranchId, slot: Slot) -> &'b [usize] {
        self.cells
            .get(&(branch.0.as_str(), slot.day, slot.period))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Checks moving the session of `branch` found at `from` to `to`. Picking any cell
    /// of a lab block moves the whole block. A single-period session dropped on another
    /// single-period session swaps with it.
    pub fn check_move(
        &self,
        branch: &BranchId,
        from: Slot,
        to: Slot,
    ) -> Result<MoveDelta, IllegalManualMove> {
        self.resolve(branch, from, to).inspect_err(|reason| {
            debug!(branch = %branch, %from, %to, %reason, "manual move rejected");
        })
    }

    fn resolve(
        &self,
        branch: &BranchId,
        from: Slot,
        to: Slot,
    ) -> Result<MoveDelta, IllegalManualMove> {
        self.in_range(from)?;
        self.in_range(to)?;

        let gi = match self.occupants(branch, from) {
            [] => return Err(IllegalManualMove::EmptySource(from)),
            [gi] => *gi,
            _ => return Err(IllegalManualMove::ContestedSlot(from)),
        };
        let moving = &self.genes[gi];
        let origin = Slot::new(moving.day, moving.period);
        if from == to || origin == to {
            return Ok(MoveDelta::default());
        }

        match moving.span {
            Span::Double => {
                let next = to.period + 1;
                if next >= self.calendar.periods {
                    return Err(IllegalManualMove::LabOutOfRange(to));
                }
                if self.calendar.is_lunch(to.period) || self.calendar.is_lunch(next) {
                    return Err(IllegalManualMove::LabSpansLunch(to));
                }
                let both_free = [to.period, next]
                    .iter()
                    .all(|&p| self.occupants(branch, Slot::new(to.day, p)).is_empty());
                if !both_free {
                    return Err(IllegalManualMove::LabDestinationOccupied(to));
                }
                self.fits(gi, to, &[gi])?;
                Ok(MoveDelta {
                    relocations: vec![Relocation {
                        gene: gi,
                        from: origin,
                        to,
                    }],
                })
            }
            Span::Single => {
                if self.calendar.is_lunch(to.period) {
                    return Err(IllegalManualMove::LunchPeriod(to));
                }
                match self.occupants(branch, to) {
                    [] => {
                        self.fits(gi, to, &[gi])?;
                        Ok(MoveDelta {
                            relocations: vec![Relocation {
                                gene: gi,
                                from: origin,
                                to,
                            }],
                        })
                    }
                    [other] if self.genes[*other].span == Span::Single => {
                        let other = *other;
                        let ignore = [gi, other];
                        self.fits(gi, to, &ignore)?;
                        self.fits(other, origin, &ignore)?;
                        Ok(MoveDelta {
                            relocations: vec![
                                Relocation {
                                    gene: gi,
                                    from: origin,
                                    to,
                                },
                                Relocation {
                                    gene: other,
                                    from: to,
                                    to: origin,
                                },
                            ],
                        })
                    }
                    [_] => Err(IllegalManualMove::OntoLabBlock(to)),
                    _ => Err(IllegalManualMove::ContestedSlot(to)),
                }
            }
        }
    }

    fn in_range(&self, slot: Slot) -> Result<(), IllegalManualMove> {
        if self.calendar.has_day(slot.day) && slot.period < self.calendar.periods {
            Ok(())
        } else {
            Err(IllegalManualMove::OutOfRange(slot))
        }
    }

    /// Teacher, room and same-day subject rules for gene `gi` starting at `to`,
    /// ignoring the genes taking part in the move.
    fn fits(&self, gi: usize, to: Slot, ignore: &[usize]) -> Result<(), IllegalManualMove> {
        let g = &self.genes[gi];
        let taken = |ids: Option<&Vec<usize>>| {
            ids.is_some_and(|v| v.iter().any(|i| !ignore.contains(i)))
        };

        for p in to.period..to.period + g.span.count() {
            let slot = Slot::new(to.day, p);
            if taken(self.teacher_at.get(&(g.teacher_id.0.as_str(), to.day, p))) {
                return Err(IllegalManualMove::TeacherBusy {
                    teacher: g.teacher_id.clone(),
                    slot,
                });
            }
            if taken(self.room_at.get(&(g.room_id.0.as_str(), to.day, p))) {
                return Err(IllegalManualMove::RoomBusy {
                    room: g.room_id.clone(),
                    slot,
                });
            }
        }

        if to.day != g.day {
            let key = (g.branch_id.0.as_str(), to.day, g.subject_id.0.as_str());
            if taken(self.subject_days.get(&key)) {
                return Err(IllegalManualMove::SubjectRepeated {
                    branch: g.branch_id.clone(),
                    subject: g.subject_id.clone(),
                    day: to.day,
                });
            }
        }
        Ok(())
    }
}
