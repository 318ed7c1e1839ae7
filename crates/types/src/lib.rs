use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}
id_newtype!(TeacherId);
id_newtype!(SubjectId);
id_newtype!(RoomId);
id_newtype!(BranchId);

#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DayOfWeek::Mon => "mon",
            DayOfWeek::Tue => "tue",
            DayOfWeek::Wed => "wed",
            DayOfWeek::Thu => "thu",
            DayOfWeek::Fri => "fri",
            DayOfWeek::Sat => "sat",
            DayOfWeek::Sun => "sun",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub max_per_day: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    /// Explicit lab flag. When absent the name and code are checked for "lab".
    #[serde(default)]
    pub is_lab: Option<bool>,
}

impl Subject {
    pub fn is_lab(&self) -> bool {
        match self.is_lab {
            Some(flag) => flag,
            None => {
                self.name.to_lowercase().contains("lab") || self.code.to_lowercase().contains("lab")
            }
        }
    }

    pub fn span(&self) -> Span {
        if self.is_lab() {
            Span::Double
        } else {
            Span::Single
        }
    }

    pub fn room_kind(&self) -> RoomKind {
        if self.is_lab() {
            RoomKind::Lab
        } else {
            RoomKind::Class
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomKind {
    Class,
    Lab,
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomKind::Class => f.write_str("CLASS"),
            RoomKind::Lab => f.write_str("LAB"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Room {
    pub id: RoomId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RoomKind,
}

impl Room {
    /// A lab subject needs a lab room and a lecture needs a class room.
    pub fn hosts(&self, subject: &Subject) -> bool {
        self.kind == subject.room_kind()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Branch {
    pub id: BranchId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub semester: Option<u32>,
    #[serde(default)]
    pub section: Option<String>,
}

/// Number of consecutive periods one session occupies.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Span {
    #[default]
    Single,
    Double,
}

impl Span {
    pub fn count(self) -> u8 {
        match self {
            Span::Single => 1,
            Span::Double => 2,
        }
    }
}

fn default_days() -> Vec<DayOfWeek> {
    vec![
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
    ]
}

fn default_periods() -> u8 {
    8
}

fn default_lunch() -> Option<u8> {
    Some(5)
}

/// The weekly period grid every branch shares.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    #[serde(default = "default_days")]
    pub days: Vec<DayOfWeek>,
    #[serde(default = "default_periods")]
    pub periods: u8,
    #[serde(default = "default_lunch")]
    pub lunch: Option<u8>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            days: default_days(),
            periods: default_periods(),
            lunch: default_lunch(),
        }
    }
}

impl Calendar {
    pub fn is_lunch(&self, period: u8) -> bool {
        self.lunch == Some(period)
    }

    pub fn has_day(&self, day: DayOfWeek) -> bool {
        self.days.contains(&day)
    }

    /// Start periods where a session of `span` fits inside the day without touching lunch.
    pub fn starts(&self, span: Span) -> Vec<u8> {
        let len = span.count();
        (0..self.periods)
            .filter(|&p| u16::from(p) + u16::from(len) <= u16::from(self.periods))
            .filter(|&p| (p..p + len).all(|q| !self.is_lunch(q)))
            .collect()
    }
}

fn default_teacher_clash() -> u64 {
    1000
}
fn default_room_clash() -> u64 {
    800
}
fn default_subject_repeat() -> u64 {
    50
}
fn default_coverage() -> u64 {
    10
}
fn default_lab_placement() -> u64 {
    20
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Weights {
    #[serde(default = "default_teacher_clash")]
    pub teacher_clash: u64,
    #[serde(default = "default_room_clash")]
    pub room_clash: u64,
    #[serde(default = "default_subject_repeat")]
    pub subject_repeat: u64,
    #[serde(default = "default_coverage")]
    pub coverage: u64,
    #[serde(default = "default_lab_placement")]
    pub lab_placement: u64,
    #[serde(default)]
    pub teacher_overload: u64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            teacher_clash: default_teacher_clash(),
            room_clash: default_room_clash(),
            subject_repeat: default_subject_repeat(),
            coverage: default_coverage(),
            lab_placement: default_lab_placement(),
            teacher_overload: 0,
        }
    }
}

impl Weights {
    /// Smallest penalty any single hard violation can cost.
    pub fn min_hard(&self) -> u64 {
        self.teacher_clash.min(self.room_clash).min(self.subject_repeat)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Default)]
pub struct Policy {
    #[serde(default)]
    pub weights: Weights,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Instance {
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    pub rooms: Vec<Room>,
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub calendar: Calendar,
    #[serde(default)]
    pub policy: Policy,
}

/// One scheduled session. `period` is the first period a double session occupies.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Gene {
    pub branch_id: BranchId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub day: DayOfWeek,
    pub period: u8,
    #[serde(default)]
    pub span: Span,
}

impl Gene {
    pub fn periods(&self) -> std::ops::Range<u8> {
        self.period..self.period.saturating_add(self.span.count())
    }

    pub fn occupies(&self, day: DayOfWeek, period: u8) -> bool {
        self.day == day && self.periods().contains(&period)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Individual {
    pub genes: Vec<Gene>,
    pub fitness: u64,
}

/// A (day, period) cell of the weekly grid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash)]
pub struct Slot {
    pub day: DayOfWeek,
    pub period: u8,
}

impl Slot {
    pub fn new(day: DayOfWeek, period: u8) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.day, self.period)
    }
}

fn default_population() -> usize {
    30
}
fn default_generations() -> usize {
    100
}
fn default_mutation_rate() -> f64 {
    0.1
}
fn default_parallel() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolveParams {
    #[serde(default = "default_population")]
    pub population_size: usize,
    #[serde(default = "default_generations")]
    pub generations: usize,
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub time_limit_sec: Option<u64>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            population_size: default_population(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            seed: 0,
            time_limit_sec: None,
            parallel: default_parallel(),
        }
    }
}

/// Penalty breakdown of one schedule. `total` is the fitness.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub teacher_clashes: u64,
    pub room_clashes: u64,
    pub subject_repeats: u64,
    pub missing_subjects: u64,
    pub misplaced_labs: u64,
    pub teacher_overloads: u64,
    pub hard: u64,
    pub soft: u64,
    pub total: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct SolveResult {
    pub fitness: u64,
    pub genes: Vec<Gene>,
    pub scores: Scores,
    pub stats: serde_json::Value,
}
