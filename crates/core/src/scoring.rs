use std::collections::{HashMap, HashSet};
use std::ops::Range;

use types::{DayOfWeek, Gene, Instance, Scores, Span, Weights};

/// Penalty function for complete schedules. Lower is better, 0 means no modeled violation.
///
/// Clashes are counted per occupied period, so a lab collides with anything sharing its
/// teacher or room in either of its two periods. Lab-ness comes from the subject, never
/// from the gene's `span`. Lunch gets no special treatment here; placement code never
/// puts a session on it.
pub struct Evaluator<'a> {
    weights: &'a Weights,
    periods: u8,
    subject_count: u64,
    branch_ids: Vec<&'a str>,
    lab_subjects: HashSet<&'a str>,
    max_per_day: HashMap<&'a str, u32>,
}

impl<'a> Evaluator<'a> {
    pub fn new(inst: &'a Instance) -> Self {
        Self {
            weights: &inst.policy.weights,
            periods: inst.calendar.periods,
            subject_count: inst.subjects.len() as u64,
            branch_ids: inst.branches.iter().map(|b| b.id.0.as_str()).collect(),
            lab_subjects: inst
                .subjects
                .iter()
                .filter(|s| s.is_lab())
                .map(|s| s.id.0.as_str())
                .collect(),
            max_per_day: inst
                .teachers
                .iter()
                .filter_map(|t| t.max_per_day.map(|m| (t.id.0.as_str(), m)))
                .collect(),
        }
    }

    pub fn weights(&self) -> &Weights {
        self.weights
    }

    fn is_lab(&self, g: &Gene) -> bool {
        self.lab_subjects.contains(g.subject_id.0.as_str())
    }

    /// Periods `g` occupies, sized by its subject.
    fn occupied(&self, g: &Gene) -> Range<u8> {
        let span = if self.is_lab(g) { Span::Double } else { Span::Single };
        g.period..g.period.saturating_add(span.count())
    }

    pub fn fitness(&self, genes: &[Gene]) -> u64 {
        self.scores(genes).total
    }

    pub fn scores(&self, genes: &[Gene]) -> Scores {
        let mut teacher_at: HashMap<(DayOfWeek, u8, &str), u64> = HashMap::new();
        let mut room_at: HashMap<(DayOfWeek, u8, &str), u64> = HashMap::new();
        let mut subject_on_day: HashMap<(&str, DayOfWeek, &str), u64> = HashMap::new();
        let mut scheduled: HashMap<&str, HashSet<&str>> = HashMap::new();
        let mut teacher_day: HashMap<(&str, DayOfWeek), u32> = HashMap::new();
        let mut misplaced_labs = 0u64;

        for g in genes {
            let tid = g.teacher_id.0.as_str();
            let rid = g.room_id.0.as_str();
            let bid = g.branch_id.0.as_str();
            let sid = g.subject_id.0.as_str();
            for p in self.occupied(g) {
                *teacher_at.entry((g.day, p, tid)).or_default() += 1;
                *room_at.entry((g.day, p, rid)).or_default() += 1;
            }
            *subject_on_day.entry((bid, g.day, sid)).or_default() += 1;
            scheduled.entry(bid).or_default().insert(sid);
            *teacher_day.entry((tid, g.day)).or_default() += 1;

            if self.is_lab(g) && (g.period == 0 || g.period >= self.periods.saturating_sub(2)) {
                misplaced_labs += 1;
            }
        }

        let teacher_clashes = extras(&teacher_at);
        let room_clashes = extras(&room_at);
        let subject_repeats = extras(&subject_on_day);

        let missing_subjects: u64 = self
            .branch_ids
            .iter()
            .map(|b| {
                let have = scheduled.get(b).map_or(0, |s| s.len() as u64);
                self.subject_count.saturating_sub(have)
            })
            .sum();

        let teacher_overloads: u64 = teacher_day
            .iter()
            .filter_map(|((tid, _), &n)| {
                let max = *self.max_per_day.get(tid)?;
                Some(u64::from(n.saturating_sub(max)))
            })
            .sum();

        let w = self.weights;
        let hard = teacher_clashes * w.teacher_clash
            + room_clashes * w.room_clash
            + subject_repeats * w.subject_repeat;
        let soft = missing_subjects * w.coverage
            + misplaced_labs * w.lab_placement
            + teacher_overloads * w.teacher_overload;

        Scores {
            teacher_clashes,
            room_clashes,
            subject_repeats,
            missing_subjects,
            misplaced_labs,
            teacher_overloads,
            hard,
            soft,
            total: hard + soft,
        }
    }

    /// Upper bound of the soft penalty for a schedule holding one session per
    /// (branch, subject) pair, where coverage is always complete.
    pub fn soft_ceiling(&self) -> u64 {
        let branches = self.branch_ids.len() as u64;
        let sessions = branches * self.subject_count;
        branches * self.lab_subjects.len() as u64 * self.weights.lab_placement
            + sessions * self.weights.teacher_overload
    }
}

/// Occurrences beyond the first, summed over all keys.
fn extras<K>(counts: &HashMap<K, u64>) -> u64 {
    counts.values().map(|&c| c - 1).sum()
}
