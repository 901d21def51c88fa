use crate::model::{Member, SlotStatus, TimeSlot};
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid absence period: end {end} is before start {start}")]
    InvalidAbsence { start: NaiveDate, end: NaiveDate },
    #[error("member list cannot be empty")]
    NoMembers,
    #[error("member names and slot labels cannot be blank")]
    EmptyName,
    #[error("duplicate member: {0}")]
    DuplicateMember(String),
    #[error("duplicate slot: {0}")]
    DuplicateSlot(String),
    #[error("absence registered for unknown member: {0}")]
    UnknownMember(String),
}

/// Diagnostic non bloquant, rattaché à une seule journée.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Diagnostic {
    #[error("no member available for {0}")]
    NoAvailableMemberForDay(NaiveDate),
}

impl Diagnostic {
    pub fn date(&self) -> NaiveDate {
        match self {
            Diagnostic::NoAvailableMemberForDay(date) => *date,
        }
    }
}

/// Ligne d'un tableau journalier : une plage, le membre retenu, un état par membre.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SlotRow {
    pub slot: TimeSlot,
    pub assigned: Member,
    pub statuses: Vec<SlotStatus>,
}

/// Tableau d'une journée (lignes = plages, colonnes = membres).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub label: String,
    pub members: Vec<Member>,
    pub rows: Vec<SlotRow>,
}

impl DaySchedule {
    /// État de `member` sur la plage `slot`, si les deux existent.
    pub fn status(&self, slot: &TimeSlot, member: &Member) -> Option<SlotStatus> {
        let col = self.members.iter().position(|m| m == member)?;
        self.rows
            .iter()
            .find(|row| &row.slot == slot)
            .map(|row| row.statuses[col])
    }

    pub fn assigned(&self, slot: &TimeSlot) -> Option<&Member> {
        self.rows
            .iter()
            .find(|row| &row.slot == slot)
            .map(|row| &row.assigned)
    }

    pub fn present_count(&self, member: &Member) -> usize {
        self.rows.iter().filter(|row| &row.assigned == member).count()
    }
}

/// Compteur de présences, dans l'ordre des membres. Remis à zéro à chaque run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PresenceCounter {
    entries: Vec<(Member, u64)>,
}

impl PresenceCounter {
    pub fn new(members: &[Member]) -> Self {
        Self {
            entries: members.iter().map(|m| (m.clone(), 0)).collect(),
        }
    }

    pub(crate) fn increment_at(&mut self, index: usize) {
        if let Some((_, count)) = self.entries.get_mut(index) {
            *count += 1;
        }
    }

    pub fn get(&self, member: &Member) -> Option<u64> {
        self.entries
            .iter()
            .find(|(m, _)| m == member)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| *count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Member, u64)> {
        self.entries.iter().map(|(m, count)| (m, *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Résultat d'un run complet.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Planning {
    pub days: Vec<DaySchedule>,
    pub counter: PresenceCounter,
    pub diagnostics: Vec<Diagnostic>,
}

impl Planning {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
