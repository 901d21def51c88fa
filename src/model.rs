use crate::scheduler::PlanError;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Membre de l'équipe, identifié par son nom (unique dans un run).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Member(String);

impl Member {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Member {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Plage horaire : libellé opaque, l'ordre est celui de la configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TimeSlot(String);

impl TimeSlot {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeSlot {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Période d'absence, bornes incluses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AbsencePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AbsencePeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        if end < start {
            return Err(PlanError::InvalidAbsence { start, end });
        }
        Ok(Self { start, end })
    }

    /// Absence d'une seule journée.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Registre des absences : membre → périodes (zéro ou plus).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct AbsenceRegistry {
    periods: BTreeMap<Member, Vec<AbsencePeriod>>,
}

impl AbsenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, member: Member, period: AbsencePeriod) {
        self.periods.entry(member).or_default().push(period);
    }

    pub fn periods_of(&self, member: &Member) -> &[AbsencePeriod] {
        self.periods.get(member).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.periods.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.values().all(Vec::is_empty)
    }
}

/// État d'un membre pour une plage donnée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum SlotStatus {
    Present,
    Absent,
    Free,
}

/// Demande de génération : tout ce qu'un run consomme, possédé par l'appelant.
#[derive(Debug, Clone)]
pub struct PlanningRequest {
    pub members: Vec<Member>,
    pub slots: Vec<TimeSlot>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub include_weekends: bool,
    pub absences: AbsenceRegistry,
}

impl PlanningRequest {
    pub fn new(members: Vec<Member>, slots: Vec<TimeSlot>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            members,
            slots,
            start,
            end,
            include_weekends: true,
            absences: AbsenceRegistry::new(),
        }
    }

    pub fn include_weekends(mut self, include: bool) -> Self {
        self.include_weekends = include;
        self
    }

    pub fn absences(mut self, absences: AbsenceRegistry) -> Self {
        self.absences = absences;
        self
    }
}
