mod assignment;
mod availability;
mod types;
mod util;

pub use availability::is_available;
pub use types::{DaySchedule, Diagnostic, PlanError, Planning, PresenceCounter, SlotRow};

use crate::label::{DayLabeler, Locale};
use crate::model::PlanningRequest;
use rand::Rng;
use std::collections::HashSet;

/// Planner : génère un planning à partir d'une requête, avec un formateur de dates.
#[derive(Debug, Default)]
pub struct Planner<L = Locale> {
    labeler: L,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            labeler: Locale::default(),
        }
    }
}

impl<L: DayLabeler> Planner<L> {
    pub fn with_labeler(labeler: L) -> Self {
        Self { labeler }
    }

    /// Génère le planning avec un tirage non reproductible.
    pub fn generate(&self, request: &PlanningRequest) -> Result<Planning, PlanError> {
        self.generate_with_rng(request, &mut rand::thread_rng())
    }

    /// Génère le planning avec le générateur fourni (graine fixe possible).
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &PlanningRequest,
        rng: &mut R,
    ) -> Result<Planning, PlanError> {
        validate(request)?;
        Ok(assignment::generate_days(request, &self.labeler, rng))
    }
}

/// Vérifie la requête avant tout traitement des journées.
pub fn validate(request: &PlanningRequest) -> Result<(), PlanError> {
    if request.end < request.start {
        return Err(PlanError::InvalidDateRange {
            start: request.start,
            end: request.end,
        });
    }
    if request.members.is_empty() {
        return Err(PlanError::NoMembers);
    }

    let mut seen = HashSet::new();
    for member in &request.members {
        if member.as_str().trim().is_empty() {
            return Err(PlanError::EmptyName);
        }
        if !seen.insert(member.as_str()) {
            return Err(PlanError::DuplicateMember(member.to_string()));
        }
    }

    let mut seen = HashSet::new();
    for slot in &request.slots {
        if slot.label().trim().is_empty() {
            return Err(PlanError::EmptyName);
        }
        if !seen.insert(slot.label()) {
            return Err(PlanError::DuplicateSlot(slot.to_string()));
        }
    }

    if let Some(unknown) = request
        .absences
        .members()
        .find(|m| !request.members.contains(m))
    {
        return Err(PlanError::UnknownMember(unknown.to_string()));
    }

    Ok(())
}
