use super::availability::availability_mask;
use super::types::{DaySchedule, Diagnostic, Planning, PresenceCounter, SlotRow};
use super::util::{self, FairnessCycle};
use crate::label::DayLabeler;
use crate::model::{PlanningRequest, SlotStatus};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Génère le planning jour par jour. La requête doit avoir été validée.
pub(super) fn generate_days<R: Rng + ?Sized>(
    request: &PlanningRequest,
    labeler: &dyn DayLabeler,
    rng: &mut R,
) -> Planning {
    let members = &request.members;
    let mut counter = PresenceCounter::new(members);
    let mut days = Vec::new();
    let mut diagnostics = Vec::new();

    for date in util::days_in_range(request.start, request.end) {
        if !request.include_weekends && util::is_weekend(date) {
            continue;
        }

        let mask = availability_mask(&request.absences, members, date);
        let mut available: Vec<usize> = (0..members.len()).filter(|&i| mask[i]).collect();

        if available.is_empty() {
            let diagnostic = Diagnostic::NoAvailableMemberForDay(date);
            warn!(%date, "{diagnostic}");
            diagnostics.push(diagnostic);
            continue;
        }

        available.shuffle(rng);
        let mut cycle = FairnessCycle::new(&available);

        let rows = request
            .slots
            .iter()
            .map(|slot| {
                let chosen = cycle.next_index();
                counter.increment_at(chosen);
                let statuses = mask
                    .iter()
                    .enumerate()
                    .map(|(i, &free)| match (i == chosen, free) {
                        (true, _) => SlotStatus::Present,
                        (false, false) => SlotStatus::Absent,
                        (false, true) => SlotStatus::Free,
                    })
                    .collect();
                SlotRow {
                    slot: slot.clone(),
                    assigned: members[chosen].clone(),
                    statuses,
                }
            })
            .collect();

        debug!(%date, available = available.len(), "day scheduled");
        days.push(DaySchedule {
            date,
            label: labeler.format_day_label(date),
            members: members.clone(),
            rows,
        });
    }

    Planning {
        days,
        counter,
        diagnostics,
    }
}
