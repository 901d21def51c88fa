use crate::model::{AbsenceRegistry, Member};
use chrono::NaiveDate;

/// Vrai si aucune période d'absence de `member` ne couvre `date` (bornes incluses).
pub fn is_available(absences: &AbsenceRegistry, member: &Member, date: NaiveDate) -> bool {
    !absences
        .periods_of(member)
        .iter()
        .any(|period| period.contains(date))
}

/// Disponibilité de chaque membre pour `date`, dans l'ordre de `members`.
pub(super) fn availability_mask(
    absences: &AbsenceRegistry,
    members: &[Member],
    date: NaiveDate,
) -> Vec<bool> {
    members
        .iter()
        .map(|m| is_available(absences, m, date))
        .collect()
}
