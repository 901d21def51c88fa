use chrono::{Datelike, NaiveDate, Weekday};

pub(super) fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Jours de `[start, end]` en ordre croissant.
pub(super) fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Cycle d'équité : parcours round-robin d'un ordre mélangé figé.
///
/// La plage `i` reçoit `order[i % order.len()]`.
pub(super) struct FairnessCycle<'a> {
    order: &'a [usize],
    cursor: usize,
}

impl<'a> FairnessCycle<'a> {
    /// `order` ne doit pas être vide.
    pub(super) fn new(order: &'a [usize]) -> Self {
        debug_assert!(!order.is_empty());
        Self { order, cursor: 0 }
    }

    pub(super) fn next_index(&mut self) -> usize {
        let idx = self.order[self.cursor];
        self.cursor = (self.cursor + 1) % self.order.len();
        idx
    }
}
