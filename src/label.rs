//! Libellés des journées et textes affichés (français par défaut).
//!
//! La mise en forme des dates est découplée de la planification : le
//! [`Planner`](crate::scheduler::Planner) ne connaît que [`DayLabeler`].

use crate::model::SlotStatus;
use chrono::{Datelike, NaiveDate};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const JOURS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];
const MOIS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Formate une date en libellé lisible.
pub trait DayLabeler {
    fn format_day_label(&self, date: NaiveDate) -> String;
}

/// Langue d'affichage : libellés de dates, états et en-têtes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn status_label(self, status: SlotStatus) -> &'static str {
        match (self, status) {
            (Locale::Fr, SlotStatus::Present) => "Présent",
            (Locale::Fr, SlotStatus::Absent) => "Absent",
            (Locale::Fr, SlotStatus::Free) => "Libre",
            (Locale::En, SlotStatus::Present) => "Present",
            (Locale::En, SlotStatus::Absent) => "Absent",
            (Locale::En, SlotStatus::Free) => "Free",
        }
    }

    pub fn slot_header(self) -> &'static str {
        match self {
            Locale::Fr => "Horaires",
            Locale::En => "Time slot",
        }
    }

    pub fn date_header(self) -> &'static str {
        "Date"
    }

    pub fn counter_header(self) -> &'static str {
        match self {
            Locale::Fr => "Nombre de Présences",
            Locale::En => "Presence count",
        }
    }

    pub fn member_header(self) -> &'static str {
        match self {
            Locale::Fr => "Membre",
            Locale::En => "Member",
        }
    }
}

impl DayLabeler for Locale {
    fn format_day_label(&self, date: NaiveDate) -> String {
        match self {
            Locale::Fr => {
                let weekday = JOURS[date.weekday().num_days_from_monday() as usize];
                let month = MOIS[date.month0() as usize];
                format!("{weekday} {} {month} {}", date.day(), date.year())
            }
            Locale::En => date.format("%A %-d %B %Y").to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        })
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" | "fr_fr" | "fr-fr" | "francais" | "français" => Ok(Locale::Fr),
            "en" | "en_us" | "en-us" | "en_gb" | "en-gb" | "english" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Libellé ISO 8601 (`2025-01-06`), sans dépendance de langue.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoLabel;

impl DayLabeler for IsoLabel {
    fn format_day_label(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}
