#![forbid(unsafe_code)]
//! Planning — répartition des membres d'une équipe sur des plages horaires.
//!
//! - Filtrage des membres absents, jour par jour (bornes incluses).
//! - Tirage aléatoire puis rotation équitable sur les plages de la journée.
//! - Compteur de présences par membre, remis à zéro à chaque génération.
//! - Rendu texte, exports CSV/JSON et Excel protégé par mot de passe.

#[cfg(feature = "serde")]
pub mod config;
pub mod export;
#[cfg(feature = "serde")]
pub mod io;
pub mod label;
pub mod model;
pub mod render;
pub mod scheduler;
pub mod storage;

#[cfg(feature = "serde")]
pub use config::{load_config_from_file, save_config_to_file, PlanningConfig};
pub use export::{CellStyle, DocumentExporter, ExportError, StyleRules, XlsxExporter};
pub use label::{DayLabeler, IsoLabel, Locale};
pub use model::{AbsencePeriod, AbsenceRegistry, Member, PlanningRequest, SlotStatus, TimeSlot};
pub use render::{render_counter, render_day};
pub use scheduler::{
    is_available, DaySchedule, Diagnostic, PlanError, Planner, Planning, PresenceCounter, SlotRow,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
