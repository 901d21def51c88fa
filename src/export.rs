//! Export Excel (XLSX) du planning, avec protection optionnelle par mot de passe.
//!
//! Une seule feuille `Planning` : un bloc par journée (en-tête, puis une ligne
//! par plage), séparés par une ligne vide. Une feuille de compteur peut suivre.

use crate::label::Locale;
use crate::model::SlotStatus;
use crate::scheduler::{DaySchedule, Planning, PresenceCounter};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use thiserror::Error;
use tracing::debug;

const PLANNING_SHEET: &str = "Planning";
const FIRST_MEMBER_COL: u16 = 2;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("a password is required to protect the exported document")]
    MissingExportCredential,
    #[error("too many {0} for a worksheet")]
    TooLarge(&'static str),
    #[error(transparent)]
    Xlsx(#[from] XlsxError),
}

/// Style d'une cellule (couleurs RGB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fill: u32,
    pub font: u32,
}

impl CellStyle {
    fn format(self) -> Format {
        Format::new()
            .set_background_color(self.fill)
            .set_font_color(self.font)
    }
}

/// Règles {état → style}. `Free` garde le style par défaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRules {
    pub present: CellStyle,
    pub absent: CellStyle,
}

impl Default for StyleRules {
    fn default() -> Self {
        Self {
            present: CellStyle {
                fill: 0x008000,
                font: 0xFFFFFF,
            },
            absent: CellStyle {
                fill: 0xFF0000,
                font: 0xFFFFFF,
            },
        }
    }
}

/// Collaborateur d'export : consomme le planning, rend un document en mémoire.
pub trait DocumentExporter {
    fn export(&self, planning: &Planning, password: Option<&str>) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone)]
pub struct XlsxExporter {
    pub locale: Locale,
    pub styles: StyleRules,
    /// Refuse d'exporter sans mot de passe.
    pub require_password: bool,
    /// Ajoute une feuille avec le compteur de présences.
    pub include_counter: bool,
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            styles: StyleRules::default(),
            require_password: true,
            include_counter: true,
        }
    }
}

impl XlsxExporter {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn styles(mut self, styles: StyleRules) -> Self {
        self.styles = styles;
        self
    }

    /// Autorise un export non protégé quand aucun mot de passe n'est fourni.
    pub fn allow_unprotected(mut self) -> Self {
        self.require_password = false;
        self
    }

    pub fn without_counter(mut self) -> Self {
        self.include_counter = false;
        self
    }

    fn write_days(&self, sheet: &mut Worksheet, days: &[DaySchedule]) -> Result<(), ExportError> {
        let header = Format::new().set_bold();
        let present = self.styles.present.format();
        let absent = self.styles.absent.format();

        let mut row: u32 = 0;
        for day in days {
            sheet.write_string_with_format(row, 0, self.locale.slot_header(), &header)?;
            sheet.write_string_with_format(row, 1, self.locale.date_header(), &header)?;
            for (idx, member) in day.members.iter().enumerate() {
                sheet.write_string_with_format(row, member_col(idx)?, member.as_str(), &header)?;
            }
            row += 1;

            for slot_row in &day.rows {
                sheet.write_string(row, 0, slot_row.slot.label())?;
                sheet.write_string(row, 1, day.label.as_str())?;
                for (idx, status) in slot_row.statuses.iter().enumerate() {
                    let text = self.locale.status_label(*status);
                    let col = member_col(idx)?;
                    match status {
                        SlotStatus::Present => sheet.write_string_with_format(row, col, text, &present)?,
                        SlotStatus::Absent => sheet.write_string_with_format(row, col, text, &absent)?,
                        SlotStatus::Free => sheet.write_string(row, col, text)?,
                    };
                }
                row += 1;
            }
            // ligne vide entre deux journées
            row += 1;
        }

        sheet.set_column_width(0, 14)?;
        sheet.set_column_width(1, 28)?;
        Ok(())
    }

    fn write_counter(&self, sheet: &mut Worksheet, counter: &PresenceCounter) -> Result<(), ExportError> {
        let header = Format::new().set_bold();
        sheet.write_string_with_format(0, 0, self.locale.member_header(), &header)?;
        sheet.write_string_with_format(0, 1, self.locale.counter_header(), &header)?;
        for (row, (member, count)) in (1u32..).zip(counter.iter()) {
            sheet.write_string(row, 0, member.as_str())?;
            sheet.write_number(row, 1, count as f64)?;
        }
        sheet.set_column_width(0, 20)?;
        sheet.set_column_width(1, 22)?;
        Ok(())
    }

    fn counter_sheet_name(&self) -> &'static str {
        match self.locale {
            Locale::Fr => "Compteur",
            Locale::En => "Counter",
        }
    }
}

impl DocumentExporter for XlsxExporter {
    fn export(&self, planning: &Planning, password: Option<&str>) -> Result<Vec<u8>, ExportError> {
        let password = password.filter(|p| !p.is_empty());
        if self.require_password && password.is_none() {
            return Err(ExportError::MissingExportCredential);
        }

        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(PLANNING_SHEET)?;
        self.write_days(sheet, &planning.days)?;
        if let Some(pw) = password {
            sheet.protect_with_password(pw);
        }

        if self.include_counter {
            let sheet = workbook.add_worksheet();
            sheet.set_name(self.counter_sheet_name())?;
            self.write_counter(sheet, &planning.counter)?;
            if let Some(pw) = password {
                sheet.protect_with_password(pw);
            }
        }

        let buffer = workbook.save_to_buffer()?;
        debug!(
            bytes = buffer.len(),
            days = planning.days.len(),
            protected = password.is_some(),
            "xlsx export ready"
        );
        Ok(buffer)
    }
}

fn member_col(idx: usize) -> Result<u16, ExportError> {
    u16::try_from(idx)
        .ok()
        .and_then(|i| i.checked_add(FIRST_MEMBER_COL))
        .ok_or(ExportError::TooLarge("members"))
}
