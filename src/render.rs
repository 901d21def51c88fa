//! Rendu texte (terminal) des tableaux journaliers et du compteur.

use crate::label::Locale;
use crate::scheduler::{DaySchedule, PresenceCounter};

/// Tableau d'une journée, colonnes alignées.
pub fn render_day(day: &DaySchedule, locale: Locale) -> String {
    let mut header = vec![locale.slot_header().to_string()];
    header.extend(day.members.iter().map(|m| m.to_string()));

    let rows: Vec<Vec<String>> = day
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.slot.to_string()];
            cells.extend(
                row.statuses
                    .iter()
                    .map(|s| locale.status_label(*s).to_string()),
            );
            cells
        })
        .collect();

    let mut out = String::new();
    out.push_str(&day.label);
    out.push('\n');
    out.push_str(&render_table(&header, &rows));
    out
}

pub fn render_counter(counter: &PresenceCounter, locale: Locale) -> String {
    let header = vec![
        locale.member_header().to_string(),
        locale.counter_header().to_string(),
    ];
    let rows: Vec<Vec<String>> = counter
        .iter()
        .map(|(member, count)| vec![member.to_string(), count.to_string()])
        .collect();
    render_table(&header, &rows)
}

fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header, &widths);
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &sep, &widths);
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect();
    out.push_str(&format!("| {} |\n", line.join(" | ")));
}
