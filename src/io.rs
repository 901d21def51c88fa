use crate::label::Locale;
use crate::model::AbsencePeriod;
use crate::scheduler::{Planning, PresenceCounter};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de membres depuis CSV: header `name`
pub fn import_members_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    import_single_column(path, "name")
}

/// Import de plages horaires depuis CSV: header `label`
pub fn import_slots_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    import_single_column(path, "label")
}

fn import_single_column<P: AsRef<Path>>(path: P, what: &str) -> anyhow::Result<Vec<String>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let value = rec.get(0).with_context(|| format!("missing {what}"))?.trim();
        if value.is_empty() {
            bail!("invalid row (empty {what})");
        }
        out.push(value.to_string());
    }
    Ok(out)
}

/// Import d'absences: header `member,start[,end]` (dates `YYYY-MM-DD`, fin incluse).
pub fn import_absences_csv<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<Vec<(String, AbsencePeriod)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let member = rec.get(0).context("missing member")?.trim();
        if member.is_empty() {
            bail!("invalid absence row (empty member)");
        }
        let start = parse_date(rec.get(1).context("missing start")?)
            .with_context(|| format!("invalid start for member {member}"))?;
        let period = match rec.get(2).map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => {
                let end =
                    parse_date(raw).with_context(|| format!("invalid end for member {member}"))?;
                AbsencePeriod::new(start, end)?
            }
            None => AbsencePeriod::single_day(start),
        };
        out.push((member.to_string(), period));
    }
    Ok(out)
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_planning_json<P: AsRef<Path>>(path: P, planning: &Planning) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(planning)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `date,label,slot,<membres...>`
pub fn export_planning_csv<P: AsRef<Path>>(
    path: P,
    planning: &Planning,
    locale: Locale,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().flexible(true).from_path(path)?;
    let members: Vec<&str> = planning
        .counter
        .iter()
        .map(|(member, _)| member.as_str())
        .collect();
    let mut header = vec!["date", "label", "slot"];
    header.extend(members.iter().copied());
    w.write_record(&header)?;

    for day in &planning.days {
        let date = day.date.format("%Y-%m-%d").to_string();
        for row in &day.rows {
            let mut record = vec![date.as_str(), day.label.as_str(), row.slot.label()];
            record.extend(row.statuses.iter().map(|s| locale.status_label(*s)));
            w.write_record(&record)?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du compteur: header `member,count`
pub fn export_counter_csv<P: AsRef<Path>>(path: P, counter: &PresenceCounter) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["member", "count"])?;
    let mut buf = itoa::Buffer::new();
    for (member, count) in counter.iter() {
        w.write_record([member.as_str(), buf.format(count)])?;
    }
    w.flush()?;
    Ok(())
}
