use crate::label::Locale;
use crate::model::{AbsencePeriod, AbsenceRegistry, Member, PlanningRequest, TimeSlot};
use crate::scheduler;
use crate::storage;
use anyhow::{bail, Context, Result};
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration complète d'un planning, telle que stockée en JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub slots: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default = "default_true")]
    pub include_weekends: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub absences: BTreeMap<String, Vec<AbsencePeriod>>,
    #[serde(default)]
    pub locale: Locale,
}

fn default_true() -> bool {
    true
}

impl PlanningConfig {
    /// Valeurs par défaut du formulaire : trois plages, quatre membres, 7 jours.
    pub fn sample(today: NaiveDate) -> Self {
        Self {
            members: ["Alice", "Bob", "Charlie", "David"]
                .into_iter()
                .map(String::from)
                .collect(),
            slots: ["8:00-12:00", "12:00-16:00", "16:00-20:00"]
                .into_iter()
                .map(String::from)
                .collect(),
            start: today,
            end: today + Duration::days(6),
            include_weekends: true,
            absences: BTreeMap::new(),
            locale: Locale::Fr,
        }
    }

    pub fn sample_from_today() -> Self {
        Self::sample(Local::now().date_naive())
    }

    pub fn validate(&self) -> Result<()> {
        for period in self.absences.values().flatten() {
            if period.end < period.start {
                bail!(
                    "absence period end {} is before start {}",
                    period.end,
                    period.start
                );
            }
        }
        scheduler::validate(&self.to_request())?;
        Ok(())
    }

    /// Construit la requête de génération (non validée).
    pub fn to_request(&self) -> PlanningRequest {
        let mut absences = AbsenceRegistry::new();
        for (name, periods) in &self.absences {
            for period in periods {
                absences.add(Member::new(name), *period);
            }
        }
        PlanningRequest::new(
            self.members.iter().map(Member::new).collect(),
            self.slots.iter().map(TimeSlot::new).collect(),
            self.start,
            self.end,
        )
        .include_weekends(self.include_weekends)
        .absences(absences)
    }

    pub fn add_member(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("member name cannot be empty");
        }
        if self.members.iter().any(|m| m == name) {
            bail!("member already present: {name}");
        }
        self.members.push(name.to_string());
        Ok(())
    }

    pub fn add_slot(&mut self, label: &str) -> Result<()> {
        let label = label.trim();
        if label.is_empty() {
            bail!("slot label cannot be empty");
        }
        if self.slots.iter().any(|s| s == label) {
            bail!("slot already present: {label}");
        }
        self.slots.push(label.to_string());
        Ok(())
    }

    pub fn add_absence(&mut self, member: &str, period: AbsencePeriod) -> Result<()> {
        let member = member.trim();
        if !self.members.iter().any(|m| m == member) {
            bail!("unknown member: {member}");
        }
        self.absences
            .entry(member.to_string())
            .or_default()
            .push(period);
        Ok(())
    }
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<PlanningConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: PlanningConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config_to_file<P: AsRef<Path>>(path: P, config: &PlanningConfig) -> Result<()> {
    config.validate()?;
    let json = serde_json::to_vec_pretty(config)?;
    storage::write_atomic(path, &json)
}
