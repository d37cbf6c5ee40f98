//! A single catalog entry.

use crate::{Result, SnapshotError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// One course offering as listed in the catalog.
///
/// `id` and `crn` tie the offering to the registration system but carry no
/// meaning for change detection: a CRN reassignment on an otherwise
/// unchanged listing is not a change worth reporting. Equality therefore
/// covers `number`, `section` and `name` only, and the sort order uses
/// `number`, then `section`, then `name`, so two offerings that compare
/// equal under the order are also equal under `==`.
#[derive(Debug, Clone, Serialize)]
pub struct Offering {
    pub id: String,
    pub number: String,
    pub section: String,
    pub name: String,
    pub crn: String,
}

impl Offering {
    /// Whether `other` occupies the same catalog slot (`number` and
    /// `section` match), regardless of title. A renamed offering keeps its
    /// slot, which is what groups its removal and addition together in a
    /// rendered change report.
    #[must_use]
    pub fn same_listing(&self, other: &Self) -> bool {
        self.number == other.number && self.section == other.section
    }

    /// Builds an offering from one decoded snapshot record.
    ///
    /// All five fields are required strings; nothing is coerced. Unknown
    /// keys are ignored.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            id: field(map, "id")?,
            number: field(map, "number")?,
            section: field(map, "section")?,
            name: field(map, "name")?,
            crn: field(map, "crn")?,
        })
    }
}

fn field(map: &Map<String, Value>, key: &'static str) -> Result<String> {
    let value = map.get(key).ok_or(SnapshotError::MissingField(key))?;
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(SnapshotError::InvalidField(key))
}

impl PartialEq for Offering {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.section == other.section && self.name == other.name
    }
}

impl Eq for Offering {}

impl Ord for Offering {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.section.cmp(&other.section))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Offering {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {} [{}]", self.number, self.section, self.name, self.crn)
    }
}
