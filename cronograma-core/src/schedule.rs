//! Schedule entries and the day-partitioned store.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::category::Category;
use crate::error::{CronogramaError, CronogramaResult};

/// A day identifier, e.g. `13` for the 13th.
pub type Day = u32;

/// One row of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Display time, e.g. "14:00". Never interpreted.
    #[serde(default, deserialize_with = "display_text")]
    pub time: String,
    #[serde(default, deserialize_with = "display_text")]
    pub activity: String,
    #[serde(rename = "type", default = "default_category", deserialize_with = "category_tag")]
    pub category: Category,
}

fn default_category() -> Category {
    Category::Other
}

/// Any JSON value as display text: strings as-is, null as "", the rest as JSON.
fn display_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A category from a string tag; any non-string tag lands in the `other` bucket.
fn category_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Category, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tag) => Category::from(tag),
        _ => Category::Other,
    })
}

impl ScheduleEntry {
    pub fn new(time: &str, activity: &str, category: Category) -> Self {
        ScheduleEntry {
            time: time.to_string(),
            activity: activity.to_string(),
            category,
        }
    }
}

/// Mapping from day to its entries, in display order.
///
/// Built once per load and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleStore {
    days: BTreeMap<Day, Vec<ScheduleEntry>>,
}

impl ScheduleStore {
    pub fn empty() -> Self {
        ScheduleStore::default()
    }

    /// Normalize a JSON document into a store.
    ///
    /// The top level must be an object. Each key is coerced to a day; a
    /// value that is not an array becomes an empty day. Array elements that
    /// don't look like entries are skipped.
    pub fn from_json(content: &str) -> CronogramaResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> CronogramaResult<Self> {
        let Value::Object(map) = value else {
            return Err(CronogramaError::Shape(format!(
                "expected an object keyed by day, got {}",
                json_kind(&value)
            )));
        };

        let mut days = BTreeMap::new();
        for (key, value) in map {
            let Some(day) = parse_day(&key) else {
                tracing::debug!(key = %key, "skipping schedule key that is not a day");
                continue;
            };
            days.insert(day, normalize_entries(day, value));
        }

        Ok(ScheduleStore { days })
    }

    /// Entries for `day`, or an empty slice when the day has no data.
    pub fn entries(&self, day: Day) -> &[ScheduleEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.days.keys().copied()
    }

    pub fn contains_day(&self, day: Day) -> bool {
        self.days.contains_key(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(Day, Vec<ScheduleEntry>)> for ScheduleStore {
    fn from_iter<T: IntoIterator<Item = (Day, Vec<ScheduleEntry>)>>(iter: T) -> Self {
        ScheduleStore {
            days: iter.into_iter().collect(),
        }
    }
}

/// Parse a day: "13", " 13 " and "13.0" are all day 13. Day 0 doesn't exist.
pub(crate) fn parse_day(key: &str) -> Option<Day> {
    let key = key.trim();
    let day = match key.parse::<Day>() {
        Ok(day) => day,
        Err(_) => {
            let float = key.parse::<f64>().ok()?;
            if float.fract() != 0.0 || float < 1.0 || float > Day::MAX as f64 {
                return None;
            }
            float as Day
        }
    };
    (day > 0).then_some(day)
}

fn normalize_entries(day: Day, value: Value) -> Vec<ScheduleEntry> {
    let Value::Array(items) = value else {
        tracing::debug!(day, "day value is not an array, treating as empty");
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            if !item.is_object() {
                tracing::debug!(day, index = i, "skipping schedule row that is not an object");
                return None;
            }
            match serde_json::from_value::<ScheduleEntry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(day, index = i, error = %e, "skipping malformed schedule row");
                    None
                }
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
