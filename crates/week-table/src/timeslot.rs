//! Timeslots: scheduled occurrences of a show.
//!
//! Storage of shows and timeslots lives outside this crate; these types are
//! the read-only shape the filler and the tabulator consume.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Name of the show type marking synthetic gap-filling slots.
pub const FILLER_SHOW_TYPE: &str = "filler";

/// Category of a show ("regular", "event", "filler", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowType {
    pub name: String,
    /// Whether shows of this type get an entry in public show listings.
    #[serde(default = "default_true")]
    pub has_showdb_entry: bool,
}

fn default_true() -> bool {
    true
}

impl ShowType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_showdb_entry: true,
        }
    }

    pub fn filler() -> Self {
        Self {
            name: FILLER_SHOW_TYPE.to_string(),
            has_showdb_entry: false,
        }
    }

    pub fn is_filler(&self) -> bool {
        self.name.eq_ignore_ascii_case(FILLER_SHOW_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Show {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub show_type: ShowType,
}

impl Show {
    pub fn new(id: u64, name: impl Into<String>, show_type: ShowType) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            show_type,
        }
    }

    /// The built-in show that fills otherwise empty airtime.
    pub fn filler() -> Self {
        Self {
            id: None,
            name: "Filler".to_string(),
            show_type: ShowType::filler(),
        }
    }
}

/// One scheduled airing of a show, `[start_time, start_time + duration)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeslot {
    /// Storage identifier; `None` for synthesised filler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub show: Show,
    pub start_time: DateTime<Utc>,
    #[serde(with = "duration_seconds", rename = "duration_seconds")]
    pub duration: Duration,
}

impl Timeslot {
    pub fn new(id: u64, show: Show, start_time: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            id: Some(id),
            show,
            start_time,
            duration,
        }
    }

    /// A filler slot covering exactly `[start, end)`.
    pub fn filler(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: None,
            show: Show::filler(),
            start_time: start,
            duration: end - start,
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + self.duration
    }

    /// Where this slot begins when chaining a gap-free sequence.
    pub fn range_start(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Where this slot ends when chaining a gap-free sequence.
    pub fn range_end(&self) -> DateTime<Utc> {
        self.end_time()
    }

    pub fn show_type_name(&self) -> &str {
        &self.show.show_type.name
    }

    pub fn is_filler(&self) -> bool {
        self.show.show_type.is_filler()
    }
}

mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(d)?;
        if secs < 0 {
            return Err(serde::de::Error::custom(format!(
                "timeslot duration must be non-negative, got {secs}s"
            )));
        }
        Duration::try_seconds(secs)
            .ok_or_else(|| serde::de::Error::custom(format!("duration out of range: {secs}s")))
    }
}
