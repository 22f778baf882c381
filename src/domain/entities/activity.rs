use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Which slice of the schedule a command asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Current,
    Next,
}

impl ActivityKind {
    /// Path segment used by the activities API
    pub fn path(&self) -> &'static str {
        match self {
            ActivityKind::Current => "current",
            ActivityKind::Next => "next",
        }
    }

    /// Word used when talking about this kind to a user
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Current => "current",
            ActivityKind::Next => "upcoming",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A scheduled session as returned by the activities API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawActivity")]
pub struct ActivityRecord {
    pub title: String,

    #[serde(rename = "beginDay")]
    pub day: String,

    #[serde(rename = "beginTime")]
    pub begin_time: String,

    pub location: String,

    pub speaker: String,
}

impl ActivityRecord {
    pub fn new(
        title: impl Into<String>,
        day: impl Into<String>,
        begin_time: impl Into<String>,
        location: impl Into<String>,
        speaker: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            day: day.into(),
            begin_time: begin_time.into(),
            location: location.into(),
            speaker: speaker.into(),
        }
    }
}

/// Wire shape. `beginDay`/`day` and `beginTime`/`begin` may both be present.
#[derive(Deserialize)]
struct RawActivity {
    #[serde(default)]
    title: Option<Value>,
    #[serde(rename = "beginDay", default)]
    begin_day: Option<Value>,
    #[serde(default)]
    day: Option<Value>,
    #[serde(rename = "beginTime", default)]
    begin_time: Option<Value>,
    #[serde(default)]
    begin: Option<Value>,
    #[serde(default)]
    location: Option<Value>,
    #[serde(default)]
    speaker: Option<Value>,
}

impl From<RawActivity> for ActivityRecord {
    fn from(raw: RawActivity) -> Self {
        Self {
            title: text(raw.title),
            day: text(raw.begin_day.or(raw.day)),
            begin_time: text(raw.begin_time.or(raw.begin)),
            location: text(raw.location),
            speaker: text(raw.speaker),
        }
    }
}

// Nulls become empty; numbers and other values are shown as written
fn text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}
