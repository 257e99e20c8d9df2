use crate::utils::error::{QueryError, MAX_COMPANIES};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Face values used when no symbol set is configured. Each one is dealt twice.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["🏢", "🏦", "🏪", "🏭", "🏗️", "🏬", "🏣", "🏤"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    FaceDown,
    Flipped,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub face: String,
    pub state: CardState,
}

impl Card {
    pub fn new(face: impl Into<String>) -> Self {
        Self {
            face: face.into(),
            state: CardState::FaceDown,
        }
    }

    pub fn is_face_up(&self) -> bool {
        self.state != CardState::FaceDown
    }

    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }
}

/// Body of `POST /save-score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    #[serde(rename = "time")]
    pub elapsed_seconds: u64,
    pub moves: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub name: String,
    pub time: u64,
    pub moves: u32,
}

/// Body of `POST /search`: the trimmed, non-empty company names in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    companies: Vec<String>,
}

impl SearchQuery {
    pub fn new<I, S>(names: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let companies: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        if companies.is_empty() {
            return Err(QueryError::Empty);
        }
        if companies.len() > MAX_COMPANIES {
            return Err(QueryError::TooMany {
                count: companies.len(),
                max: MAX_COMPANIES,
            });
        }

        Ok(Self { companies })
    }

    /// One company per line, as typed into a multi-line input.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        Self::new(text.lines())
    }

    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeCount {
    Exact(u64),
    /// Placeholder text the server sends instead of a number, e.g. "Not found".
    Text(String),
}

impl EmployeeCount {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
                .map(EmployeeCount::Exact),
            Value::String(s) if !s.trim().is_empty() => Some(EmployeeCount::Text(s.trim().to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Singapore,
    Global,
    /// Free-text location from servers that report one instead of a flag.
    Location(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecondarySource {
    pub source: Option<String>,
    pub count: Option<EmployeeCount>,
    pub is_singapore: Option<bool>,
}

/// One row of a `/search` response. Every field is optional: missing or
/// mistyped values are kept as `None` and rendered with a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub company: Option<String>,
    pub employee_count: Option<EmployeeCount>,
    pub region: Option<Region>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub other_sources: Vec<SecondarySource>,
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl SearchResult {
    pub fn from_json(value: &Value) -> Self {
        let company = text_field(value, "company").or_else(|| text_field(value, "name"));

        let region = match value.get("is_sg").and_then(|v| v.as_bool()) {
            Some(true) => Some(Region::Singapore),
            Some(false) => Some(Region::Global),
            None => text_field(value, "location").map(Region::Location),
        };

        let other_sources = value
            .get("other_sources")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(|item| SecondarySource {
                        source: text_field(item, "source"),
                        count: item.get("count").and_then(EmployeeCount::from_json),
                        is_singapore: item.get("is_sg").and_then(|v| v.as_bool()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            company,
            employee_count: value.get("employee_count").and_then(EmployeeCount::from_json),
            region,
            source: text_field(value, "source"),
            url: text_field(value, "url"),
            other_sources,
        }
    }
}
