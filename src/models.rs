use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ============ Lead Records ============

/// Triage status of a lead report.
///
/// The only two values the client can produce or observe; a record with no
/// status on the wire deserializes as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    /// Awaiting triage.
    #[default]
    Pending,
    /// Triage finished.
    Done,
}

impl ReportStatus {
    /// The opposite status. Toggling twice returns the original value.
    pub fn toggled(self) -> Self {
        match self {
            ReportStatus::Pending => ReportStatus::Done,
            ReportStatus::Done => ReportStatus::Pending,
        }
    }

    /// Wire and display form (`PENDING` / `DONE`).
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter applied to read requests; `All` means "no filter".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every record regardless of status.
    #[default]
    All,
    /// Only PENDING records.
    Pending,
    /// Only DONE records.
    Done,
}

impl StatusFilter {
    /// Query-parameter value for a read request.
    ///
    /// Returns `None` when the filter is at its default and the parameter
    /// must be omitted entirely.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some("PENDING"),
            StatusFilter::Done => Some("DONE"),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusFilter::All => "ALL",
            StatusFilter::Pending => "PENDING",
            StatusFilter::Done => "DONE",
        };
        f.write_str(label)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(StatusFilter::All),
            "PENDING" => Ok(StatusFilter::Pending),
            "DONE" => Ok(StatusFilter::Done),
            other => Err(format!(
                "status must be one of ALL, PENDING, DONE (got '{}')",
                other
            )),
        }
    }
}

/// Accepts an id encoded as either a JSON string or a JSON number.
///
/// Ids are opaque to the client; both encodings normalize to a string.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// A user-submitted inauguration lead: contact details plus the birth
/// information collected by the intake form.
///
/// Every field other than the id is optional; absent text fields render as a
/// placeholder and absent birth parts render the date or time as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque identifier, stable across requests.
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Submitted name.
    pub name: Option<String>,
    /// Contact phone number.
    pub contact: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Birth day of month.
    pub day: Option<u32>,
    /// Birth month.
    pub month: Option<u32>,
    /// Birth year.
    pub year: Option<u32>,
    /// Birth hour; zero is a valid hour.
    pub hour: Option<u32>,
    /// Birth minute; zero is a valid minute.
    pub minute: Option<u32>,
    /// Birth place, camelCased on the wire.
    #[serde(rename = "birthPlace")]
    pub birth_place: Option<String>,
    /// Self-reported gender.
    pub gender: Option<String>,
    /// Triage status; absent on the wire means PENDING.
    #[serde(default)]
    pub report_status: ReportStatus,
}

// ============ API Envelopes ============

/// Envelope returned by `GET /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadListEnvelope {
    /// `"success"` on success; anything else is an application failure.
    pub status: String,
    /// The full, server-ordered result set.
    #[serde(default)]
    pub data: Vec<Lead>,
    /// Human-readable detail, usually set on failures.
    pub message: Option<String>,
}

impl LeadListEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Envelope returned by `PATCH /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAckEnvelope {
    pub status: String,
    pub message: Option<String>,
}

impl UpdateAckEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
