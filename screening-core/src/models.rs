//! Wire types exchanged with the screening backend.
//!
//! Field names follow the backend's camelCase JSON. Everything here is a
//! read-mostly projection; the backend owns the lifecycle of every entity.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Status enumerations that drive a list filter and a badge.
pub trait StatusKind: Copy + PartialEq + std::fmt::Debug + 'static {
    /// Every selectable status, in the order the filter shows them.
    const ALL: &'static [Self];

    fn wire(self) -> &'static str;
    fn label(self) -> &'static str;
    fn badge(self) -> &'static str;

    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.wire() == value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    InsufficientInfo,
    Pending,
    CallInitiated,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind for CandidateStatus {
    const ALL: &'static [Self] = &[
        CandidateStatus::InsufficientInfo,
        CandidateStatus::Pending,
        CandidateStatus::CallInitiated,
    ];

    fn wire(self) -> &'static str {
        match self {
            CandidateStatus::InsufficientInfo => "INSUFFICIENT_INFO",
            CandidateStatus::Pending => "PENDING",
            CandidateStatus::CallInitiated => "CALL_INITIATED",
            CandidateStatus::Unknown => "UNKNOWN",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CandidateStatus::InsufficientInfo => "Insufficient Info",
            CandidateStatus::Pending => "Pending",
            CandidateStatus::CallInitiated => "Call Initiated",
            CandidateStatus::Unknown => "Unknown",
        }
    }

    fn badge(self) -> &'static str {
        match self {
            CandidateStatus::Pending => "bg-warning",
            CandidateStatus::CallInitiated => "bg-success",
            _ => "bg-secondary",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    Initiated,
    Connected,
    Disconnected,
    Failed,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind for CallStatus {
    const ALL: &'static [Self] = &[
        CallStatus::Initiated,
        CallStatus::Connected,
        CallStatus::Disconnected,
        CallStatus::Failed,
        CallStatus::Completed,
    ];

    fn wire(self) -> &'static str {
        match self {
            CallStatus::Initiated => "INITIATED",
            CallStatus::Connected => "CONNECTED",
            CallStatus::Disconnected => "DISCONNECTED",
            CallStatus::Failed => "FAILED",
            CallStatus::Completed => "COMPLETED",
            CallStatus::Unknown => "UNKNOWN",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CallStatus::Initiated => "Initiated",
            CallStatus::Connected => "Connected",
            CallStatus::Disconnected => "Disconnected",
            CallStatus::Failed => "Failed",
            CallStatus::Completed => "Completed",
            CallStatus::Unknown => "Unknown",
        }
    }

    fn badge(self) -> &'static str {
        match self {
            CallStatus::Completed => "bg-success",
            CallStatus::Connected => "bg-primary",
            CallStatus::Initiated => "bg-warning",
            CallStatus::Disconnected => "bg-danger",
            _ => "bg-secondary",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub location: String,
    pub product: String,
    pub designation: String,
    pub status: CandidateStatus,
    pub call_sid: Option<String>,
    pub has_cv_info: bool,
    pub cv_filename: Option<String>,
    pub cv_info: Option<CvInfo>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CandidateRecord {
    pub fn extracted(&self) -> Option<&ExtractedInfo> {
        self.cv_info.as_ref()?.extracted_info.as_ref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvInfo {
    pub extracted_info: Option<ExtractedInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedInfo {
    pub personal_info: Option<PersonalInfo>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Option<Skills>,
    pub sales_metrics: Option<SalesMetrics>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub state: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    #[serde(deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    pub responsibilities: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "lenient_text")]
    pub institution: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub field: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub year: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub technical: Option<Vec<String>>,
    pub soft: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesMetrics {
    #[serde(deserialize_with = "lenient_text")]
    pub average_target_achievement: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub highest_sales_record: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub client_retention_rate: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub lead_conversion_rate: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub average_deal_size: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub sales_cycle: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Interview {
    pub call_sid: String,
    pub status: CallStatus,
    pub candidate_info: Option<CandidateInfo>,
    pub screening_info: Option<ScreeningInfo>,
    pub created_at: Option<String>,
}

impl Interview {
    /// First eight characters of the call SID followed by an ellipsis.
    pub fn short_sid(&self) -> String {
        let head: String = self.call_sid.chars().take(8).collect();
        format!("{head}...")
    }

    pub fn candidate_name(&self) -> &str {
        self.candidate_info
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn candidate_phone(&self) -> &str {
        self.candidate_info
            .as_ref()
            .and_then(|c| c.phone_number.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn has_transcript(&self) -> bool {
        self.screening_info.as_ref().is_some_and(|s| present(&s.transcript))
    }

    pub fn has_analysis(&self) -> bool {
        self.screening_info.as_ref().is_some_and(|s| present(&s.analysis))
    }

    pub fn has_recording(&self) -> bool {
        self.screening_info
            .as_ref()
            .and_then(|s| s.recording_id.as_deref())
            .is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateInfo {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub product: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreeningInfo {
    pub transcript: Option<Value>,
    pub analysis: Option<Value>,
    #[serde(deserialize_with = "lenient_text")]
    pub recording_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneNumber {
    pub sid: String,
    pub phone_number: String,
    pub friendly_name: String,
}

impl PhoneNumber {
    pub fn label(&self) -> String {
        format!("{} ({})", self.friendly_name, self.phone_number)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersonaList {
    #[serde(default)]
    pub personas: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPersonaRequest {
    pub persona: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub number: String,
    pub from_number: String,
    pub name: String,
    pub location: String,
    pub product: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStarted {
    pub call_sid: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCallRequest {
    pub call_sid: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CandidateUploadResult {
    #[serde(default)]
    pub candidates: Vec<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CvUploadResult {
    #[serde(default)]
    pub files: Vec<Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RecordEnvelope {
    #[serde(default)]
    pub record: Option<CandidateRecord>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RecordPageWire {
    pub records: Vec<CandidateRecord>,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct InterviewPageWire {
    pub interviews: Vec<Interview>,
    pub total: u64,
    pub total_pages: u32,
}

/// One page of a paginated search.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
}

impl From<RecordPageWire> for Page<CandidateRecord> {
    fn from(wire: RecordPageWire) -> Self {
        Self {
            items: wire.records,
            total: wire.total,
            total_pages: wire.total_pages,
        }
    }
}

impl From<InterviewPageWire> for Page<Interview> {
    fn from(wire: InterviewPageWire) -> Self {
        Self {
            items: wire.interviews,
            total: wire.total,
            total_pages: wire.total_pages,
        }
    }
}

/// Server-side exports available through `/api/download`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Transcript,
    Analysis,
}

impl ExportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Transcript => "transcript",
            ExportKind::Analysis => "analysis",
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "transcript" => Ok(ExportKind::Transcript),
            "analysis" => Ok(ExportKind::Analysis),
            other => Err(format!("unknown export type '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordingFormat {
    #[default]
    Mp3,
    Wav,
}

/// Text endpoints answer with a JSON string, a JSON document, or plain text.
/// Normalize all three into displayable text.
pub fn text_document(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => text,
        Ok(Value::Null) => String::new(),
        Ok(other) => serde_json::to_string_pretty(&other).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

fn present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

// Blank strings count as missing; numbers are rendered as text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let record: CandidateRecord =
            serde_json::from_str(r#"{"id":"r1","status":"ARCHIVED"}"#).expect("record");
        assert_eq!(record.status, CandidateStatus::Unknown);
        assert_eq!(record.status.badge(), "bg-secondary");
    }

    #[test]
    fn record_reads_camel_case_and_nested_cv() {
        let raw = r#"{
          "id": "r7",
          "name": "Rajan Preet",
          "phoneNumber": "919001378117",
          "status": "CALL_INITIATED",
          "callSid": "CA123",
          "hasCvInfo": true,
          "cvInfo": {
            "extractedInfo": {
              "personalInfo": {"name": "Rajan", "email": ""},
              "education": [{"institution": "DU", "year": 2019}],
              "skills": {"technical": ["CRM"]},
              "salesMetrics": {"averageTargetAchievement": "110%"}
            }
          }
        }"#;
        let record: CandidateRecord = serde_json::from_str(raw).expect("record");
        assert_eq!(record.phone_number, "919001378117");
        assert_eq!(record.status, CandidateStatus::CallInitiated);
        assert_eq!(record.call_sid.as_deref(), Some("CA123"));
        let cv = record.extracted().expect("extracted");
        let personal = cv.personal_info.as_ref().expect("personal");
        assert_eq!(personal.email, None);
        assert_eq!(cv.education[0].year.as_deref(), Some("2019"));
        assert!(cv.work_experience.is_empty());
        assert_eq!(
            cv.skills.as_ref().and_then(|s| s.technical.clone()),
            Some(vec!["CRM".to_string()])
        );
    }

    #[test]
    fn interview_helpers_fall_back_to_unknown() {
        let interview: Interview = serde_json::from_str(
            r#"{"callSid":"CA0123456789abcdef","status":"COMPLETED","screeningInfo":{"transcript":"hi","recordingId":"RE1"}}"#,
        )
        .expect("interview");
        assert_eq!(interview.short_sid(), "CA012345...");
        assert_eq!(interview.candidate_name(), "Unknown");
        assert!(interview.has_transcript());
        assert!(!interview.has_analysis());
        assert!(interview.has_recording());
        assert_eq!(interview.status.badge(), "bg-success");
    }

    #[test]
    fn persona_request_omits_absent_fields() {
        let req = SetPersonaRequest {
            persona: "Sales Recruiter".into(),
            prompt_text: None,
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&req).expect("json"),
            serde_json::json!({"persona": "Sales Recruiter"})
        );
    }

    #[test]
    fn text_document_accepts_string_object_and_plain() {
        assert_eq!(text_document(r#""Agent: hello""#), "Agent: hello");
        assert_eq!(text_document("plain words"), "plain words");
        assert!(text_document(r#"{"score":7}"#).contains("\"score\": 7"));
        assert_eq!(text_document("null"), "");
    }

    #[test]
    fn status_filters_round_trip_through_wire_names() {
        assert_eq!(CallStatus::from_wire("FAILED"), Some(CallStatus::Failed));
        assert_eq!(CandidateStatus::from_wire("UNKNOWN"), None);
        assert_eq!(CandidateStatus::ALL.len(), 3);
    }
}
