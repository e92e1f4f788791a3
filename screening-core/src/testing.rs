//! In-memory [`ScreeningApi`] double for unit tests.

use crate::client::{ScreeningApi, SearchQuery, UploadFile};
use crate::error::ApiError;
use crate::models::{
    CallRequest, CallStarted, CandidateRecord, CandidateUploadResult, CvUploadResult, ExportKind,
    Interview, MessageResponse, Page, PhoneNumber, RecordingFormat, ScreeningInfo,
    SetPersonaRequest, StatusKind,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub type Canned<T> = Result<T, (u16, Option<String>)>;

#[derive(Default)]
pub struct StubApi {
    texts: Mutex<HashMap<&'static str, Canned<String>>>,
    interviews: Mutex<Vec<Interview>>,
    records: Mutex<Vec<CandidateRecord>>,
    records_failure: Mutex<Option<u16>>,
    personas: Mutex<Vec<String>>,
    numbers: Mutex<Vec<PhoneNumber>>,
    fail_next: Mutex<Option<(u16, Option<String>)>>,
    pub persona_requests: Mutex<Vec<SetPersonaRequest>>,
    pub call_requests: Mutex<Vec<CallRequest>>,
    pub uploads: Mutex<Vec<UploadFile>>,
    requests: AtomicUsize,
}

fn status_err((status, message): (u16, Option<String>)) -> ApiError {
    ApiError::Status { status, message }
}

impl StubApi {
    pub fn set_text(&self, key: &'static str, value: Canned<String>) {
        self.texts.lock().unwrap().insert(key, value);
    }

    pub fn push_interview(&self, call_sid: &str, recording_id: Option<&str>) {
        self.interviews.lock().unwrap().push(Interview {
            call_sid: call_sid.into(),
            screening_info: Some(ScreeningInfo {
                recording_id: recording_id.map(ToString::to_string),
                ..Default::default()
            }),
            ..Default::default()
        });
    }

    pub fn push_record(&self, record: CandidateRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn fail_records(&self, status: u16) {
        *self.records_failure.lock().unwrap() = Some(status);
    }

    pub fn set_personas(&self, personas: &[&str]) {
        *self.personas.lock().unwrap() = personas.iter().map(ToString::to_string).collect();
    }

    pub fn set_numbers(&self, numbers: Vec<PhoneNumber>) {
        *self.numbers.lock().unwrap() = numbers;
    }

    /// The next mutating request fails with this status and body message.
    pub fn fail_next(&self, status: u16, message: Option<&str>) {
        *self.fail_next.lock().unwrap() = Some((status, message.map(ToString::to_string)));
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        match self.fail_next.lock().unwrap().take() {
            Some(failure) => Err(status_err(failure)),
            None => Ok(()),
        }
    }

    fn text(&self, key: &'static str) -> Result<String, ApiError> {
        self.hit();
        self.texts
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or(Err((404, None)))
            .map_err(status_err)
    }
}

fn paginate<T: Clone>(items: Vec<T>, query: &SearchQuery) -> Page<T> {
    let limit = query.limit.max(1) as usize;
    let total = items.len();
    let start = (query.page.max(1) as usize - 1) * limit;
    Page {
        items: items.into_iter().skip(start).take(limit).collect(),
        total: total as u64,
        total_pages: total.div_ceil(limit) as u32,
    }
}

#[async_trait]
impl ScreeningApi for StubApi {
    async fn personas(&self) -> Result<Vec<String>, ApiError> {
        self.hit();
        Ok(self.personas.lock().unwrap().clone())
    }

    async fn set_persona(&self, request: &SetPersonaRequest) -> Result<MessageResponse, ApiError> {
        self.hit();
        self.take_failure()?;
        self.persona_requests.lock().unwrap().push(request.clone());
        Ok(MessageResponse {
            message: Some(format!("Persona set to {}", request.persona)),
        })
    }

    async fn phone_numbers(&self) -> Result<Vec<PhoneNumber>, ApiError> {
        self.hit();
        Ok(self.numbers.lock().unwrap().clone())
    }

    async fn initiate_call(&self, request: &CallRequest) -> Result<CallStarted, ApiError> {
        self.hit();
        self.take_failure()?;
        self.call_requests.lock().unwrap().push(request.clone());
        Ok(CallStarted {
            call_sid: "CA-stub-1".into(),
        })
    }

    async fn end_call(&self, _call_sid: &str) -> Result<MessageResponse, ApiError> {
        self.hit();
        self.take_failure()?;
        Ok(MessageResponse::default())
    }

    async fn auto_trigger_call(&self) -> Result<CallStarted, ApiError> {
        self.hit();
        self.take_failure()?;
        Ok(CallStarted {
            call_sid: "CA-auto-1".into(),
        })
    }

    async fn transcript(&self, _call_sid: &str) -> Result<String, ApiError> {
        self.text("transcript")
    }

    async fn analysis(&self, _call_sid: &str) -> Result<String, ApiError> {
        self.text("analysis")
    }

    async fn audio_transcript(&self, _call_sid: &str) -> Result<String, ApiError> {
        self.text("audio-transcript")
    }

    async fn audio_analysis(&self, _call_sid: &str) -> Result<String, ApiError> {
        self.text("audio-analysis")
    }

    async fn download(&self, _call_sid: &str, kind: ExportKind) -> Result<Vec<u8>, ApiError> {
        self.hit();
        self.take_failure()?;
        Ok(format!("{} export", kind.as_str()).into_bytes())
    }

    async fn search_interviews(&self, query: &SearchQuery) -> Result<Page<Interview>, ApiError> {
        self.hit();
        let matching = self
            .interviews
            .lock()
            .unwrap()
            .iter()
            .filter(|i| query.call_sid.as_ref().map_or(true, |sid| &i.call_sid == sid))
            .filter(|i| query.status.as_deref().map_or(true, |s| i.status.wire() == s))
            .cloned()
            .collect();
        Ok(paginate(matching, query))
    }

    async fn search_records(
        &self,
        query: &SearchQuery,
    ) -> Result<Page<CandidateRecord>, ApiError> {
        self.hit();
        if let Some(status) = *self.records_failure.lock().unwrap() {
            return Err(status_err((status, None)));
        }
        let matching = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| query.status.as_deref().map_or(true, |s| r.status.wire() == s))
            .cloned()
            .collect();
        Ok(paginate(matching, query))
    }

    async fn bulk_record(&self, id: &str) -> Result<Option<CandidateRecord>, ApiError> {
        self.hit();
        if let Some(status) = *self.records_failure.lock().unwrap() {
            return Err(status_err((status, None)));
        }
        Ok(self.records.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn upload_candidates(
        &self,
        file: UploadFile,
    ) -> Result<CandidateUploadResult, ApiError> {
        self.hit();
        self.take_failure()?;
        let rows = String::from_utf8_lossy(&file.bytes)
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::Value::String(l.to_string()))
            .collect();
        self.uploads.lock().unwrap().push(file);
        Ok(CandidateUploadResult { candidates: rows })
    }

    async fn upload_cvs(&self, files: Vec<UploadFile>) -> Result<CvUploadResult, ApiError> {
        self.hit();
        self.take_failure()?;
        let names = files
            .iter()
            .map(|f| serde_json::Value::String(f.file_name.clone()))
            .collect();
        self.uploads.lock().unwrap().extend(files);
        Ok(CvUploadResult { files: names })
    }

    fn recording_url(&self, call_sid: &str, format: RecordingFormat) -> String {
        match format {
            RecordingFormat::Mp3 => format!("stub://recording/{call_sid}"),
            RecordingFormat::Wav => format!("stub://recording/{call_sid}?format=wav"),
        }
    }
}
