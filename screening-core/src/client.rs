//! HTTP access to the screening backend.
//!
//! Every view talks to the backend through [`ScreeningApi`]. The production
//! implementation is [`HttpClient`]; tests swap in doubles.

use crate::error::ApiError;
use crate::models::{
    text_document, CallRequest, CallStarted, CandidateRecord, CandidateUploadResult,
    CvUploadResult, EndCallRequest, ExportKind, Interview, InterviewPageWire, MessageResponse,
    Page, PersonaList, PhoneNumber, RecordEnvelope, RecordPageWire, RecordingFormat,
    SetPersonaRequest,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const BASE_URL_ENV: &str = "SCREENING_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `SCREENING_API_BASE_URL`, falling back to the local backend.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }
}

/// Query for the paginated search endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub status: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub call_sid: Option<String>,
}

impl SearchQuery {
    pub fn page(status: Option<&str>, page: u32, limit: u32) -> Self {
        Self {
            status: status.map(ToString::to_string),
            page,
            limit,
            call_sid: None,
        }
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        if let Some(call_sid) = &self.call_sid {
            pairs.push(("callSid", call_sid.clone()));
        }
        pairs
    }
}

/// A file picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// One method per backend operation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ScreeningApi {
    async fn personas(&self) -> Result<Vec<String>, ApiError>;
    async fn set_persona(&self, request: &SetPersonaRequest) -> Result<MessageResponse, ApiError>;

    async fn phone_numbers(&self) -> Result<Vec<PhoneNumber>, ApiError>;
    async fn initiate_call(&self, request: &CallRequest) -> Result<CallStarted, ApiError>;
    async fn end_call(&self, call_sid: &str) -> Result<MessageResponse, ApiError>;
    async fn auto_trigger_call(&self) -> Result<CallStarted, ApiError>;

    async fn transcript(&self, call_sid: &str) -> Result<String, ApiError>;
    async fn analysis(&self, call_sid: &str) -> Result<String, ApiError>;
    async fn audio_transcript(&self, call_sid: &str) -> Result<String, ApiError>;
    async fn audio_analysis(&self, call_sid: &str) -> Result<String, ApiError>;
    async fn download(&self, call_sid: &str, kind: ExportKind) -> Result<Vec<u8>, ApiError>;

    async fn search_interviews(&self, query: &SearchQuery) -> Result<Page<Interview>, ApiError>;
    async fn search_records(&self, query: &SearchQuery)
        -> Result<Page<CandidateRecord>, ApiError>;
    async fn bulk_record(&self, id: &str) -> Result<Option<CandidateRecord>, ApiError>;

    async fn upload_candidates(&self, file: UploadFile)
        -> Result<CandidateUploadResult, ApiError>;
    async fn upload_cvs(&self, files: Vec<UploadFile>) -> Result<CvUploadResult, ApiError>;

    /// Playback URL for a call recording. Not fetched, only derived.
    fn recording_url(&self, call_sid: &str, format: RecordingFormat) -> String;
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|_| ApiError::InvalidBaseUrl(config.base_url.clone()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        debug!(%url, "GET");
        let response = self.client.get(url).query(query).send().await?;
        decode_json(check(response).await?).await
    }

    async fn get_text(&self, segments: &[&str]) -> Result<String, ApiError> {
        let url = self.endpoint(segments);
        debug!(%url, "GET text");
        let response = check(self.client.get(url).send().await?).await?;
        Ok(text_document(&response.text().await?))
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        debug!(%url, "POST");
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        decode_json(check(response).await?).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        debug!(%url, "POST multipart");
        let response = self.client.post(url).multipart(form).send().await?;
        decode_json(check(response).await?).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ScreeningApi for HttpClient {
    async fn personas(&self) -> Result<Vec<String>, ApiError> {
        let list: PersonaList = self.get_json(&["api", "personas"], &[]).await?;
        Ok(list.personas)
    }

    async fn set_persona(&self, request: &SetPersonaRequest) -> Result<MessageResponse, ApiError> {
        self.post_json(&["api", "set-persona"], Some(request)).await
    }

    async fn phone_numbers(&self) -> Result<Vec<PhoneNumber>, ApiError> {
        self.get_json(&["api", "numbers"], &[]).await
    }

    async fn initiate_call(&self, request: &CallRequest) -> Result<CallStarted, ApiError> {
        self.post_json(&["api", "call"], Some(request)).await
    }

    async fn end_call(&self, call_sid: &str) -> Result<MessageResponse, ApiError> {
        let body = EndCallRequest {
            call_sid: call_sid.to_string(),
        };
        self.post_json(&["api", "end-call"], Some(&body)).await
    }

    async fn auto_trigger_call(&self) -> Result<CallStarted, ApiError> {
        self.post_json::<(), _>(&["api", "auto-trigger-call"], None)
            .await
    }

    async fn transcript(&self, call_sid: &str) -> Result<String, ApiError> {
        self.get_text(&["api", "transcript", call_sid]).await
    }

    async fn analysis(&self, call_sid: &str) -> Result<String, ApiError> {
        self.get_text(&["api", "analysis", call_sid]).await
    }

    async fn audio_transcript(&self, call_sid: &str) -> Result<String, ApiError> {
        self.get_text(&["api", "audio-transcript", call_sid]).await
    }

    async fn audio_analysis(&self, call_sid: &str) -> Result<String, ApiError> {
        self.get_text(&["api", "audio-analysis", call_sid]).await
    }

    async fn download(&self, call_sid: &str, kind: ExportKind) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(&["api", "download", call_sid]);
        debug!(%url, kind = kind.as_str(), "GET download");
        let response = self
            .client
            .get(url)
            .query(&[("type", kind.as_str())])
            .send()
            .await?;
        let bytes = check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn search_interviews(&self, query: &SearchQuery) -> Result<Page<Interview>, ApiError> {
        let wire: InterviewPageWire = self
            .get_json(&["api", "candidateInterviews", "search"], &query.pairs())
            .await?;
        Ok(wire.into())
    }

    async fn search_records(
        &self,
        query: &SearchQuery,
    ) -> Result<Page<CandidateRecord>, ApiError> {
        let wire: RecordPageWire = self
            .get_json(&["api", "bulk-records", "search"], &query.pairs())
            .await?;
        Ok(wire.into())
    }

    async fn bulk_record(&self, id: &str) -> Result<Option<CandidateRecord>, ApiError> {
        let envelope: RecordEnvelope = self
            .get_json(&["api", "candidates", "bulk-records", id], &[])
            .await?;
        Ok(envelope.record)
    }

    async fn upload_candidates(
        &self,
        file: UploadFile,
    ) -> Result<CandidateUploadResult, ApiError> {
        let form = Form::new().part("file", file_part(file)?);
        self.post_form(&["api", "candidates", "bulk-upload"], form)
            .await
    }

    async fn upload_cvs(&self, files: Vec<UploadFile>) -> Result<CvUploadResult, ApiError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", file_part(file)?);
        }
        self.post_form(&["api", "cv", "bulk-upload"], form).await
    }

    fn recording_url(&self, call_sid: &str, format: RecordingFormat) -> String {
        let mut url = self.endpoint(&["api", "recording", call_sid]);
        if format == RecordingFormat::Wav {
            url.query_pairs_mut().append_pair("format", "wav");
        }
        url.to_string()
    }
}

fn file_part(file: UploadFile) -> Result<Part, ApiError> {
    let part = Part::bytes(file.bytes).file_name(file.file_name);
    match file.mime {
        Some(mime) => Ok(part.mime_str(&mime)?),
        None => Ok(part),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Turns a non-2xx response into [`ApiError::Status`], keeping the backend's
/// `error` field. Accepts both `{"error": "msg"}` and
/// `{"error": {"message": "msg"}}`.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| match e {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string),
            _ => None,
        })
        .filter(|m| !m.trim().is_empty());

    warn!(status = status.as_u16(), error = ?message, "backend request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    if body.trim().is_empty() {
        // POST endpoints may answer 2xx with no body.
        return Ok(serde_json::from_str("{}").or_else(|_| serde_json::from_str("null"))?);
    }
    Ok(serde_json::from_str(&body)?)
}
