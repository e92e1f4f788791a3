use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use screening_core::detail::{InterviewDetail, Section};
use screening_core::forms::{self, Notice, PersonaForm, MANUAL_ENTRY};
use screening_core::list::{RecordList, PAGE_LIMIT};
use screening_core::models::{CandidateStatus, ExportKind};
use screening_core::{ApiError, ClientConfig, HttpClient, Remote, ScreeningApi, UploadFile};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Backend {
    persona_bodies: Arc<Mutex<Vec<Value>>>,
    cv_fields: Arc<Mutex<Vec<String>>>,
}

const RECORD_COUNT: usize = 23;

async fn search_records(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let status = params.get("status").cloned();
    let all: Vec<Value> = (0..RECORD_COUNT)
        .map(|i| {
            let status = if i % 2 == 0 { "PENDING" } else { "CALL_INITIATED" };
            json!({"_id": format!("r{i}"), "name": format!("Candidate {i}"), "status": status})
        })
        .filter(|r| status.as_deref().map_or(true, |s| r["status"] == s))
        .collect();
    let total = all.len();
    let records: Vec<Value> = all.into_iter().skip((page - 1) * limit).take(limit).collect();
    Json(json!({
        "records": records,
        "total": total,
        "totalPages": total.div_ceil(limit),
    }))
}

async fn bulk_upload(mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        let text = String::from_utf8_lossy(&bytes).to_string();
        let candidates: Vec<Value> = text
            .lines()
            .skip(1)
            .filter(|l| !l.trim().is_empty())
            .map(|l| json!({"row": l}))
            .collect();
        return Ok(Json(json!({"candidates": candidates})));
    }
    Err(StatusCode::BAD_REQUEST)
}

async fn cv_upload(
    State(backend): State<Backend>,
    mut multipart: Multipart,
) -> Result<Json<Value>, StatusCode> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        backend
            .cv_fields
            .lock()
            .unwrap()
            .push(field.name().unwrap_or_default().to_string());
        files.push(json!(field.file_name().unwrap_or_default()));
    }
    Ok(Json(json!({"files": files})))
}

async fn set_persona(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.persona_bodies.lock().unwrap().push(body);
    Json(json!({"message": "Persona updated"}))
}

async fn auto_trigger() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "No pending candidates"})),
    )
}

async fn transcript(Path(sid): Path<String>) -> Json<Value> {
    Json(json!(format!("Agent: Hello from {sid}")))
}

async fn analysis(Path(_sid): Path<String>) -> Json<Value> {
    Json(json!({"score": 8, "summary": "Strong sales background"}))
}

async fn audio_missing(Path(_sid): Path<String>) -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn audio_analysis_broken(Path(_sid): Path<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": {"message": "storage offline"}})),
    )
}

async fn interviews(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let interviews = match params.get("callSid").map(String::as_str) {
        Some("CA1") => vec![json!({
            "callSid": "CA1",
            "status": "COMPLETED",
            "screeningInfo": {"recordingId": "RE1"}
        })],
        _ => Vec::new(),
    };
    Json(json!({"interviews": interviews, "total": interviews.len(), "totalPages": 1}))
}

async fn download(
    Path(sid): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Vec<u8> {
    format!("{sid}:{}", params.get("type").cloned().unwrap_or_default()).into_bytes()
}

async fn spawn_backend() -> (HttpClient, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/bulk-records/search", get(search_records))
        .route("/api/candidates/bulk-upload", post(bulk_upload))
        .route("/api/cv/bulk-upload", post(cv_upload))
        .route("/api/set-persona", post(set_persona))
        .route("/api/auto-trigger-call", post(auto_trigger))
        .route("/api/transcript/:sid", get(transcript))
        .route("/api/analysis/:sid", get(analysis))
        .route("/api/audio-transcript/:sid", get(audio_missing))
        .route("/api/audio-analysis/:sid", get(audio_analysis_broken))
        .route("/api/candidateInterviews/search", get(interviews))
        .route("/api/download/:sid", get(download))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let client = HttpClient::new(&ClientConfig::new(format!("http://{addr}/"))).expect("client");
    (client, backend)
}

#[tokio::test]
async fn record_pages_respect_limit_and_total() {
    let (client, _) = spawn_backend().await;
    let mut view = RecordList::records();

    assert!(view.refresh(&client).await);
    assert_eq!(view.items().len(), PAGE_LIMIT as usize);
    assert_eq!(view.total(), RECORD_COUNT as u64);
    assert_eq!(view.total_pages(), 3);
    assert_eq!(view.items()[0].id, "r0");

    view.go_to(3).expect("page 3");
    view.refresh(&client).await;
    assert_eq!(view.items().len(), 3);
    assert!(view.total() >= view.items().len() as u64);

    view.set_filter(Some(CandidateStatus::Pending));
    view.refresh(&client).await;
    assert_eq!(view.page(), 1);
    assert_eq!(view.total(), 12);
    assert!(view
        .items()
        .iter()
        .all(|r| r.status == CandidateStatus::Pending));
}

#[tokio::test]
async fn csv_upload_counts_data_rows() {
    let (client, _) = spawn_backend().await;
    let csv = "Name,Location,Product,Designation,Phone Number,CV\n\
               A,Delhi,Home loans,Sales Executive,919000000001,a.pdf\n\
               B,Mumbai,Business loans,Sales Executive,919000000002,b.pdf\n";
    let file = UploadFile::new("candidates.csv", csv.as_bytes().to_vec()).with_mime("text/csv");

    let notice = forms::upload_candidates(&client, Some(file)).await;

    assert_eq!(
        notice,
        Notice::Success("Successfully uploaded 2 candidates".into())
    );
}

#[tokio::test]
async fn cv_files_go_under_files_field() {
    let (client, backend) = spawn_backend().await;
    let files = vec![
        UploadFile::new("Ramya_V 1.pdf", b"%PDF".to_vec()).with_mime("application/pdf"),
        UploadFile::new("Smita_Kumari 1.pdf", b"%PDF".to_vec()),
    ];

    let notice = forms::upload_cvs(&client, files).await;

    assert_eq!(notice, Notice::Success("Successfully uploaded 2 CV files".into()));
    assert_eq!(*backend.cv_fields.lock().unwrap(), vec!["files", "files"]);
}

#[tokio::test]
async fn auto_trigger_error_is_shown_verbatim() {
    let (client, _) = spawn_backend().await;
    let result = client.auto_trigger_call().await;
    let err = result.as_ref().expect_err("empty queue");
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        forms::auto_trigger_outcome(&result),
        Notice::Error("No pending candidates".into())
    );
}

#[tokio::test]
async fn manual_persona_body_carries_prompt_and_default_description() {
    let (client, backend) = spawn_backend().await;
    let mut form = PersonaForm::default();
    form.load(vec!["Sales Recruiter".into()]);
    form.select(MANUAL_ENTRY);
    form.prompt_text = "Ask about loan targets".into();

    let notice = form.submit(&client).await;

    assert_eq!(notice, Notice::Success("Persona updated".into()));
    assert_eq!(
        backend.persona_bodies.lock().unwrap()[0],
        json!({
            "persona": "Manual Entry",
            "promptText": "Ask about loan targets",
            "description": "Custom prompt text",
        })
    );
}

#[tokio::test]
async fn interview_detail_sections_resolve_independently() {
    let (client, _) = spawn_backend().await;

    let detail = InterviewDetail::load(&client, "CA1").await;

    assert_eq!(
        detail.transcript,
        Remote::Ready("Agent: Hello from CA1".into())
    );
    let analysis = detail.analysis.ready().expect("analysis");
    assert!(analysis.contains("\"score\": 8"), "{analysis}");
    assert_eq!(detail.audio_transcript, Remote::Absent);
    assert_eq!(
        detail.audio_analysis.error(),
        Some(Section::AudioAnalysis.error_message())
    );
    assert!(detail.has_recording());

    let other = InterviewDetail::load(&client, "CA2").await;
    assert_eq!(other.details, Remote::Absent);
}

#[tokio::test]
async fn structured_error_message_is_extracted() {
    let (client, _) = spawn_backend().await;
    let err = client.audio_analysis("CA1").await.expect_err("500");
    assert!(matches!(
        &err,
        ApiError::Status { status: 500, message: Some(m) } if m == "storage offline"
    ));
}

#[tokio::test]
async fn download_returns_raw_bytes() {
    let (client, _) = spawn_backend().await;
    let bytes = client
        .download("CA1", ExportKind::Analysis)
        .await
        .expect("bytes");
    assert_eq!(bytes, b"CA1:analysis".to_vec());
}
