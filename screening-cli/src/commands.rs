use crate::saver::DirectorySaver;
use anyhow::{bail, Context, Result};
use screening_core::detail::{fetch_record, recording_urls, InterviewDetail, Section};
use screening_core::download::{self, save_csv_template, CSV_TEMPLATE_FILE};
use screening_core::forms::{self, MakeCallForm, Notice, PersonaForm};
use screening_core::list::PAGE_LIMIT;
use screening_core::models::{ExportKind, RecordingFormat, StatusKind};
use screening_core::{Remote, ScreeningApi, SearchQuery, UploadFile};
use serde::Serialize;
use std::path::Path;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Successes go to stdout; errors fail the command.
fn report(notice: Notice) -> Result<()> {
    match notice {
        Notice::Success(text) => {
            println!("{text}");
            Ok(())
        }
        Notice::Error(text) => bail!(text),
    }
}

pub fn parse_status<S: StatusKind>(value: Option<&str>) -> Result<Option<S>> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => {
            let wire = raw.to_uppercase();
            match S::from_wire(&wire) {
                Some(status) => Ok(Some(status)),
                None => {
                    let known: Vec<&str> = S::ALL.iter().map(|s| s.wire()).collect();
                    bail!("unknown status '{raw}', expected one of {}", known.join(", "))
                }
            }
        }
    }
}

async fn read_upload(path: &Path, mime: Option<&str>) -> Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no file name", path.display()))?;
    let upload = UploadFile::new(name, bytes);
    Ok(match mime {
        Some(mime) => upload.with_mime(mime),
        None => upload,
    })
}

fn cv_mime(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        _ => None,
    }
}

pub async fn personas(api: &dyn ScreeningApi) -> Result<()> {
    let mut form = PersonaForm::default();
    form.load(api.personas().await.context(forms::PERSONAS_FAILED)?);
    for persona in &form.personas {
        println!("{persona}");
    }
    Ok(())
}

pub async fn set_persona(
    api: &dyn ScreeningApi,
    persona: String,
    prompt_text: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut form = PersonaForm::default();
    form.select(&persona);
    if form.is_manual() {
        form.prompt_text = prompt_text.unwrap_or_default();
        form.description = description.unwrap_or_default();
    }
    report(form.submit(api).await)
}

pub async fn numbers(api: &dyn ScreeningApi) -> Result<()> {
    let numbers = api.phone_numbers().await.context(forms::NUMBERS_FAILED)?;
    for number in &numbers {
        println!("{}\t{}", number.phone_number, number.label());
    }
    Ok(())
}

pub async fn call(api: &dyn ScreeningApi, mut form: MakeCallForm) -> Result<()> {
    if form.from_number.is_empty() {
        let numbers = api.phone_numbers().await.context(forms::NUMBERS_FAILED)?;
        form.apply_numbers(&numbers);
    }
    report(form.submit(api).await)
}

pub async fn end_call(api: &dyn ScreeningApi, call_sid: &str) -> Result<()> {
    report(forms::end_call(api, call_sid).await)
}

pub async fn upload_candidates(api: &dyn ScreeningApi, path: &Path) -> Result<()> {
    let file = read_upload(path, Some("text/csv")).await?;
    report(forms::upload_candidates(api, Some(file)).await)
}

pub async fn upload_cvs(api: &dyn ScreeningApi, paths: &[std::path::PathBuf]) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_upload(path, cv_mime(path)).await?);
    }
    report(forms::upload_cvs(api, files).await)
}

pub fn template(saver: &DirectorySaver) -> Result<()> {
    save_csv_template(saver)?;
    if let Some(path) = saver.path_for(CSV_TEMPLATE_FILE) {
        println!("{}", path.display());
    }
    Ok(())
}

pub async fn records(api: &dyn ScreeningApi, status: Option<&str>, page: u32) -> Result<()> {
    let status = parse_status::<screening_core::models::CandidateStatus>(status)?;
    let query = SearchQuery::page(status.map(StatusKind::wire), page.max(1), PAGE_LIMIT);
    let page = api
        .search_records(&query)
        .await
        .context(screening_core::list::RECORDS_FAILED)?;
    print_json(&page)
}

pub async fn record(api: &dyn ScreeningApi, id: &str) -> Result<()> {
    match fetch_record(api, id).await {
        Remote::Ready(record) => print_json(&record),
        Remote::Absent => bail!(screening_core::detail::RECORD_NOT_FOUND),
        Remote::Errored(message) => bail!(message),
        Remote::NotStarted | Remote::Loading => Ok(()),
    }
}

pub async fn auto_trigger(api: &dyn ScreeningApi) -> Result<()> {
    report(forms::auto_trigger_outcome(&api.auto_trigger_call().await))
}

pub async fn interviews(api: &dyn ScreeningApi, status: Option<&str>, page: u32) -> Result<()> {
    let status = parse_status::<screening_core::models::CallStatus>(status)?;
    let query = SearchQuery::page(status.map(StatusKind::wire), page.max(1), PAGE_LIMIT);
    let page = api
        .search_interviews(&query)
        .await
        .context(screening_core::list::INTERVIEWS_FAILED)?;
    print_json(&page)
}

pub async fn interview(api: &dyn ScreeningApi, call_sid: &str) -> Result<()> {
    let detail = InterviewDetail::load(api, call_sid).await;

    match &detail.details {
        Remote::Ready(interview) => println!(
            "{} | {} | {} | {}",
            interview.call_sid,
            interview.candidate_name(),
            interview.candidate_phone(),
            interview.status.label()
        ),
        Remote::Errored(message) => println!("{message}"),
        _ => println!("{call_sid}"),
    }

    println!("\n== {} ==", Section::Recording.title());
    match detail.recording() {
        Remote::Ready(()) => {
            let (mp3, wav) = recording_urls(api, call_sid);
            println!("{mp3}\n{wav}");
        }
        Remote::Errored(message) => println!("{message}"),
        _ => println!("{}", Section::Recording.empty_message()),
    }

    for section in Section::ALL {
        let Some(state) = detail.text(section) else {
            continue;
        };
        println!("\n== {} ==", section.title());
        match state {
            Remote::Ready(text) => println!("{text}"),
            Remote::Errored(message) => println!("{message}"),
            _ => println!("{}", section.empty_message()),
        }
    }
    Ok(())
}

pub async fn download(
    api: &dyn ScreeningApi,
    saver: &DirectorySaver,
    call_sid: &str,
    kind: ExportKind,
) -> Result<()> {
    match download::export(api, saver, call_sid, kind).await {
        Ok(name) => {
            if let Some(path) = saver.path_for(&name) {
                println!("{}", path.display());
            }
            Ok(())
        }
        Err(message) => bail!(message),
    }
}

pub fn recording_url(api: &dyn ScreeningApi, call_sid: &str, wav: bool) {
    let format = if wav {
        RecordingFormat::Wav
    } else {
        RecordingFormat::Mp3
    };
    println!("{}", api.recording_url(call_sid, format));
}
