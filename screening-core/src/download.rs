//! File exports: the candidate CSV template and per-call text exports.
//!
//! Saving is a capability ([`FileSaver`]) so the same export logic drives
//! the browser (object URL + anchor) and the native shell (output directory).

use crate::client::ScreeningApi;
use crate::detail::Section;
use crate::models::ExportKind;
use thiserror::Error;
use tracing::debug;

pub const CSV_TEMPLATE_FILE: &str = "candidate_template.csv";
pub const CSV_TEMPLATE_HEADER: &str = "Name,Location,Product,Designation,Phone Number,CV";
pub const CSV_TEMPLATE_ROWS: [&str; 2] = [
    "Rajan Preet,Delhi,Home loans,Sales Executive,919001378117,Ramya_V 1.pdf",
    "Rakesh Singh,Mumbai,Business loans,Sales Executive,918949950556,Smita_Kumari 1.pdf",
];

pub const CSV_MIME: &str = "text/csv";
pub const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Platform(String),
}

/// "Save these bytes under this name."
pub trait FileSaver {
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), SaveError>;
}

pub fn csv_template() -> String {
    std::iter::once(CSV_TEMPLATE_HEADER)
        .chain(CSV_TEMPLATE_ROWS)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn save_csv_template<S: FileSaver + ?Sized>(saver: &S) -> Result<(), SaveError> {
    saver.save(CSV_TEMPLATE_FILE, CSV_MIME, csv_template().as_bytes())
}

pub fn export_file_name(call_sid: &str, kind: ExportKind) -> String {
    format!("{call_sid}_{}.txt", kind.as_str())
}

/// Audio exports are built from text the detail page already holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioExport {
    Transcript,
    Analysis,
}

impl AudioExport {
    pub fn file_name(self, call_sid: &str) -> String {
        match self {
            AudioExport::Transcript => format!("{call_sid}_audio_transcript.txt"),
            AudioExport::Analysis => format!("{call_sid}_audio_analysis.txt"),
        }
    }
}

/// How a detail section is exported, if at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionExport {
    Server(ExportKind),
    Audio(AudioExport),
}

impl SectionExport {
    pub fn of(section: Section) -> Option<Self> {
        match section {
            Section::Transcript => Some(SectionExport::Server(ExportKind::Transcript)),
            Section::Analysis => Some(SectionExport::Server(ExportKind::Analysis)),
            Section::AudioTranscript => Some(SectionExport::Audio(AudioExport::Transcript)),
            Section::AudioAnalysis => Some(SectionExport::Audio(AudioExport::Analysis)),
            Section::Recording => None,
        }
    }

    pub fn failure_message(self) -> String {
        match self {
            SectionExport::Server(kind) => download_failed(kind),
            SectionExport::Audio(AudioExport::Transcript) => {
                "Failed to download audio transcript. Please try again.".into()
            }
            SectionExport::Audio(AudioExport::Analysis) => {
                "Failed to download audio analysis. Please try again.".into()
            }
        }
    }
}

pub fn download_failed(kind: ExportKind) -> String {
    format!("Failed to download {}. Please try again.", kind.as_str())
}

/// Fetches a server-side export and hands it to `saver`. Any failure maps
/// to the section's download error message.
pub async fn export<A, S>(
    api: &A,
    saver: &S,
    call_sid: &str,
    kind: ExportKind,
) -> Result<String, String>
where
    A: ScreeningApi + ?Sized,
    S: FileSaver + ?Sized,
{
    let bytes = match api.download(call_sid, kind).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, call_sid, "export download failed");
            return Err(download_failed(kind));
        }
    };
    let name = export_file_name(call_sid, kind);
    saver.save(&name, TEXT_MIME, &bytes).map_err(|e| {
        debug!(error = %e, file = %name, "saving export failed");
        download_failed(kind)
    })?;
    Ok(name)
}

pub fn save_audio_text<S: FileSaver + ?Sized>(
    saver: &S,
    call_sid: &str,
    which: AudioExport,
    text: &str,
) -> Result<String, SaveError> {
    let name = which.file_name(call_sid);
    saver.save(&name, TEXT_MIME, text.as_bytes())?;
    Ok(name)
}
