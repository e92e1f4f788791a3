//! Single-resource views: bulk record detail and interview detail.

use crate::client::{ScreeningApi, SearchQuery};
use crate::format::check_mark;
use crate::models::{CandidateRecord, Interview, RecordingFormat};
use crate::remote::Remote;

pub const RECORD_FAILED: &str = "Failed to fetch record details. Please try again.";
pub const RECORD_NOT_FOUND: &str = "Record not found.";

/// Sections of the interview detail page. Each owns its own load state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    AudioTranscript,
    AudioAnalysis,
    Transcript,
    Analysis,
    Recording,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::AudioTranscript,
        Section::AudioAnalysis,
        Section::Transcript,
        Section::Analysis,
        Section::Recording,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::AudioTranscript => "Audio Transcript",
            Section::AudioAnalysis => "Audio Analysis",
            Section::Transcript => "Transcript",
            Section::Analysis => "Analysis",
            Section::Recording => "Call Recording",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Section::AudioTranscript => "No audio transcript available for this call.",
            Section::AudioAnalysis => "No audio analysis available for this call.",
            Section::Transcript => "No transcript available for this call.",
            Section::Analysis => "No analysis available for this call.",
            Section::Recording => "No recording available for this call.",
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            Section::AudioTranscript => "Failed to fetch audio transcript. Please try again.",
            Section::AudioAnalysis => "Failed to fetch audio analysis. Please try again.",
            Section::Transcript => "Failed to fetch transcript. Please try again.",
            Section::Analysis => "Failed to fetch analysis. Please try again.",
            Section::Recording => "Failed to fetch interview details. Please try again.",
        }
    }
}

/// Everything the interview detail page shows, one [`Remote`] per
/// sub-resource. Recording presence derives from `details`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterviewDetail {
    pub call_sid: String,
    pub transcript: Remote<String>,
    pub analysis: Remote<String>,
    pub audio_transcript: Remote<String>,
    pub audio_analysis: Remote<String>,
    pub details: Remote<Interview>,
}

impl InterviewDetail {
    /// Fresh state for `call_sid` with every section loading.
    pub fn loading(call_sid: impl Into<String>) -> Self {
        Self {
            call_sid: call_sid.into(),
            transcript: Remote::Loading,
            analysis: Remote::Loading,
            audio_transcript: Remote::Loading,
            audio_analysis: Remote::Loading,
            details: Remote::Loading,
        }
    }

    /// Fetches all sub-resources concurrently; one failing does not hold up
    /// or overwrite the others.
    pub async fn load<A: ScreeningApi + ?Sized>(api: &A, call_sid: &str) -> Self {
        let (transcript, analysis, audio_transcript, audio_analysis, details) = futures::join!(
            fetch_transcript(api, call_sid),
            fetch_analysis(api, call_sid),
            fetch_audio_transcript(api, call_sid),
            fetch_audio_analysis(api, call_sid),
            fetch_interview(api, call_sid),
        );
        Self {
            call_sid: call_sid.to_string(),
            transcript,
            analysis,
            audio_transcript,
            audio_analysis,
            details,
        }
    }

    pub fn text(&self, section: Section) -> Option<&Remote<String>> {
        match section {
            Section::AudioTranscript => Some(&self.audio_transcript),
            Section::AudioAnalysis => Some(&self.audio_analysis),
            Section::Transcript => Some(&self.transcript),
            Section::Analysis => Some(&self.analysis),
            Section::Recording => None,
        }
    }

    pub fn text_mut(&mut self, section: Section) -> Option<&mut Remote<String>> {
        match section {
            Section::AudioTranscript => Some(&mut self.audio_transcript),
            Section::AudioAnalysis => Some(&mut self.audio_analysis),
            Section::Transcript => Some(&mut self.transcript),
            Section::Analysis => Some(&mut self.analysis),
            Section::Recording => None,
        }
    }

    pub fn has_recording(&self) -> bool {
        self.details.ready().is_some_and(Interview::has_recording)
    }

    /// Section title, ticked once its content is loaded.
    pub fn heading(&self, section: Section) -> String {
        let ready = match section {
            Section::Recording => self.has_recording(),
            other => self.text(other).is_some_and(|r| r.ready().is_some()),
        };
        if ready {
            format!("{} {}", section.title(), check_mark(true))
        } else {
            section.title().to_string()
        }
    }

    /// Recording load state: absent unless the call carries a recording id.
    pub fn recording(&self) -> Remote<()> {
        match &self.details {
            Remote::Ready(details) if details.has_recording() => Remote::Ready(()),
            Remote::Ready(_) => Remote::Absent,
            other => other.clone().map(|_| ()),
        }
    }
}

pub async fn fetch_transcript<A: ScreeningApi + ?Sized>(api: &A, call_sid: &str) -> Remote<String> {
    Remote::from_result(api.transcript(call_sid).await, Section::Transcript.error_message())
        .non_empty()
}

pub async fn fetch_analysis<A: ScreeningApi + ?Sized>(api: &A, call_sid: &str) -> Remote<String> {
    Remote::from_result(api.analysis(call_sid).await, Section::Analysis.error_message())
        .non_empty()
}

pub async fn fetch_audio_transcript<A: ScreeningApi + ?Sized>(
    api: &A,
    call_sid: &str,
) -> Remote<String> {
    Remote::from_optional(
        api.audio_transcript(call_sid).await,
        Section::AudioTranscript.error_message(),
    )
    .non_empty()
}

pub async fn fetch_audio_analysis<A: ScreeningApi + ?Sized>(
    api: &A,
    call_sid: &str,
) -> Remote<String> {
    Remote::from_optional(
        api.audio_analysis(call_sid).await,
        Section::AudioAnalysis.error_message(),
    )
    .non_empty()
}

/// Call details come from the interview search, narrowed to this SID.
pub async fn fetch_interview<A: ScreeningApi + ?Sized>(
    api: &A,
    call_sid: &str,
) -> Remote<Interview> {
    let query = SearchQuery {
        call_sid: Some(call_sid.to_string()),
        ..SearchQuery::page(None, 1, crate::list::PAGE_LIMIT)
    };
    let found = api.search_interviews(&query).await.map(|page| {
        page.items
            .into_iter()
            .find(|interview| interview.call_sid == call_sid)
    });
    match Remote::from_result(found, Section::Recording.error_message()) {
        Remote::Ready(Some(interview)) => Remote::Ready(interview),
        Remote::Ready(None) => Remote::Absent,
        other => other.map(|_| Interview::default()),
    }
}

pub async fn fetch_record<A: ScreeningApi + ?Sized>(api: &A, id: &str) -> Remote<CandidateRecord> {
    match Remote::from_result(api.bulk_record(id).await, RECORD_FAILED) {
        Remote::Ready(Some(record)) => Remote::Ready(record),
        Remote::Ready(None) => Remote::Absent,
        other => other.map(|_| CandidateRecord::default()),
    }
}

/// Playback URLs for the recording: the default (MP3) and the WAV alternate.
pub fn recording_urls<A: ScreeningApi + ?Sized>(api: &A, call_sid: &str) -> (String, String) {
    (
        api.recording_url(call_sid, RecordingFormat::Mp3),
        api.recording_url(call_sid, RecordingFormat::Wav),
    )
}
