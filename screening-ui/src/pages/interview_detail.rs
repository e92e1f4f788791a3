use crate::bridge::{use_api, Api};
use crate::components::badge;
use crate::download::BrowserSaver;
use crate::nav::Link;
use leptos::*;
use screening_core::detail::{
    fetch_analysis, fetch_audio_analysis, fetch_audio_transcript, fetch_interview,
    fetch_transcript, recording_urls, InterviewDetail, Section,
};
use screening_core::download::{export, save_audio_text, SectionExport};
use screening_core::format::format_timestamp;
use screening_core::routes::Route;
use screening_core::Remote;
use std::collections::HashMap;
use wasm_bindgen_futures::spawn_local;

// Each sub-resource resolves on its own and patches only its slot.
fn load_section(api: Api, detail: RwSignal<InterviewDetail>, call_sid: String, section: Section) {
    spawn_local(async move {
        let loaded = match section {
            Section::Transcript => fetch_transcript(&*api, &call_sid).await,
            Section::Analysis => fetch_analysis(&*api, &call_sid).await,
            Section::AudioTranscript => fetch_audio_transcript(&*api, &call_sid).await,
            Section::AudioAnalysis => fetch_audio_analysis(&*api, &call_sid).await,
            Section::Recording => {
                let details = fetch_interview(&*api, &call_sid).await;
                detail.update(|d| d.details = details);
                return;
            }
        };
        detail.update(|d| {
            if let Some(slot) = d.text_mut(section) {
                *slot = loaded;
            }
        });
    });
}

#[component]
pub fn InterviewDetailPage(call_sid: String) -> impl IntoView {
    let api = store_value(use_api());
    let detail = create_rw_signal(InterviewDetail::loading(call_sid.clone()));
    let download_errors = create_rw_signal(HashMap::<Section, String>::new());
    let sid = store_value(call_sid.clone());

    for section in Section::ALL {
        load_section(api.get_value(), detail, call_sid.clone(), section);
    }

    let download = move |section: Section| {
        let Some(target) = SectionExport::of(section) else {
            return;
        };
        let call_sid = sid.get_value();
        download_errors.update(|m| {
            m.remove(&section);
        });
        match target {
            SectionExport::Audio(which) => {
                let text = detail.with_untracked(|d| d.text(section).and_then(|r| r.ready().cloned()));
                let Some(text) = text else { return };
                if let Err(e) = save_audio_text(&BrowserSaver, &call_sid, which, &text) {
                    logging::warn!("audio export: {e}");
                    download_errors.update(|m| {
                        m.insert(section, target.failure_message());
                    });
                }
            }
            SectionExport::Server(kind) => {
                let api = api.get_value();
                spawn_local(async move {
                    if let Err(message) = export(&*api, &BrowserSaver, &call_sid, kind).await {
                        download_errors.update(|m| {
                            m.insert(section, message);
                        });
                    }
                });
            }
        }
    };

    let text_section = move |section: Section| {
        view! {
          <section class="panel">
            <div class="row">
              <h3>{move || detail.with(|d| d.heading(section))}</h3>
              <button
                class="btn btn-sm"
                disabled=move || detail.with(|d| d.text(section).and_then(Remote::ready).is_none())
                on:click=move |_| download(section)
              >"Download"</button>
            </div>
            {move || download_errors.with(|m| m.get(&section).cloned()).map(|message| {
              view! { <div class="alert alert-danger">{message}</div> }
            })}
            {move || match detail.with(|d| d.text(section).cloned().unwrap_or_default()) {
              Remote::NotStarted | Remote::Loading => view! { <p>"Loading..."</p> }.into_view(),
              Remote::Errored(message) => view! { <div class="alert alert-danger">{message}</div> }.into_view(),
              Remote::Absent => view! { <p class="empty">{section.empty_message()}</p> }.into_view(),
              Remote::Ready(text) => view! { <pre class="document">{text}</pre> }.into_view(),
            }}
          </section>
        }
    };

    let header = move || {
        detail.with(|d| d.details.ready().cloned()).map(|i| {
            view! {
              <section class="panel">
                <div class="field"><span class="label">"Candidate: "</span>{i.candidate_name().to_string()}</div>
                <div class="field"><span class="label">"Phone: "</span>{i.candidate_phone().to_string()}</div>
                <div class="field"><span class="label">"Status: "</span>{badge(i.status)}</div>
                <div class="field"><span class="label">"Created: "</span>{format_timestamp(i.created_at.as_deref())}</div>
              </section>
            }
        })
    };

    let recording = move || {
        let section = Section::Recording;
        match detail.with(InterviewDetail::recording) {
            Remote::NotStarted | Remote::Loading => view! { <p>"Loading..."</p> }.into_view(),
            Remote::Errored(message) => view! { <div class="alert alert-danger">{message}</div> }.into_view(),
            Remote::Absent => view! { <p class="empty">{section.empty_message()}</p> }.into_view(),
            Remote::Ready(()) => {
                let (mp3, wav) = recording_urls(&*api.get_value(), &sid.get_value());
                view! {
                  <audio controls=true src=mp3>
                    "Your browser does not support the audio element."
                  </audio>
                  <p class="meta">
                    "For WAV format, "
                    <a href=wav target="_blank" rel="noopener">"click here"</a>
                  </p>
                }
                .into_view()
            }
        }
    };

    view! {
      <Link route=Route::Interviews class="btn btn-link">"← Back to Interviews"</Link>
      <h1>"Interview Details"</h1>
      <p class="meta">{call_sid}</p>
      {header}
      <section class="panel">
        <h3>{move || detail.with(|d| d.heading(Section::Recording))}</h3>
        {recording}
      </section>
      {text_section(Section::AudioTranscript)}
      {text_section(Section::AudioAnalysis)}
      {text_section(Section::Transcript)}
      {text_section(Section::Analysis)}
    }
}
