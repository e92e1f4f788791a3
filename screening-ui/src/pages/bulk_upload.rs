use crate::bridge::{read_upload, read_uploads, selected_files, use_api};
use crate::components::NoticeBanner;
use crate::download::BrowserSaver;
use leptos::html::Input;
use leptos::*;
use screening_core::download::save_csv_template;
use screening_core::forms::{self, check_candidate_file, check_cv_files, Notice, UploadTab};
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};

fn clear_input(input: NodeRef<Input>) {
    if let Some(el) = input.get_untracked() {
        el.set_value("");
    }
}

#[component]
pub fn BulkUpload() -> impl IntoView {
    let api = store_value(use_api());
    let tab = create_rw_signal(UploadTab::Candidates);
    let csv_file = create_rw_signal(None::<File>);
    let cv_files = create_rw_signal(Vec::<File>::new());
    let notice = create_rw_signal(None::<Notice>);
    let busy = create_rw_signal(false);
    let csv_input = create_node_ref::<Input>();
    let cv_input = create_node_ref::<Input>();

    let switch = move |next: UploadTab| {
        tab.set(next);
        notice.set(None);
    };

    let upload_csv = move |_: ev::MouseEvent| {
        let file = match check_candidate_file(csv_file.get_untracked()) {
            Ok(file) => file,
            Err(e) => return notice.set(Some(e.into())),
        };
        let api = api.get_value();
        busy.set(true);
        spawn_local(async move {
            let outcome = match read_upload(&file).await {
                Ok(upload) => forms::upload_candidates(&*api, Some(upload)).await,
                Err(e) => {
                    logging::warn!("{e}");
                    Notice::Error("Failed to upload candidates. Please try again.".into())
                }
            };
            if outcome.is_success() {
                csv_file.set(None);
                clear_input(csv_input);
            }
            notice.set(Some(outcome));
            busy.set(false);
        });
    };

    let upload_cvs = move |_: ev::MouseEvent| {
        let files = match check_cv_files(cv_files.get_untracked()) {
            Ok(files) => files,
            Err(e) => return notice.set(Some(e.into())),
        };
        let api = api.get_value();
        busy.set(true);
        spawn_local(async move {
            let outcome = match read_uploads(&files).await {
                Ok(uploads) => forms::upload_cvs(&*api, uploads).await,
                Err(e) => {
                    logging::warn!("{e}");
                    Notice::Error("Failed to upload CV files. Please try again.".into())
                }
            };
            if outcome.is_success() {
                cv_files.set(Vec::new());
                clear_input(cv_input);
            }
            notice.set(Some(outcome));
            busy.set(false);
        });
    };

    let template = move |_: ev::MouseEvent| {
        if let Err(e) = save_csv_template(&BrowserSaver) {
            logging::warn!("template download: {e}");
            notice.set(Some(Notice::Error(
                "Failed to download template. Please try again.".into(),
            )));
        }
    };

    view! {
      <h1>"Bulk Upload"</h1>
      <div class="tabs">
        <button
          class=move || if tab.get() == UploadTab::Candidates { "tab active" } else { "tab" }
          on:click=move |_| switch(UploadTab::Candidates)
        >"Upload Candidates"</button>
        <button
          class=move || if tab.get() == UploadTab::Cvs { "tab active" } else { "tab" }
          on:click=move |_| switch(UploadTab::Cvs)
        >"Upload CVs"</button>
      </div>
      <NoticeBanner notice=notice/>

      <Show
        when=move || tab.get() == UploadTab::Candidates
        fallback=move || view! {
          <section class="panel">
            <p>"Upload PDF or Word CVs. File names must match the CV column of the candidate CSV."</p>
            <input
              type="file"
              multiple=true
              accept=".pdf,.doc,.docx"
              node_ref=cv_input
              on:change=move |ev| {
                let input: HtmlInputElement = event_target(&ev);
                cv_files.set(selected_files(&input));
                notice.set(None);
              }
            />
            <p class="meta">{move || format!("{} file(s) selected", cv_files.with(Vec::len))}</p>
            <button class="btn btn-primary" disabled=move || busy.get() on:click=upload_cvs>
              {move || if busy.get() { "Uploading..." } else { "Upload CVs" }}
            </button>
          </section>
        }
      >
        <section class="panel">
          <p>"Upload a CSV with one candidate per row."</p>
          <button class="btn btn-link" on:click=template>"Download CSV template"</button>
          <input
            type="file"
            accept=".csv"
            node_ref=csv_input
            on:change=move |ev| {
              let input: HtmlInputElement = event_target(&ev);
              csv_file.set(selected_files(&input).into_iter().next());
              notice.set(None);
            }
          />
          <button class="btn btn-primary" disabled=move || busy.get() on:click=upload_csv>
            {move || if busy.get() { "Uploading..." } else { "Upload Candidates" }}
          </button>
        </section>
      </Show>
    }
}
