use crate::bridge::use_api;
use crate::components::{badge, filter_options, NoticeBanner, Pagination, StatusFilter};
use crate::nav::Link;
use leptos::*;
use screening_core::format::check_mark;
use screening_core::forms::{auto_trigger_outcome, Notice};
use screening_core::list::{FetchTicket, Phase, RecordList};
use screening_core::models::{CandidateStatus, StatusKind};
use screening_core::routes::Route;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn BulkRecords() -> impl IntoView {
    let api = store_value(use_api());
    let list = create_rw_signal(RecordList::records());
    let notice = create_rw_signal(None::<Notice>);
    let triggering = create_rw_signal(false);

    let run = move |ticket: FetchTicket| {
        let api = api.get_value();
        spawn_local(async move {
            let result = api.search_records(&ticket.query).await;
            list.update(|l| {
                l.apply(&ticket, result);
            });
        });
    };
    let refresh = move || {
        if let Some(ticket) = list.try_update(RecordList::begin_fetch) {
            run(ticket);
        }
    };
    refresh();

    let on_filter = move |wire: String| {
        if let Some(ticket) = list.try_update(|l| l.set_filter(CandidateStatus::from_wire(&wire))) {
            run(ticket);
        }
    };
    let on_page = move |page: u32| {
        if let Some(Some(ticket)) = list.try_update(|l| l.go_to(page)) {
            run(ticket);
        }
    };

    let auto_trigger = move |_: ev::MouseEvent| {
        let api = api.get_value();
        triggering.set(true);
        notice.set(None);
        spawn_local(async move {
            let result = api.auto_trigger_call().await;
            notice.set(Some(auto_trigger_outcome(&result)));
            triggering.set(false);
            if result.is_ok() {
                refresh();
            }
        });
    };

    view! {
      <div class="row">
        <h1>"Bulk Records"</h1>
        <button class="btn btn-success" disabled=move || triggering.get() on:click=auto_trigger>
          {move || if triggering.get() { "Triggering..." } else { "Auto-Trigger Call" }}
        </button>
      </div>
      <NoticeBanner notice=notice/>
      <StatusFilter options={filter_options::<CandidateStatus>()} on_change=on_filter/>

      {move || match list.with(|l| l.phase().clone()) {
        Phase::Idle | Phase::Loading => view! { <p>"Loading records..."</p> }.into_view(),
        Phase::Failed(message) => view! { <div class="alert alert-danger">{message}</div> }.into_view(),
        Phase::Ready if list.with(RecordList::is_empty) => {
          view! { <p class="empty">"No records found."</p> }.into_view()
        }
        Phase::Ready => view! {
          <table class="table">
            <thead>
              <tr>
                <th>"Name"</th>
                <th>"Phone Number"</th>
                <th>"Location"</th>
                <th>"Product"</th>
                <th>"Designation"</th>
                <th>"Status"</th>
                <th>"CV"</th>
                <th></th>
              </tr>
            </thead>
            <tbody>
              <For
                each=move || list.with(|l| l.items().to_vec())
                key=|r| r.id.clone()
                children=move |r| view! {
                  <tr>
                    <td>{r.name.clone()}</td>
                    <td>{r.phone_number.clone()}</td>
                    <td>{r.location.clone()}</td>
                    <td>{r.product.clone()}</td>
                    <td>{r.designation.clone()}</td>
                    <td>{badge(r.status)}</td>
                    <td>{check_mark(r.has_cv_info)}</td>
                    <td><Link route=Route::BulkRecord(r.id.clone()) class="btn btn-sm">"View"</Link></td>
                  </tr>
                }
              />
            </tbody>
          </table>
          <p class="meta">{move || format!("{} records", list.with(|l| l.total()))}</p>
          <Pagination controls=Signal::derive(move || list.with(|l| l.controls())) on_page=on_page/>
        }
        .into_view(),
      }}
    }
}
