use crate::bridge::use_api;
use crate::components::{badge, filter_options, Pagination, StatusFilter};
use crate::nav::Link;
use leptos::*;
use screening_core::format::{check_mark, format_timestamp};
use screening_core::list::{FetchTicket, InterviewList, Phase};
use screening_core::models::{CallStatus, StatusKind};
use screening_core::routes::Route;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn Interviews() -> impl IntoView {
    let api = store_value(use_api());
    let list = create_rw_signal(InterviewList::interviews());

    let run = move |ticket: FetchTicket| {
        let api = api.get_value();
        spawn_local(async move {
            let result = api.search_interviews(&ticket.query).await;
            list.update(|l| {
                l.apply(&ticket, result);
            });
        });
    };
    if let Some(ticket) = list.try_update(InterviewList::begin_fetch) {
        run(ticket);
    }

    let on_filter = move |wire: String| {
        if let Some(ticket) = list.try_update(|l| l.set_filter(CallStatus::from_wire(&wire))) {
            run(ticket);
        }
    };
    let on_page = move |page: u32| {
        if let Some(Some(ticket)) = list.try_update(|l| l.go_to(page)) {
            run(ticket);
        }
    };

    view! {
      <h1>"Interviews"</h1>
      <StatusFilter options={filter_options::<CallStatus>()} on_change=on_filter/>

      {move || match list.with(|l| l.phase().clone()) {
        Phase::Idle | Phase::Loading => view! { <p>"Loading interviews..."</p> }.into_view(),
        Phase::Failed(message) => view! { <div class="alert alert-danger">{message}</div> }.into_view(),
        Phase::Ready if list.with(InterviewList::is_empty) => {
          view! { <p class="empty">"No interviews found."</p> }.into_view()
        }
        Phase::Ready => view! {
          <table class="table">
            <thead>
              <tr>
                <th>"Call SID"</th>
                <th>"Candidate"</th>
                <th>"Phone"</th>
                <th>"Status"</th>
                <th>"Created"</th>
                <th>"Transcript"</th>
                <th>"Analysis"</th>
                <th></th>
              </tr>
            </thead>
            <tbody>
              <For
                each=move || list.with(|l| l.items().to_vec())
                key=|i| i.call_sid.clone()
                children=move |i| view! {
                  <tr>
                    <td title=i.call_sid.clone()>{i.short_sid()}</td>
                    <td>{i.candidate_name().to_string()}</td>
                    <td>{i.candidate_phone().to_string()}</td>
                    <td>{badge(i.status)}</td>
                    <td>{format_timestamp(i.created_at.as_deref())}</td>
                    <td>{check_mark(i.has_transcript())}</td>
                    <td>{check_mark(i.has_analysis())}</td>
                    <td><Link route=Route::Interview(i.call_sid.clone()) class="btn btn-sm">"View"</Link></td>
                  </tr>
                }
              />
            </tbody>
          </table>
          <Pagination controls=Signal::derive(move || list.with(|l| l.controls())) on_page=on_page/>
        }
        .into_view(),
      }}
    }
}
