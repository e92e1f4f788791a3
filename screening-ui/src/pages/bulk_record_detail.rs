use crate::bridge::use_api;
use crate::components::badge;
use crate::nav::Link;
use leptos::*;
use screening_core::detail::{fetch_record, RECORD_NOT_FOUND};
use screening_core::format::{format_timestamp, or_na};
use screening_core::models::{CandidateRecord, ExtractedInfo};
use screening_core::routes::Route;
use screening_core::Remote;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn BulkRecordDetail(id: String) -> impl IntoView {
    let record = create_rw_signal(Remote::<CandidateRecord>::Loading);
    let api = use_api();
    spawn_local(async move {
        record.set(fetch_record(&*api, &id).await);
    });

    view! {
      <Link route=Route::BulkRecords class="btn btn-link">"← Back to Bulk Records"</Link>
      {move || match record.get() {
        Remote::NotStarted | Remote::Loading => view! { <p>"Loading record details..."</p> }.into_view(),
        Remote::Errored(message) => view! { <div class="alert alert-danger">{message}</div> }.into_view(),
        Remote::Absent => view! { <div class="alert alert-warning">{RECORD_NOT_FOUND}</div> }.into_view(),
        Remote::Ready(record) => record_view(record).into_view(),
      }}
    }
}

fn field(label: &'static str, value: Option<&str>) -> impl IntoView {
    view! {
      <div class="field">
        <span class="label">{label}": "</span>
        <span>{or_na(value).to_string()}</span>
      </div>
    }
}

fn record_view(record: CandidateRecord) -> impl IntoView {
    let interview = record.call_sid.clone().map(|sid| {
        view! {
          <div class="field">
            <span class="label">"Call SID: "</span>
            <Link route=Route::Interview(sid.clone())>{sid.clone()}</Link>
          </div>
        }
    });
    let cv = record.extracted().cloned().map(cv_view);

    view! {
      <h1>{record.name.clone()}</h1>
      <section class="panel">
        <h3>"Basic Information"</h3>
        {field("Phone Number", Some(&record.phone_number))}
        {field("Location", Some(&record.location))}
        {field("Product", Some(&record.product))}
        {field("Designation", Some(&record.designation))}
        <div class="field"><span class="label">"Status: "</span>{badge(record.status)}</div>
        {field("CV File", record.cv_filename.as_deref())}
        {interview}
        <div class="field">
          <span class="label">"Created: "</span>
          {format_timestamp(record.created_at.as_deref())}
        </div>
        <div class="field">
          <span class="label">"Updated: "</span>
          {format_timestamp(record.updated_at.as_deref())}
        </div>
      </section>
      {cv}
    }
}

fn cv_view(info: ExtractedInfo) -> impl IntoView {
    let personal = info.personal_info.map(|p| {
        view! {
          <section class="panel">
            <h3>"Personal Information"</h3>
            {field("Name", p.name.as_deref())}
            {field("Email", p.email.as_deref())}
            {field("Phone", p.phone.as_deref())}
            {field("Address", p.address.as_deref())}
            {field("City", p.city.as_deref())}
            {field("State", p.state.as_deref())}
          </section>
        }
    });

    let work = (!info.work_experience.is_empty()).then(|| {
        view! {
          <section class="panel">
            <h3>"Work Experience"</h3>
            {info
              .work_experience
              .into_iter()
              .map(|job| view! {
                <div class="entry">
                  <h4>{or_na(job.position.as_deref()).to_string()}" at "{or_na(job.company.as_deref()).to_string()}</h4>
                  {field("Duration", job.duration.as_deref())}
                  {field("Location", job.location.as_deref())}
                  <ul>
                    {job.responsibilities.into_iter().map(|r| view! { <li>{r}</li> }).collect_view()}
                  </ul>
                </div>
              })
              .collect_view()}
          </section>
        }
    });

    let education = (!info.education.is_empty()).then(|| {
        view! {
          <section class="panel">
            <h3>"Education"</h3>
            {info
              .education
              .into_iter()
              .map(|e| view! {
                <div class="entry">
                  {field("Institution", e.institution.as_deref())}
                  {field("Degree", e.degree.as_deref())}
                  {field("Field", e.field.as_deref())}
                  {field("Year", e.year.as_deref())}
                </div>
              })
              .collect_view()}
          </section>
        }
    });

    let skills = info.skills.map(|s| {
        let list = |items: Option<Vec<String>>| match items.filter(|i| !i.is_empty()) {
            Some(items) => items.join(", "),
            None => "N/A".to_string(),
        };
        view! {
          <section class="panel">
            <h3>"Skills"</h3>
            <div class="field"><span class="label">"Technical: "</span>{list(s.technical)}</div>
            <div class="field"><span class="label">"Soft: "</span>{list(s.soft)}</div>
          </section>
        }
    });

    let metrics = info.sales_metrics.map(|m| {
        view! {
          <section class="panel">
            <h3>"Sales Metrics"</h3>
            {field("Average Target Achievement", m.average_target_achievement.as_deref())}
            {field("Highest Sales Record", m.highest_sales_record.as_deref())}
            {field("Client Retention Rate", m.client_retention_rate.as_deref())}
            {field("Lead Conversion Rate", m.lead_conversion_rate.as_deref())}
            {field("Average Deal Size", m.average_deal_size.as_deref())}
            {field("Sales Cycle", m.sales_cycle.as_deref())}
          </section>
        }
    });

    view! {
      <h2>"CV Information"</h2>
      {personal}
      {work}
      {education}
      {skills}
      {metrics}
    }
}
