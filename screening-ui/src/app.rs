use crate::bridge::{self, Api};
use crate::nav::{provide_router, Link};
use crate::pages::bulk_record_detail::BulkRecordDetail;
use crate::pages::bulk_records::BulkRecords;
use crate::pages::bulk_upload::BulkUpload;
use crate::pages::home::Home;
use crate::pages::interview_detail::InterviewDetailPage;
use crate::pages::interviews::Interviews;
use crate::pages::make_call::MakeCall;
use crate::pages::personas::Personas;
use leptos::*;
use screening_core::routes::{Route, NAV};

#[component]
pub fn App() -> impl IntoView {
    match bridge::connect() {
        Ok(api) => provide_context::<Api>(api),
        Err(e) => {
            logging::error!("cannot reach backend: {e}");
            return view! { <pre class="error">{e.to_string()}</pre> }.into_view();
        }
    }
    let router = provide_router();

    view! {
      <nav class="navbar">
        <Link route=Route::Home class="brand">"Voice Screening"</Link>
        <ul class="nav-links">
          {NAV
            .iter()
            .filter(|r| **r != Route::Home)
            .map(|r| view! { <li><Link route=r.clone()>{r.title()}</Link></li> })
            .collect_view()}
        </ul>
      </nav>
      <main class="container">
        {move || page(router.route())}
      </main>
    }
    .into_view()
}

fn page(route: Route) -> View {
    match route {
        Route::Home => view! { <Home/> }.into_view(),
        Route::MakeCall => view! { <MakeCall/> }.into_view(),
        Route::BulkUpload => view! { <BulkUpload/> }.into_view(),
        Route::BulkRecords => view! { <BulkRecords/> }.into_view(),
        Route::BulkRecord(id) => view! { <BulkRecordDetail id=id/> }.into_view(),
        Route::Interviews => view! { <Interviews/> }.into_view(),
        Route::Interview(sid) => view! { <InterviewDetailPage call_sid=sid/> }.into_view(),
        Route::Personas => view! { <Personas/> }.into_view(),
        Route::NotFound => view! {
          <div class="alert alert-warning">
            <p>"Page not found."</p>
            <Link route=Route::Home>"Back to dashboard"</Link>
          </div>
        }
        .into_view(),
    }
}
