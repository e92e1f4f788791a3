use crate::nav::Link;
use leptos::*;
use screening_core::routes::home_cards;

#[component]
pub fn Home() -> impl IntoView {
    view! {
      <h1>"Voice Screening Dashboard"</h1>
      <div class="cards">
        {home_cards()
          .into_iter()
          .map(|card| view! {
            <div class="card">
              <h3>{card.title}</h3>
              <p>{card.blurb}</p>
              <Link route=card.route class="btn btn-primary">{card.action}</Link>
            </div>
          })
          .collect_view()}
      </div>
    }
}
