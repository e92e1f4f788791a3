use leptos::*;
use screening_core::forms::Notice;
use screening_core::list::PageControls;
use screening_core::models::StatusKind;

#[component]
pub fn NoticeBanner(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            let class = if n.is_success() {
                "alert alert-success"
            } else {
                "alert alert-danger"
            };
            view! { <div class=class>{n.text().to_string()}</div> }
        })
    }
}

pub fn badge<S: StatusKind>(status: S) -> impl IntoView {
    view! { <span class=format!("badge {}", status.badge())>{status.label()}</span> }
}

/// "All" plus one option per status; the empty value clears the filter.
pub fn filter_options<S: StatusKind>() -> Vec<(&'static str, &'static str)> {
    S::ALL.iter().map(|s| (s.wire(), s.label())).collect()
}

#[component]
pub fn StatusFilter(
    options: Vec<(&'static str, &'static str)>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
      <div class="filter">
        <label>"Status: "</label>
        <select on:change=move |ev| on_change.call(event_target_value(&ev))>
          <option value="">"All"</option>
          {options
            .into_iter()
            .map(|(wire, label)| view! { <option value=wire>{label}</option> })
            .collect_view()}
        </select>
      </div>
    }
}

#[component]
pub fn Pagination(
    #[prop(into)] controls: Signal<PageControls>,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    view! {
      <nav class="pagination">
        <button
          disabled=move || controls.get().first_disabled()
          on:click=move |_| on_page.call(1)
        >"First"</button>
        <button
          disabled=move || controls.get().prev_disabled()
          on:click=move |_| on_page.call(controls.get_untracked().prev())
        >"Previous"</button>
        {move || {
          let c = controls.get();
          c.pages()
            .map(|page| {
              let class = if page == c.current { "page active" } else { "page" };
              view! { <button class=class on:click=move |_| on_page.call(page)>{page}</button> }
            })
            .collect_view()
        }}
        <button
          disabled=move || controls.get().next_disabled()
          on:click=move |_| on_page.call(controls.get_untracked().next())
        >"Next"</button>
        <button
          disabled=move || controls.get().last_disabled()
          on:click=move |_| on_page.call(controls.get_untracked().total_pages)
        >"Last"</button>
      </nav>
    }
}
