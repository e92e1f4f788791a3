use crate::bridge::use_api;
use crate::components::NoticeBanner;
use leptos::*;
use screening_core::forms::{MakeCallForm, Notice, NUMBERS_FAILED};
use screening_core::models::PhoneNumber;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn MakeCall() -> impl IntoView {
    let api = store_value(use_api());
    let form = create_rw_signal(MakeCallForm::default());
    let numbers = create_rw_signal(Vec::<PhoneNumber>::new());
    let notice = create_rw_signal(None::<Notice>);
    let submitting = create_rw_signal(false);

    {
        let api = api.get_value();
        spawn_local(async move {
            match api.phone_numbers().await {
                Ok(list) => {
                    form.update(|f| f.apply_numbers(&list));
                    numbers.set(list);
                }
                Err(e) => {
                    logging::warn!("phone numbers: {e}");
                    notice.set(Some(Notice::Error(NUMBERS_FAILED.into())));
                }
            }
        });
    }

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(MakeCallForm::validate) {
            Ok(request) => request,
            Err(e) => {
                notice.set(Some(e.into()));
                return;
            }
        };
        let api = api.get_value();
        submitting.set(true);
        notice.set(None);
        spawn_local(async move {
            let result = api.initiate_call(&request).await;
            notice.set(Some(MakeCallForm::outcome(&result)));
            if result.is_ok() {
                form.update(MakeCallForm::reset);
            }
            submitting.set(false);
        });
    };

    view! {
      <h1>"Make Call"</h1>
      <NoticeBanner notice=notice/>
      <form class="stack" on:submit=submit>
        <label>"Call From"</label>
        <select
          prop:value=move || form.with(|f| f.from_number.clone())
          on:change=move |ev| form.update(|f| f.from_number = event_target_value(&ev))
        >
          <For
            each=move || numbers.get()
            key=|n| n.sid.clone()
            children=move |n| view! { <option value=n.phone_number.clone()>{n.label()}</option> }
          />
        </select>

        <label>"Phone Number *"</label>
        <input
          type="tel"
          placeholder="+919876543210"
          prop:value=move || form.with(|f| f.number.clone())
          on:input=move |ev| form.update(|f| f.number = event_target_value(&ev))
        />
        <label>"Candidate Name"</label>
        <input
          prop:value=move || form.with(|f| f.name.clone())
          on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
        />
        <label>"Location"</label>
        <input
          prop:value=move || form.with(|f| f.location.clone())
          on:input=move |ev| form.update(|f| f.location = event_target_value(&ev))
        />
        <label>"Product"</label>
        <input
          prop:value=move || form.with(|f| f.product.clone())
          on:input=move |ev| form.update(|f| f.product = event_target_value(&ev))
        />

        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
          {move || if submitting.get() { "Initiating..." } else { "Make Call" }}
        </button>
      </form>
    }
}
