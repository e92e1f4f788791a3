use crate::bridge::use_api;
use crate::components::NoticeBanner;
use leptos::*;
use screening_core::forms::{Notice, PersonaForm, PERSONAS_FAILED};
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn Personas() -> impl IntoView {
    let api = store_value(use_api());
    let form = create_rw_signal(PersonaForm::default());
    let notice = create_rw_signal(None::<Notice>);
    let saving = create_rw_signal(false);

    {
        let api = api.get_value();
        spawn_local(async move {
            match api.personas().await {
                Ok(list) => form.update(|f| f.load(list)),
                Err(e) => {
                    logging::warn!("personas: {e}");
                    notice.set(Some(Notice::Error(PERSONAS_FAILED.into())));
                }
            }
        });
    }

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let request = match form.with_untracked(PersonaForm::validate) {
            Ok(request) => request,
            Err(e) => return notice.set(Some(e.into())),
        };
        let api = api.get_value();
        saving.set(true);
        spawn_local(async move {
            let result = api.set_persona(&request).await;
            notice.set(Some(PersonaForm::outcome(&result)));
            saving.set(false);
        });
    };

    view! {
      <h1>"Persona Settings"</h1>
      <NoticeBanner notice=notice/>
      <form class="stack" on:submit=submit>
        <label>"Persona"</label>
        <select
          prop:value=move || form.with(|f| f.selected.clone())
          on:change=move |ev| {
            let persona = event_target_value(&ev);
            form.update(|f| f.select(&persona));
            notice.set(None);
          }
        >
          <For
            each=move || form.with(|f| f.personas.clone())
            key=|p| p.clone()
            children=move |p| view! { <option value=p.clone()>{p.clone()}</option> }
          />
        </select>

        <Show when=move || form.with(PersonaForm::is_manual) fallback=|| ()>
          <label>"Description"</label>
          <input
            placeholder="Short description of this persona"
            prop:value=move || form.with(|f| f.description.clone())
            on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
          />
          <label>"Prompt Text *"</label>
          <textarea
            rows=10
            placeholder="System prompt for the interviewer"
            prop:value=move || form.with(|f| f.prompt_text.clone())
            on:input=move |ev| form.update(|f| f.prompt_text = event_target_value(&ev))
          ></textarea>
        </Show>

        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
          {move || if saving.get() { "Saving..." } else { "Set Persona" }}
        </button>
      </form>
    }
}
