use leptos::*;
use screening_core::routes::Route;
use wasm_bindgen::JsValue;

/// The active route, driven by `history.pushState` and `popstate`.
#[derive(Clone, Copy)]
pub struct Router(RwSignal<Route>);

impl Router {
    pub fn route(self) -> Route {
        self.0.get()
    }

    pub fn go(self, route: Route) {
        let path = route.path();
        match window().history() {
            Ok(history) => {
                if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&path)) {
                    logging::warn!("pushState to {path} failed: {e:?}");
                }
            }
            Err(e) => logging::warn!("history unavailable: {e:?}"),
        }
        self.0.set(route);
    }
}

fn current_path() -> Route {
    window()
        .location()
        .pathname()
        .map(|p| Route::parse(&p))
        .unwrap_or(Route::Home)
}

pub fn provide_router() -> Router {
    let router = Router(create_rw_signal(current_path()));
    provide_context(router);
    let _ = window_event_listener(ev::popstate, move |_| router.0.set(current_path()));
    router
}

pub fn use_router() -> Router {
    expect_context::<Router>()
}

#[component]
pub fn Link(
    route: Route,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = route.path();
    view! {
      <a
        href=href
        class=class
        on:click=move |ev: ev::MouseEvent| {
          if ev.ctrl_key() || ev.meta_key() || ev.shift_key() {
            return;
          }
          ev.prevent_default();
          router.go(route.clone());
        }
      >
        {children()}
      </a>
    }
}
