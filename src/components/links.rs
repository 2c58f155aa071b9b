use leptos::*;

use crate::models::{Attribution, ViewState};
use crate::session::MapSession;

/// Links that carry the current view: permalink, router, editor and translations
#[component]
#[must_use]
pub fn Links(session: RwSignal<MapSession>, view_state: RwSignal<ViewState>) -> impl IntoView {
    let page_path = web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default();

    let permalink = move || view_state.get().permalink_url(&page_path);
    let router = move || session.with(|s| view_state.get().router_url(s.props()));
    let edit = move || session.with(|s| view_state.get().edit_url(s.props()));
    let languages = move || session.with(|s| s.props().languages.clone());

    view! {
        <div class="links">
            <a id="permalink_url" href=permalink>"Permanent link to this view"</a>
            <a id="router_url" href=router>"Route planner"</a>
            {move || edit().map(|url| view! { <a id="edit_url" href=url target="edit">"Edit OSM data"</a> })}
            <span class="languages">
                {move || {
                    languages()
                        .into_iter()
                        .map(|language| {
                            let label = language.clone();
                            let href = move || session.with(|s| view_state.get().language_url(s.props(), &language));
                            view! { <a class="language" id=format!("lang_{label}_url") href=href>{label.clone()}</a> }
                        })
                        .collect_view()
                }}
            </span>
        </div>
    }
}

/// Data and tile credits of the visible base layer
#[component]
#[must_use]
pub fn AttributionBar(attribution: RwSignal<Option<Attribution>>) -> impl IntoView {
    move || {
        attribution.get().map(|attribution| view! {
            <div class="attribution">
                <span id="attribution_data" inner_html=attribution.data_html()></span>
                " | "
                <span id="attribution_tile" inner_html=attribution.tile_html()></span>
            </div>
        })
    }
}
