use leptos::*;

use crate::session::MapSession;

/// Link that fetches the database statistics and then shows them in its place
#[component]
#[must_use]
pub fn Statistics(session: RwSignal<MapSession>, on_request: Callback<()>) -> impl IntoView {
    let statistics = create_memo(move |_| session.with(|s| s.statistics().map(str::to_string)));

    move || match statistics.get() {
        Some(html) => view! { <div class="statistics" id="statistics_data" inner_html=html></div> }.into_view(),
        None => view! {
            <a class="statistics-link" id="statistics_link" href="#" on:click=move |ev| {
                ev.prevent_default();
                on_request.call(());
            }>
                "Show statistics"
            </a>
        }
        .into_view(),
    }
}
