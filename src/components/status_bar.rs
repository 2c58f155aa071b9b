use leptos::*;

use crate::session::MapSession;

#[component]
#[must_use]
pub fn StatusBar(session: RwSignal<MapSession>) -> impl IntoView {
    let status = create_memo(move |_| session.with(MapSession::status));
    let malformed = create_memo(move |_| session.with(|s| s.diagnostics().last_malformed));

    view! {
        <div class="status" id=move || format!("result_status_{}", status.get().region())>
            {move || status.get().message()}
            {move || {
                let count = malformed.get();
                (count > 0).then(|| view! {
                    <span class="status-malformed">{format!(" ({count} malformed)")}</span>
                })
            }}
        </div>
    }
}
