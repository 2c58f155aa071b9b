use leptos::*;

use crate::overlay::PopupState;
use crate::session::MapSession;

/// Details of the selected feature
#[component]
#[must_use]
pub fn Popup(session: RwSignal<MapSession>) -> impl IntoView {
    let popup = create_memo(move |_| session.with(|s| s.overlay().popup().clone()));

    let close = move |_| session.update(MapSession::hide_popup);

    move || match popup.get() {
        PopupState::Hidden => ().into_view(),
        PopupState::Visible(html) => view! {
            <div class="popup">
                <button class="popup-close" on:click=close>"×"</button>
                <div class="popup-body" inner_html=html></div>
            </div>
        }
        .into_view(),
    }
}
