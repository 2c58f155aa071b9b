use leptos::*;
use leptos_meta::*;

use crate::api::HttpFetcher;
use crate::components::data_panel::DataPanel;
use crate::components::links::{AttributionBar, Links};
use crate::components::map_view::MapView;
use crate::components::popup::Popup;
use crate::components::statistics::Statistics;
use crate::components::status_bar::StatusBar;
use crate::models::{Attribution, DataSelection, MapProps, ViewArgs, ViewState};
use crate::projection::GeoBounds;
use crate::session::{load_data, load_statistics, select_feature, MapSession};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let fetcher = store_value(HttpFetcher::from_location());
    let session = create_rw_signal(MapSession::new(MapProps::default()));
    let view_state = create_rw_signal(ViewState::initial(&MapProps::default()));
    let map_bounds = create_rw_signal(None::<GeoBounds>);
    let attribution = create_rw_signal(None::<Attribution>);
    let (props_loaded, set_props_loaded) = create_signal(false);
    let (fit_extent, set_fit_extent) = create_signal(false);

    // Site settings decide the extent, so the map waits for them
    spawn_local(async move {
        let props = MapProps::load(&fetcher.get_value()).await;

        let query = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default();
        // Without a position in the URL the whole extent is shown
        let start = ViewArgs::parse(&query).clamped(&props);
        set_fit_extent.set(start.is_none());

        view_state.set(start.unwrap_or_else(|| ViewState::initial(&props)));
        session.update(|s| s.set_props(props));
        set_props_loaded.set(true);
    });

    let on_load = Callback::new(move |selection: Option<DataSelection>| {
        let bounds = map_bounds
            .get_untracked()
            .unwrap_or_else(|| session.with_untracked(|s| s.props().extent()));

        spawn_local(async move {
            load_data(&session, &fetcher.get_value(), selection, bounds).await;
        });
    });

    let on_select = Callback::new(move |index: usize| {
        spawn_local(async move {
            select_feature(&session, &fetcher.get_value(), index).await;
        });
    });

    let on_unselect = Callback::new(move |()| session.update(MapSession::unselect));

    let on_statistics = Callback::new(move |()| {
        spawn_local(async move {
            load_statistics(&session, &fetcher.get_value()).await;
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/road_visualiser.css"/>
        <Title text="Road Network Visualiser"/>

        <div class="app">
            <div class="map-area">
                {move || if props_loaded.get() {
                    view! {
                        <MapView
                            session=session
                            view_state=view_state
                            map_bounds=map_bounds
                            attribution=attribution
                            fit_extent=fit_extent.get_untracked()
                            on_select=on_select
                            on_unselect=on_unselect
                        />
                    }.into_view()
                } else {
                    view! { <div class="map-loading">"Loading map..."</div> }.into_view()
                }}
                <Popup session=session />
                <AttributionBar attribution=attribution />
            </div>
            <div class="sidebar">
                <DataPanel on_load=on_load />
                <StatusBar session=session />
                <Links session=session view_state=view_state />
                <Statistics session=session on_request=on_statistics />
            </div>
        </div>
    }
}
