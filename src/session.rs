//! The map session: overlay, status and request bookkeeping, plus the
//! async flows that fetch data and feed it through the builders.
//!
//! Every flow is split into a synchronous `begin_*` step, which updates the
//! session before anything is awaited, and a `finish_*` step applied when
//! the response arrives. Each data request gets a generation number, and
//! responses from a superseded generation are dropped.

use std::cell::RefCell;

use crate::api::{dump_url, DataRequest, Fetch};
use crate::builders::BuilderRegistry;
use crate::dump::{format_details, format_statistics};
use crate::models::{DataSelection, MapProps};
use crate::overlay::Overlay;
use crate::projection::{meters_per_pixel, to_projected, GeoBounds, LonLat};
use crate::protocol::decode;
use crate::status::Status;

/// Screen distance within which a click hits a feature
const CLICK_TOLERANCE_PX: f64 = 5.0;

/// Counters kept for troubleshooting odd responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Malformed records in the most recent response
    pub last_malformed: usize,
    pub total_malformed: usize,
    /// Lines skipped for having an empty id, across all responses
    pub skipped_lines: usize,
    /// Responses dropped because a newer request had started
    pub stale_responses: usize,
}

/// A data request that has been started but not answered
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLoad {
    generation: u64,
    pub selection: DataSelection,
    pub url: String,
}

/// A details request for a selected feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDump {
    generation: u64,
    feature: usize,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The overlay was cleared and nothing requested
    Cleared,
    Loaded { count: usize },
    Failed(String),
    /// A newer request replaced this one before it was answered
    Stale,
}

pub struct MapSession {
    props: MapProps,
    overlay: Overlay,
    status: Status,
    registry: BuilderRegistry,
    generation: u64,
    diagnostics: Diagnostics,
    statistics: Option<String>,
}

impl MapSession {
    #[must_use]
    pub fn new(props: MapProps) -> Self {
        Self::with_registry(props, BuilderRegistry::default())
    }

    #[must_use]
    pub fn with_registry(props: MapProps, registry: BuilderRegistry) -> Self {
        Self {
            props,
            overlay: Overlay::new(),
            status: Status::NoData,
            registry,
            generation: 0,
            diagnostics: Diagnostics::default(),
            statistics: None,
        }
    }

    #[must_use]
    pub fn props(&self) -> &MapProps {
        &self.props
    }

    pub fn set_props(&mut self, props: MapProps) {
        self.props = props;
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Statistics HTML, once fetched
    #[must_use]
    pub fn statistics(&self) -> Option<&str> {
        self.statistics.as_deref()
    }

    /// Clear the overlay and start a request for `selection` over `bounds`.
    ///
    /// With no selection the overlay is only cleared and `None` is returned.
    pub fn begin_load(&mut self, selection: Option<DataSelection>, bounds: GeoBounds) -> Option<PendingLoad> {
        self.generation += 1;
        self.overlay.clear();
        self.status = Status::NoData;

        let selection = selection?;
        let url = DataRequest::new(selection.clone(), bounds).url(&self.props.data_endpoint);
        crate::log!("Requesting {}", url);

        Some(PendingLoad {
            generation: self.generation,
            selection,
            url,
        })
    }

    /// Apply the response to a request started by [`Self::begin_load`]
    pub fn finish_load(&mut self, pending: PendingLoad, response: Result<String, String>) -> LoadOutcome {
        if pending.generation != self.generation {
            self.diagnostics.stale_responses += 1;
            crate::log!("Dropping stale response for {}", pending.url);
            return LoadOutcome::Stale;
        }

        let data_type = pending.selection.data_type;

        let built = response.and_then(|text| {
            let payload = decode(&text)?;
            let builder = self
                .registry
                .get(data_type)
                .ok_or_else(|| format!("No builder registered for {data_type}"))?;
            let output = builder.build(&payload.records);
            Ok((payload, output))
        });

        match built {
            Ok((payload, output)) => {
                let count = payload.records.len();

                self.diagnostics.last_malformed = output.malformed;
                self.diagnostics.total_malformed += output.malformed;
                self.diagnostics.skipped_lines += payload.skipped;

                if output.malformed > 0 {
                    leptos::logging::warn!("{} malformed {data_type} records", output.malformed);
                }

                self.overlay.install(payload.bounding_box, output.features);
                self.status = Status::Data { data_type, count };
                crate::log!("Loaded {} {} records", count, data_type);

                LoadOutcome::Loaded { count }
            }
            Err(e) => {
                leptos::logging::error!("Failed to load {data_type}: {e}");
                self.status = Status::Failed;
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Select and highlight a feature, returning the details request to make
    /// if the feature has a reference
    pub fn begin_select(&mut self, index: usize) -> Option<PendingDump> {
        self.overlay.unselect();
        let dump = self.overlay.select(index)?;

        Some(PendingDump {
            generation: self.generation,
            feature: index,
            url: dump_url(&self.props.data_endpoint, &dump),
        })
    }

    pub fn unselect(&mut self) {
        self.overlay.unselect();
    }

    /// Feature under a click at `position` on a map shown at `zoom`
    #[must_use]
    pub fn feature_at(&self, position: LonLat, zoom: u32) -> Option<usize> {
        if !self.overlay.selection_enabled() {
            return None;
        }

        let tolerance = CLICK_TOLERANCE_PX * meters_per_pixel(zoom);
        self.overlay.feature_at(to_projected(position), tolerance)
    }

    pub fn hide_popup(&mut self) {
        self.overlay.hide_popup();
    }

    /// Show details in the popup if their feature is still the selected one.
    ///
    /// Returns whether the popup was updated.
    pub fn finish_dump(&mut self, pending: &PendingDump, response: Result<String, String>) -> bool {
        if pending.generation != self.generation || self.overlay.selected() != Some(pending.feature) {
            self.diagnostics.stale_responses += 1;
            return false;
        }

        match response {
            Ok(text) => {
                let html = format_details(&text, self.props.browse_url());
                self.overlay.show_popup(html);
                true
            }
            Err(e) => {
                leptos::logging::warn!("Failed to fetch details: {e}");
                false
            }
        }
    }

    pub fn finish_statistics(&mut self, response: Result<String, String>) {
        match response {
            Ok(text) => self.statistics = Some(format_statistics(&text)),
            Err(e) => leptos::logging::error!("Failed to fetch statistics: {e}"),
        }
    }
}

/// Mutable access to a session shared with the UI
pub trait SessionCell {
    /// Run `f` on the session, or return `None` if it is no longer available
    fn with_session<R>(&self, f: impl FnOnce(&mut MapSession) -> R) -> Option<R>;
}

impl SessionCell for RefCell<MapSession> {
    fn with_session<R>(&self, f: impl FnOnce(&mut MapSession) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl SessionCell for leptos::RwSignal<MapSession> {
    fn with_session<R>(&self, f: impl FnOnce(&mut MapSession) -> R) -> Option<R> {
        leptos::SignalUpdate::try_update(self, f)
    }
}

/// Clear the overlay, then fetch and display `selection` over `bounds`.
///
/// Passing `None` only clears.
pub async fn load_data<S: SessionCell, F: Fetch>(
    session: &S,
    fetcher: &F,
    selection: Option<DataSelection>,
    bounds: GeoBounds,
) -> LoadOutcome {
    let Some(pending) = session.with_session(|s| s.begin_load(selection, bounds)).flatten() else {
        return LoadOutcome::Cleared;
    };

    let response = fetcher.get(&pending.url).await;

    session
        .with_session(|s| s.finish_load(pending, response))
        .unwrap_or(LoadOutcome::Stale)
}

/// Select a feature and show its details in the popup once they arrive
pub async fn select_feature<S: SessionCell, F: Fetch>(session: &S, fetcher: &F, index: usize) -> bool {
    let Some(pending) = session.with_session(|s| s.begin_select(index)).flatten() else {
        return false;
    };

    let response = fetcher.get(&pending.url).await;

    session
        .with_session(|s| s.finish_dump(&pending, response))
        .unwrap_or(false)
}

pub async fn load_statistics<S: SessionCell, F: Fetch>(session: &S, fetcher: &F) {
    let Some(url) = session.with_session(|s| s.props().statistics_endpoint.clone()) else {
        return;
    };

    let response = fetcher.get(&url).await;
    session.with_session(|s| s.finish_statistics(response));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, DataType};
    use futures::executor::block_on;
    use std::collections::HashMap;

    const JUNCTIONS: &str = "10 20 11 21\nA 10.5 20.5 2\nB 10.6 20.6 3\n";

    /// Answers from a fixed table and records every URL asked for
    #[derive(Default)]
    struct ScriptedFetcher {
        responses: HashMap<String, Result<String, String>>,
        requested: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn respond(mut self, url: &str, body: Result<&str, &str>) -> Self {
            self.responses
                .insert(url.to_string(), body.map(str::to_string).map_err(str::to_string));
            self
        }
    }

    impl Fetch for ScriptedFetcher {
        async fn get(&self, url: &str) -> Result<String, String> {
            self.requested.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(format!("404 for {url}")))
        }
    }

    fn bounds() -> GeoBounds {
        GeoBounds::new(10.0, 20.0, 11.0, 21.0)
    }

    fn junctions_url() -> String {
        DataRequest::new(DataSelection::new(DataType::Junctions), bounds()).url("visualiser.cgi")
    }

    fn session() -> RefCell<MapSession> {
        RefCell::new(MapSession::new(MapProps::default()))
    }

    #[test]
    fn test_load_success() {
        let session = session();
        let fetcher = ScriptedFetcher::default().respond(&junctions_url(), Ok(JUNCTIONS));

        let outcome = block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Junctions)), bounds()));

        assert_eq!(outcome, LoadOutcome::Loaded { count: 2 });
        let session = session.borrow();
        assert_eq!(session.status(), Status::Data { data_type: DataType::Junctions, count: 2 });
        assert_eq!(session.overlay().features().len(), 2);
        assert_eq!(session.overlay().bounding_box(), Some(&BoundingBox::new(10.0, 20.0, 11.0, 21.0)));
        assert!(session.overlay().selection_enabled());
    }

    #[test]
    fn test_clear_request_does_not_fetch() {
        let session = session();
        let fetcher = ScriptedFetcher::default().respond(&junctions_url(), Ok(JUNCTIONS));

        block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Junctions)), bounds()));
        session.borrow_mut().begin_select(0);

        let outcome = block_on(load_data(&session, &fetcher, None, bounds()));

        assert_eq!(outcome, LoadOutcome::Cleared);
        assert_eq!(fetcher.requested.borrow().len(), 1);
        let session = session.borrow();
        assert!(session.overlay().is_empty());
        assert_eq!(session.overlay().highlight(), None);
        assert_eq!(session.status(), Status::NoData);
    }

    #[test]
    fn test_failure_after_success_leaves_empty_overlay() {
        let session = session();
        let fetcher = ScriptedFetcher::default().respond(&junctions_url(), Ok(JUNCTIONS));
        block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Junctions)), bounds()));

        let outcome = block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Super)), bounds()));

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        let session = session.borrow();
        assert_eq!(session.status(), Status::Failed);
        assert!(session.overlay().is_empty());
    }

    #[test]
    fn test_bad_bounding_box_fails() {
        let session = session();
        let fetcher = ScriptedFetcher::default().respond(&junctions_url(), Ok("garbage\nA 1 2\n"));

        let outcome = block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Junctions)), bounds()));

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(session.borrow().status(), Status::Failed);
    }

    #[test]
    fn test_status_is_no_data_while_waiting() {
        let mut session = MapSession::new(MapProps::default());
        session.status = Status::Failed;

        let pending = session.begin_load(Some(DataSelection::new(DataType::Junctions)), bounds());

        assert!(pending.is_some());
        assert_eq!(session.status(), Status::NoData);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut session = MapSession::new(MapProps::default());

        let first = session.begin_load(Some(DataSelection::new(DataType::Junctions)), bounds());
        let second = session.begin_load(Some(DataSelection::new(DataType::Barrier)), bounds());

        let (Some(first), Some(second)) = (first, second) else {
            panic!("both requests should be pending");
        };

        assert_eq!(session.finish_load(first, Ok(JUNCTIONS.to_string())), LoadOutcome::Stale);
        assert!(session.overlay().is_empty());
        assert_eq!(session.diagnostics().stale_responses, 1);

        let outcome = session.finish_load(second, Ok("10 20 11 21\nb1 10.5 20.5\n".to_string()));
        assert_eq!(outcome, LoadOutcome::Loaded { count: 1 });
        assert_eq!(session.status(), Status::Data { data_type: DataType::Barrier, count: 1 });
    }

    #[test]
    fn test_clear_makes_pending_request_stale() {
        let mut session = MapSession::new(MapProps::default());
        let pending = session.begin_load(Some(DataSelection::new(DataType::Junctions)), bounds());
        session.begin_load(None, bounds());

        let outcome = pending.map(|p| session.finish_load(p, Ok(JUNCTIONS.to_string())));
        assert_eq!(outcome, Some(LoadOutcome::Stale));
        assert!(session.overlay().is_empty());
    }

    #[test]
    fn test_malformed_records_are_counted() {
        let mut session = MapSession::new(MapProps::default());
        let pending = session.begin_load(Some(DataSelection::new(DataType::Junctions)), bounds());

        let body = "10 20 11 21\nA 10.5 20.5 12\nB 10.6\n 10.7 20.7 1\n".to_string();
        let outcome = pending.map(|p| session.finish_load(p, Ok(body)));

        assert_eq!(outcome, Some(LoadOutcome::Loaded { count: 2 }));
        let diagnostics = session.diagnostics();
        assert_eq!(diagnostics.last_malformed, 2);
        assert_eq!(diagnostics.total_malformed, 2);
        assert_eq!(diagnostics.skipped_lines, 1);
        assert_eq!(session.overlay().features().len(), 1);
    }

    #[test]
    fn test_select_shows_linked_details() {
        let props = MapProps {
            browse_url: Some("https://osm.example/browse".to_string()),
            ..MapProps::default()
        };
        let session = RefCell::new(MapSession::new(props));
        let fetcher = ScriptedFetcher::default()
            .respond(&junctions_url(), Ok(JUNCTIONS))
            .respond("visualiser.cgi?dump=A", Ok("Node 7\nJunction"));

        block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Junctions)), bounds()));
        let shown = block_on(select_feature(&session, &fetcher, 0));

        assert!(shown);
        let session = session.borrow();
        assert!(session.overlay().highlight().is_some());
        assert_eq!(
            session.overlay().popup(),
            &crate::overlay::PopupState::Visible(
                "Node <a href='https://osm.example/browse/node/7' target='node7'>7</a><br>Junction".to_string()
            )
        );
    }

    #[test]
    fn test_details_for_previous_selection_are_dropped() {
        let mut session = MapSession::new(MapProps::default());
        let pending = session.begin_load(Some(DataSelection::new(DataType::Junctions)), bounds());
        if let Some(p) = pending {
            session.finish_load(p, Ok(JUNCTIONS.to_string()));
        }

        let first = session.begin_select(0);
        let second = session.begin_select(1);
        assert!(second.is_some());

        let updated = first.map(|p| session.finish_dump(&p, Ok("old".to_string())));
        assert_eq!(updated, Some(false));
        assert_eq!(session.overlay().popup(), &crate::overlay::PopupState::Hidden);
        assert_eq!(session.overlay().selected(), Some(1));
    }

    #[test]
    fn test_click_hit_test_scales_with_zoom() {
        let session = session();
        let fetcher = ScriptedFetcher::default().respond(&junctions_url(), Ok(JUNCTIONS));
        block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Junctions)), bounds()));

        let session = session.borrow();
        assert_eq!(session.feature_at(LonLat::new(20.5, 10.5), 14), Some(0));
        assert_eq!(session.feature_at(LonLat::new(20.6001, 10.6), 14), Some(1));

        // About 11 m off: a hit when zoomed out, a miss when zoomed in
        assert_eq!(session.feature_at(LonLat::new(20.6001, 10.6), 18), None);
        assert_eq!(session.feature_at(LonLat::new(20.55, 10.55), 14), None);
    }

    #[test]
    fn test_click_misses_after_clear() {
        let mut session = MapSession::new(MapProps::default());
        if let Some(p) = session.begin_load(Some(DataSelection::new(DataType::Junctions)), bounds()) {
            session.finish_load(p, Ok(JUNCTIONS.to_string()));
        }
        assert_eq!(session.feature_at(LonLat::new(20.5, 10.5), 14), Some(0));

        session.begin_load(None, bounds());
        assert_eq!(session.feature_at(LonLat::new(20.5, 10.5), 14), None);
    }

    #[test]
    fn test_unselect_hides_popup() {
        let session = session();
        let fetcher = ScriptedFetcher::default()
            .respond(&junctions_url(), Ok(JUNCTIONS))
            .respond("visualiser.cgi?dump=B", Ok("details"));

        block_on(load_data(&session, &fetcher, Some(DataSelection::new(DataType::Junctions)), bounds()));
        block_on(select_feature(&session, &fetcher, 1));
        session.borrow_mut().unselect();

        let session = session.borrow();
        assert_eq!(session.overlay().highlight(), None);
        assert_eq!(session.overlay().popup(), &crate::overlay::PopupState::Hidden);
    }

    #[test]
    fn test_statistics() {
        let session = session();
        let fetcher = ScriptedFetcher::default().respond("statistics.cgi", Ok("Nodes: 10 & counting"));

        block_on(load_statistics(&session, &fetcher));

        assert_eq!(session.borrow().statistics(), Some("<pre>Nodes: 10 &amp; counting</pre>"));
    }
}
