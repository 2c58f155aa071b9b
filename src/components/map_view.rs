use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::leaflet::{call, get, lat_lng, lat_lng_bounds, lat_lngs, leaflet, number, on, options, pair};
use crate::builders::MARKER_COLOR;
use crate::geometry::Geometry;
use crate::models::{Attribution, MapProps, StyledFeature, ViewState};
use crate::overlay::Overlay;
use crate::projection::{to_geographic, GeoBounds, LonLat};
use crate::session::MapSession;

/// Pane holding the highlight, stacked below Leaflet's overlay pane (400)
const HIGHLIGHT_PANE: &str = "highlights";
const HIGHLIGHT_PANE_Z_INDEX: &str = "350";

#[derive(Clone)]
struct MapLayers {
    features: JsValue,
    highlights: JsValue,
    bounding_box: JsValue,
}

#[component]
#[must_use]
pub fn MapView(
    session: RwSignal<MapSession>,
    view_state: RwSignal<ViewState>,
    map_bounds: RwSignal<Option<GeoBounds>>,
    attribution: RwSignal<Option<Attribution>>,
    /// Start zoomed to the whole extent rather than at `view_state`
    fit_extent: bool,
    on_select: Callback<usize>,
    on_unselect: Callback<()>,
) -> impl IntoView {
    let map_container_ref = create_node_ref::<leptos::html::Div>();
    let (layers, set_layers) = create_signal(None::<MapLayers>);

    create_effect(move |_| {
        let Some(container) = map_container_ref.get() else { return };
        if layers.get_untracked().is_some() {
            return;
        }

        let props = session.with_untracked(|s| s.props().clone());
        let start = view_state.get_untracked();

        match init_leaflet_map(&container, &props, start, fit_extent) {
            Ok((map, map_layers)) => {
                if let Err(e) = register_events(&map, &props, session, view_state, map_bounds, attribution, on_select, on_unselect) {
                    leptos::logging::error!("Failed to register map events: {:?}", e);
                }
                attribution.set(props.map_data.first().map(|tiles| tiles.attribution.clone()));
                update_view(&map, view_state, map_bounds);
                set_layers.set(Some(map_layers));
            }
            Err(e) => leptos::logging::error!("Failed to initialize Leaflet map: {:?}", e),
        }
    });

    // Redraw features only when the feature set is replaced
    let revision = create_memo(move |_| session.with(|s| s.overlay().revision()));
    create_effect(move |_| {
        revision.track();
        let Some(map_layers) = layers.get() else { return };

        session.with_untracked(|s| {
            if let Err(e) = render_overlay(&map_layers, s.overlay()) {
                leptos::logging::error!("Failed to draw features: {:?}", e);
            }
        });
    });

    let highlight = create_memo(move |_| session.with(|s| s.overlay().highlight().cloned()));
    create_effect(move |_| {
        let current = highlight.get();
        let Some(map_layers) = layers.get() else { return };

        if let Err(e) = render_highlight(&map_layers, current.as_ref()) {
            leptos::logging::error!("Failed to draw highlight: {:?}", e);
        }
    });

    view! {
        <div class="map-container" id="map" node_ref=map_container_ref></div>
    }
}

fn init_leaflet_map(
    container: &web_sys::HtmlElement,
    props: &MapProps,
    start: ViewState,
    fit_extent: bool,
) -> Result<(JsValue, MapLayers), JsValue> {
    let l = leaflet()?;
    let container: &JsValue = container.as_ref();

    let map_options = options(&[
        ("maxBounds", lat_lng_bounds(&props.extent())),
        ("maxBoundsViscosity", JsValue::from_f64(1.0)),
        ("minZoom", JsValue::from_f64(f64::from(props.zoom_out))),
        ("maxZoom", JsValue::from_f64(f64::from(props.zoom_in))),
        ("attributionControl", JsValue::FALSE),
    ])?;
    let map = call(&l, "map", &[container, &map_options])?;
    if fit_extent {
        call(&map, "fitBounds", &[&lat_lng_bounds(&props.extent())])?;
    } else {
        call(&map, "setView", &[&lat_lng(start.center), &JsValue::from_f64(f64::from(start.zoom))])?;
    }

    // Base layers, first one shown
    let base_layers = js_sys::Object::new();
    for (i, tiles) in props.map_data.iter().enumerate() {
        let tile_options = options(&[("maxZoom", JsValue::from_f64(f64::from(props.zoom_in)))])?;
        let layer = call(&l, "tileLayer", &[&JsValue::from_str(&tiles.leaflet_url()), &tile_options])?;
        js_sys::Reflect::set(&base_layers, &JsValue::from_str(&tiles.label), &layer)?;
        if i == 0 {
            call(&layer, "addTo", &[&map])?;
        }
    }

    if props.map_data.len() > 1 {
        let control = call(&get(&l, "control")?, "layers", &[&base_layers])?;
        call(&control, "addTo", &[&map])?;
    }

    let pane = call(&map, "createPane", &[&JsValue::from_str(HIGHLIGHT_PANE)])?;
    if let Some(pane) = pane.dyn_ref::<web_sys::HtmlElement>() {
        pane.style().set_property("z-index", HIGHLIGHT_PANE_Z_INDEX)?;
    }

    let bounding_box = call(&l, "layerGroup", &[])?;
    call(&bounding_box, "addTo", &[&map])?;

    let highlights = call(&l, "layerGroup", &[])?;
    call(&highlights, "addTo", &[&map])?;

    let features = call(&l, "layerGroup", &[])?;
    call(&features, "addTo", &[&map])?;

    Ok((
        map,
        MapLayers {
            features,
            highlights,
            bounding_box,
        },
    ))
}

#[allow(clippy::too_many_arguments)]
fn register_events(
    map: &JsValue,
    props: &MapProps,
    session: RwSignal<MapSession>,
    view_state: RwSignal<ViewState>,
    map_bounds: RwSignal<Option<GeoBounds>>,
    attribution: RwSignal<Option<Attribution>>,
    on_select: Callback<usize>,
    on_unselect: Callback<()>,
) -> Result<(), JsValue> {
    // Features are not interactive; clicks are hit-tested against the overlay
    on(map, "click", move |event| {
        let position = get(&event, "latlng")
            .ok()
            .and_then(|latlng| Some(LonLat::new(number(&latlng, "lng")?, number(&latlng, "lat")?)));
        let zoom = view_state.get_untracked().zoom;

        match position.and_then(|position| session.with_untracked(|s| s.feature_at(position, zoom))) {
            Some(index) => on_select.call(index),
            None => on_unselect.call(()),
        }
    })?;

    let map_for_move = map.clone();
    on(map, "moveend", move |_| update_view(&map_for_move, view_state, map_bounds))?;

    let tile_layers = props.map_data.clone();
    on(map, "baselayerchange", move |event| {
        let name = get(&event, "name").ok().and_then(|name| name.as_string());
        let selected = tile_layers.iter().find(|tiles| Some(&tiles.label) == name.as_ref());
        if let Some(tiles) = selected {
            attribution.set(Some(tiles.attribution.clone()));
        }
    })?;

    Ok(())
}

#[allow(clippy::cast_sign_loss)]
fn read_view(map: &JsValue) -> Option<(ViewState, GeoBounds)> {
    let center = call(map, "getCenter", &[]).ok()?;
    let zoom = call(map, "getZoom", &[]).ok()?.as_f64()?;
    let bounds = call(map, "getBounds", &[]).ok()?;

    let edge = |name: &str| call(&bounds, name, &[]).ok()?.as_f64();

    Some((
        ViewState {
            center: LonLat::new(number(&center, "lng")?, number(&center, "lat")?),
            zoom: zoom.round().max(0.0) as u32,
        },
        GeoBounds::new(edge("getSouth")?, edge("getWest")?, edge("getNorth")?, edge("getEast")?),
    ))
}

fn update_view(map: &JsValue, view_state: RwSignal<ViewState>, map_bounds: RwSignal<Option<GeoBounds>>) {
    if let Some((view, bounds)) = read_view(map) {
        view_state.set(view);
        map_bounds.set(Some(bounds));
    }
}

/// Leaflet layer for one feature, optionally placed in a named pane
fn feature_layer(l: &JsValue, feature: &StyledFeature, pane: Option<&str>) -> Result<JsValue, JsValue> {
    let style = &feature.style;
    let mut layer_options = vec![("interactive", JsValue::FALSE)];

    if let Some(pane) = pane {
        layer_options.push(("pane", JsValue::from_str(pane)));
    }

    match &feature.geometry {
        Geometry::Point(point) => {
            let position = lat_lng(to_geographic(*point));

            if let Some(icon) = &style.icon {
                let icon = call(
                    l,
                    "icon",
                    &[&options(&[
                        ("iconUrl", JsValue::from_str(&icon.path)),
                        ("iconSize", pair(icon.width, icon.height)),
                        ("iconAnchor", pair(icon.width / 2.0, -icon.y_offset)),
                    ])?],
                )?;
                layer_options.push(("icon", icon));
                return call(l, "marker", &[&position, &options(&layer_options)?]);
            }

            layer_options.push(("radius", JsValue::from_f64(style.point_radius)));
            push_paint(&mut layer_options, feature);
            call(l, "circleMarker", &[&position, &options(&layer_options)?])
        }
        Geometry::LineString(vertices) => {
            let positions = lat_lngs(vertices.iter().copied().map(to_geographic));
            push_paint(&mut layer_options, feature);
            call(l, "polyline", &[&positions, &options(&layer_options)?])
        }
    }
}

fn push_paint(layer_options: &mut Vec<(&str, JsValue)>, feature: &StyledFeature) {
    let style = &feature.style;

    match &style.stroke {
        Some(stroke) => {
            layer_options.push(("color", JsValue::from_str(&stroke.color)));
            layer_options.push(("weight", JsValue::from_f64(stroke.width)));
        }
        None => layer_options.push(("stroke", JsValue::FALSE)),
    }

    match &style.fill {
        Some(fill) => {
            layer_options.push(("fillColor", JsValue::from_str(fill)));
            layer_options.push(("fillOpacity", JsValue::from_f64(1.0)));
        }
        None => layer_options.push(("fill", JsValue::FALSE)),
    }
}

fn render_overlay(layers: &MapLayers, overlay: &Overlay) -> Result<(), JsValue> {
    let l = leaflet()?;

    call(&layers.features, "clearLayers", &[])?;
    call(&layers.bounding_box, "clearLayers", &[])?;

    if let Some(bounding_box) = overlay.bounding_box() {
        let rectangle_options = options(&[
            ("color", JsValue::from_str(MARKER_COLOR)),
            ("weight", JsValue::from_f64(2.0)),
            ("fill", JsValue::FALSE),
            ("interactive", JsValue::FALSE),
        ])?;
        let rectangle = call(&l, "rectangle", &[&lat_lng_bounds(&bounding_box.bounds), &rectangle_options])?;
        call(&layers.bounding_box, "addLayer", &[&rectangle])?;
    }

    for feature in overlay.features() {
        let layer = feature_layer(&l, feature, None)?;
        call(&layers.features, "addLayer", &[&layer])?;
    }

    Ok(())
}

fn render_highlight(layers: &MapLayers, highlight: Option<&StyledFeature>) -> Result<(), JsValue> {
    call(&layers.highlights, "clearLayers", &[])?;

    if let Some(highlight) = highlight {
        let layer = feature_layer(&leaflet()?, highlight, Some(HIGHLIGHT_PANE))?;
        call(&layers.highlights, "addLayer", &[&layer])?;
    }

    Ok(())
}
