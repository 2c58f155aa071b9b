//! Thin helpers for driving the global Leaflet object (`window.L`) through
//! `js_sys::Reflect`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::projection::{GeoBounds, LonLat};

/// The `L` namespace
pub fn leaflet() -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    js_sys::Reflect::get(&window, &JsValue::from_str("L"))
}

fn function(target: &JsValue, name: &str) -> Result<js_sys::Function, JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| JsValue::from_str(&format!("{name} not a function")))
}

/// `target.name(args...)`
pub fn call(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let array = js_sys::Array::new();
    for arg in args {
        array.push(arg);
    }
    function(target, name)?.apply(target, &array)
}

pub fn get(target: &JsValue, name: &str) -> Result<JsValue, JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
}

pub fn number(target: &JsValue, name: &str) -> Option<f64> {
    get(target, name).ok()?.as_f64()
}

/// Build a plain options object from key/value pairs
pub fn options(pairs: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let object = js_sys::Object::new();
    for (key, value) in pairs {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object.into())
}

/// `[lat, lng]`
pub fn lat_lng(position: LonLat) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(position.lat));
    array.push(&JsValue::from_f64(position.lon));
    array.into()
}

pub fn lat_lngs(positions: impl IntoIterator<Item = LonLat>) -> JsValue {
    positions.into_iter().map(lat_lng).collect::<js_sys::Array>().into()
}

/// `[[south, west], [north, east]]`
pub fn lat_lng_bounds(bounds: &GeoBounds) -> JsValue {
    lat_lngs([LonLat::new(bounds.west, bounds.south), LonLat::new(bounds.east, bounds.north)])
}

pub fn pair(a: f64, b: f64) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(a));
    array.push(&JsValue::from_f64(b));
    array.into()
}

/// Register an event handler that lives as long as the page
pub fn on(target: &JsValue, event: &str, handler: impl FnMut(JsValue) + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(JsValue)>);
    call(target, "on", &[&JsValue::from_str(event), closure.as_ref().unchecked_ref()])?;
    closure.forget();
    Ok(())
}
