use hexregion::{json, CellIndex, GridError};
use js_sys::{Float64Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object {
    Object::new()
}
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice);
    arr
}

/// Plain JS objects and arrays, never `Map`s.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> Result<JsValue, GridError> {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| GridError::OperationFailed(format!("serialize: {}", e)))
}

fn to_json(v: JsValue, what: &str) -> Result<serde_json::Value, GridError> {
    serde_wasm_bindgen::from_value(v).map_err(|e| GridError::Argument(format!("{}: {}", what, e)))
}

/// Array of hex strings (or safe integers) from the host.
pub fn cells_from_js(v: JsValue) -> Result<Vec<CellIndex>, GridError> {
    json::cells_from_value(&to_json(v, "cells")?)
}

pub fn polygon_from_js(v: JsValue) -> Result<hexregion::Polygon, GridError> {
    json::polygon_from_value(to_json(v, "polygon")?)
}
