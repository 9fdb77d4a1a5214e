use crate::interop::{new_obj, set_kv};
use hexregion::GridError;
use wasm_bindgen::prelude::*;

fn envelope(ok: bool, key: &str, payload: &JsValue) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(ok));
    set_kv(&root, key, payload);
    root.into()
}

pub fn ok(v: JsValue) -> JsValue {
    envelope(true, "value", &v)
}

/// `{ ok: false, error: { code, message, data: { errno, recoverable } } }`.
/// `code` is the stable kind string; `errno` the numeric code.
pub fn grid(e: &GridError) -> JsValue {
    let data = new_obj();
    set_kv(&data, "errno", &JsValue::from_f64(e.code() as f64));
    set_kv(&data, "recoverable", &JsValue::from_bool(e.is_recoverable()));
    let body = new_obj();
    set_kv(&body, "code", &JsValue::from_str(e.kind()));
    set_kv(&body, "message", &JsValue::from_str(e.message()));
    set_kv(&body, "data", &data.into());
    envelope(false, "error", &body.into())
}

pub fn respond<T: serde::Serialize>(r: hexregion::Result<T>) -> JsValue {
    match r.and_then(|v| crate::interop::to_js(&v)) {
        Ok(v) => ok(v),
        Err(e) => grid(&e),
    }
}
