//! Node.js entry point.

use napi_derive::napi;

use crate::options::RenderOptions;
use crate::render::Renderer;

/// Render `markup` against a JSON model. A JSON array renders once per item.
#[napi]
pub fn process_native(
    markup: String,
    model_json: String,
    options_json: Option<String>,
) -> napi::Result<String> {
    let options = match options_json {
        Some(json) => RenderOptions::from_json(&json).map_err(to_napi)?,
        None => RenderOptions::default(),
    };
    let model: serde_json::Value = serde_json::from_str(&model_json)
        .map_err(|e| napi::Error::from_reason(format!("Invalid model JSON: {}", e)))?;

    Renderer::new(options)
        .render(&markup, &model)
        .map_err(to_napi)
}

fn to_napi(err: crate::Error) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}
