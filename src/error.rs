use thiserror::Error;

pub type Result<T, E = FxError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("no global window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("nothing matches `{0}`")]
    MissingTarget(String),
    #[error("{0} is not supported here")]
    Unsupported(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FxError {
    /// Missing targets are expected on pages that omit a section.
    pub fn is_missing_target(&self) -> bool {
        matches!(self, FxError::MissingTarget(_))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

#[cfg(target_arch = "wasm32")]
impl From<FxError> for wasm_bindgen::JsValue {
    fn from(err: FxError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
