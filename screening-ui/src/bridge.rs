//! Glue between the browser and `screening-core`: the shared API handle and
//! file-input reading.

use leptos::*;
use screening_core::{ApiError, ClientConfig, HttpClient, ScreeningApi, UploadFile};
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

pub type Api = Rc<dyn ScreeningApi>;

/// Backend base URL baked in at build time.
pub fn config() -> ClientConfig {
    match option_env!("SCREENING_API_BASE_URL") {
        Some(url) if !url.trim().is_empty() => ClientConfig::new(url.trim()),
        _ => ClientConfig::default(),
    }
}

pub fn connect() -> Result<Api, ApiError> {
    let client = HttpClient::new(&config())?;
    logging::log!("screening backend: {}", client.base_url());
    Ok(Rc::new(client))
}

pub fn use_api() -> Api {
    expect_context::<Api>()
}

pub fn selected_files(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

pub async fn read_upload(file: &File) -> Result<UploadFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("failed to read {}: {e:?}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let upload = UploadFile::new(file.name(), bytes);
    let mime = file.type_();
    Ok(if mime.is_empty() {
        upload
    } else {
        upload.with_mime(mime)
    })
}

pub async fn read_uploads(files: &[File]) -> Result<Vec<UploadFile>, String> {
    let mut uploads = Vec::with_capacity(files.len());
    for file in files {
        uploads.push(read_upload(file).await?);
    }
    Ok(uploads)
}
