use crate::error::AssetLoadError;
#[cfg(target_arch = "wasm32")]
use crate::error::AssetLoadErrorKind;

#[cfg(target_arch = "wasm32")]
fn format_url(dir: &str, file_name: &str) -> Result<reqwest::Url, AssetLoadErrorKind> {
    let window = web_sys::window().ok_or_else(|| AssetLoadErrorKind::Fetch("no window".into()))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| AssetLoadErrorKind::Fetch(format!("{:?}", e)))?;
    let base = reqwest::Url::parse(&format!("{}/{}/", origin, dir.trim_matches('/')))
        .map_err(|e| AssetLoadErrorKind::Fetch(e.to_string()))?;
    base.join(file_name)
        .map_err(|e| AssetLoadErrorKind::Fetch(e.to_string()))
}

/// Reads `file_name` from the asset directory: the file system natively, an
/// HTTP fetch relative to the page origin on the web.
pub async fn load_binary(dir: &str, file_name: &str) -> Result<Vec<u8>, AssetLoadError> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let fetch = async {
            let url = format_url(dir, file_name)?;
            let response = reqwest::get(url)
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| AssetLoadErrorKind::Fetch(e.to_string()))?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| AssetLoadErrorKind::Fetch(e.to_string()))?;
            Ok::<_, AssetLoadErrorKind>(bytes.to_vec())
        };
        fetch.await.map_err(|kind| AssetLoadError::new(file_name, kind))?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new(dir).join(file_name);
        tokio::fs::read(path)
            .await
            .map_err(|e| AssetLoadError::new(file_name, e))?
    };

    Ok(data)
}
