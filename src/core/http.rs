use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;

use crate::core::error::{LoaderError, LoaderResult};
use crate::core::settings::LoaderSettings;

/// One pooled client per registry. Request timeouts are set per call, since
/// artifact downloads must not be capped by the metadata deadline.
pub fn build_http_client(settings: &LoaderSettings) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(default_headers)
        .connect_timeout(settings.connect_timeout())
        .build()
}

/// GET `url` as text within the metadata deadline, mapping error statuses to
/// [`LoaderError::LoaderApi`].
pub(crate) async fn get_text(
    client: &Client,
    settings: &LoaderSettings,
    url: &str,
) -> LoaderResult<String> {
    let response = client
        .get(url)
        .timeout(settings.request_timeout())
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(LoaderError::LoaderApi(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }

    Ok(response.text().await?)
}

/// Same as [`get_text`] but decodes the body as JSON.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    settings: &LoaderSettings,
    url: &str,
) -> LoaderResult<T> {
    let body = get_text(client, settings, url).await?;
    Ok(serde_json::from_str(&body)?)
}
