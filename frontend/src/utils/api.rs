use gloo_net::http::Request;
use gloo_net::Error as GlooError;
use thiserror::Error;

use crate::config::{self, SheetKind};

/// Why a sheet could not be turned into content. Callers log these and
/// leave the page's static markup alone.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("request failed: {0}")]
    Network(#[from] GlooError),
    #[error("sheet responded with status {0}")]
    Status(u16),
    #[error("no usable rows in the {0} sheet")]
    Empty(&'static str),
}

/// Reads published CSV tabs, optionally through the CORS relay.
#[derive(Debug, Clone)]
pub struct SheetClient {
    proxy: Option<&'static str>,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetClient {
    pub fn new() -> Self {
        Self {
            proxy: config::cors_proxy(),
        }
    }

    /// Client that talks to the spreadsheet host directly.
    pub fn direct() -> Self {
        Self { proxy: None }
    }

    pub fn request_url(&self, kind: SheetKind) -> String {
        config::proxied_url(self.proxy, kind.csv_url())
    }

    /// GETs the tab and returns its body. Non-2xx statuses are errors.
    pub async fn fetch_csv(&self, kind: SheetKind) -> Result<String, SheetError> {
        let url = self.request_url(kind);
        let mut request = Request::get(&url);
        if kind == SheetKind::HeroImages {
            request = request.header("Accept", "text/csv");
        }

        let response = request.send().await?;
        if !response.ok() {
            return Err(SheetError::Status(response.status()));
        }

        let body = response.text().await?;
        gloo_console::log!(format!("{} CSV received ({} bytes)", kind.label(), body.len()));
        log::debug!("{} CSV: {}", kind.label(), body);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_client_uses_sheet_url_verbatim() {
        let client = SheetClient::direct();
        assert_eq!(
            client.request_url(SheetKind::Video),
            SheetKind::Video.csv_url()
        );
    }

    #[test]
    fn status_error_mentions_code() {
        assert_eq!(
            SheetError::Status(404).to_string(),
            "sheet responded with status 404"
        );
        assert_eq!(
            SheetError::Empty("member logos").to_string(),
            "no usable rows in the member logos sheet"
        );
    }
}
