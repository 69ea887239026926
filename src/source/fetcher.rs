use super::location::SourceLocation;
use super::reader::{read_csv_str, read_table_file};
use crate::errors::{AppError, AppResult};
use crate::models::Table;
use std::time::Duration;

/// Credentials are resolved by the caller and handed over per fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchAuth {
    pub bearer_token: Option<String>,
}

/// Anything that can turn a source location into a table.
pub trait RecordFetcher {
    fn fetch(&self, location: &SourceLocation, auth: &FetchAuth) -> AppResult<Table>;
}

/// Production fetcher: blocking HTTP for URLs, filesystem for paths.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    retry: bool,
    text_columns: Vec<String>,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64, retry: bool, text_columns: Vec<String>) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("leadlens/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(Self {
            client,
            retry,
            text_columns,
        })
    }

    fn get_text(&self, url: &str, auth: &FetchAuth) -> AppResult<String> {
        let mut req = self.client.get(url);
        if let Some(token) = &auth.bearer_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Other(format!("HTTP {} from {url}", status.as_u16())));
        }
        Ok(resp.text()?)
    }
}

impl RecordFetcher for HttpFetcher {
    fn fetch(&self, location: &SourceLocation, auth: &FetchAuth) -> AppResult<Table> {
        match location {
            SourceLocation::File(path) => read_table_file(path, &self.text_columns),
            SourceLocation::Url(url) => {
                let body = match self.get_text(url, auth) {
                    Ok(body) => body,
                    Err(e) if self.retry => {
                        tracing::debug!(%url, error = %e, "fetch failed, retrying once");
                        self.get_text(url, auth)?
                    }
                    Err(e) => return Err(e),
                };
                // una pagina HTML al posto del CSV = foglio non pubblico
                if body.trim_start().starts_with('<') {
                    return Err(AppError::Other(
                        "response is HTML, not CSV (is the sheet shared publicly?)".into(),
                    ));
                }
                read_csv_str(&body, &self.text_columns)
            }
        }
    }
}
