//! Google Sheets report sink.
//!
//! Rows are appended with the `spreadsheets.values.append` endpoint of the
//! Sheets API v4.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::json;
use tracing::{debug, error};

use super::{ReportSink, SinkError};
use crate::config::SheetsConfig;
use crate::report::ReportRecord;

pub struct SheetsSink {
    client: Client,
    config: SheetsConfig,
}

impl SheetsSink {
    pub fn new(config: SheetsConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SinkError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// `{api_base}/v4/spreadsheets/{id}/values/{range}:append?...`
    pub fn append_url(&self) -> Result<Url, SinkError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| SinkError::Unavailable(format!("Invalid Sheets API base: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| SinkError::Unavailable("Sheets API base cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(&[
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                format!("{}:append", self.config.range).as_str(),
            ]);

        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        Ok(url)
    }
}

#[async_trait]
impl ReportSink for SheetsSink {
    async fn append(&self, record: &ReportRecord) -> Result<(), SinkError> {
        let url = self.append_url()?;
        let body = json!({ "values": [record.row()] });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status();
        // Access tokens are short-lived and are not refreshed here
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!(status = status.as_u16(), "Sheets API refused the access token");
            return Err(SinkError::Unauthorized(status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(location = %record.location, "Report row appended to spreadsheet");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sheets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink(api_base: &str) -> SheetsSink {
        SheetsSink::new(SheetsConfig {
            spreadsheet_id: "sheet-1".into(),
            range: "Reports!A:G".into(),
            access_token: "token".into(),
            api_base: api_base.into(),
        })
        .unwrap()
    }

    #[test]
    fn test_append_url() {
        let url = sink("https://sheets.googleapis.com").append_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/Reports!A:G:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS"
        );
    }

    #[test]
    fn test_append_url_with_space_in_range() {
        let url = sink("http://127.0.0.1:9000/").append_url().unwrap();
        assert!(url.path().ends_with("/values/Reports!A:G:append"));

        let spaced = SheetsSink::new(SheetsConfig {
            spreadsheet_id: "s".into(),
            range: "Room log!A:G".into(),
            access_token: "t".into(),
            api_base: "http://127.0.0.1:9000".into(),
        })
        .unwrap();
        assert!(spaced
            .append_url()
            .unwrap()
            .path()
            .ends_with("/values/Room%20log!A:G:append"));
    }

    #[test]
    fn test_invalid_api_base() {
        assert!(matches!(
            sink("not a url").append_url(),
            Err(SinkError::Unavailable(_))
        ));
    }
}
