//! One-shot CLI subcommands.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use motormart_common::views::DecayViewDistribution;
use motormart_common::{RawInquiry, ThreadConfig};

use crate::api::{ThreadResponse, ViewsRequest, ViewsResponse};

/// Read an inquiry as exported from the listings API. `-` reads stdin.
pub fn load_inquiry(path: &Path) -> Result<RawInquiry> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading inquiry from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading inquiry file {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing inquiry JSON from {}", path.display()))
}

pub fn thread(path: &Path, config: &ThreadConfig) -> Result<String> {
    let raw = load_inquiry(path)?;
    let response = ThreadResponse::build(raw, config)?;
    if response.messages.is_empty() {
        tracing::info!(inquiry = %response.id, "no messages in thread");
    }
    Ok(serde_json::to_string_pretty(&response)?)
}

pub fn views(listing: String, total: u64, days: u32, today: Option<NaiveDate>) -> Result<String> {
    let request = ViewsRequest {
        listing_id: listing,
        total_views: total,
        days,
        today,
    };
    let Some(response) = ViewsResponse::build(request, &DecayViewDistribution::default()) else {
        bail!("--days must be at most {}", motormart_common::views::MAX_DISTRIBUTION_DAYS);
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn thread_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"id":"inq-1","message":"Hi\n\n--- Dec 13, 2025, 4:30 AM ---\nStill interested","reply":null,"createdAt":"2025-12-13T04:00:00Z"}}"#
        )
        .unwrap();

        let out = thread(file.path(), &ThreadConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["messages"][0]["text"], "Hi");
        assert_eq!(json["messages"][1]["timestamp"], "Dec 13, 2025, 4:30 AM");
        assert_eq!(json["summary"]["dealerMessages"], 0);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_inquiry(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn invalid_json_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_inquiry(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("parsing inquiry JSON"));
    }

    #[test]
    fn views_rejects_long_window() {
        assert!(views("x".into(), 10, 400, None).is_err());
        let out = views("x".into(), 10, 3, NaiveDate::from_ymd_opt(2025, 12, 13)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["days"].as_array().unwrap().len(), 3);
    }
}
