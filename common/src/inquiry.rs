use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::InquiryError;

/// Opaque inquiry identifier as issued by the listings API.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

impl std::fmt::Display for InquiryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who wrote a message. Fixed by the blob it was split from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Prospective buyer; owns the `message` blob.
    Buyer,
    /// Dealer answering the inquiry; owns the `reply` blob.
    Dealer,
}

/// Identifiers come back as strings from some endpoints and numbers from others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

/// Inquiry exactly as the API returns it. Nothing is trusted to be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInquiry {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub replied_at: Option<String>,
}

/// Normalized inquiry. All defaulting of missing API fields happens in
/// `TryFrom<RawInquiry>`, so thread reconstruction never sees a partial record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryRecord {
    pub id: InquiryId,
    /// Buyer blob. May be empty.
    pub message: String,
    /// Dealer blob. `None` until the dealer first replies.
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Time of the most recent reply, not the first one.
    pub replied_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawInquiry> for InquiryRecord {
    type Error = InquiryError;

    fn try_from(raw: RawInquiry) -> Result<Self, Self::Error> {
        let id = match raw.id {
            Some(RawId::Text(s)) if !s.trim().is_empty() => InquiryId(s),
            Some(RawId::Number(n)) => InquiryId(n.to_string()),
            _ => return Err(InquiryError::MissingField("id")),
        };

        let created_at = match raw.created_at.as_deref() {
            Some(s) if !s.trim().is_empty() => parse_api_date(s).ok_or_else(|| {
                InquiryError::InvalidDate {
                    field: "createdAt",
                    value: s.to_string(),
                }
            })?,
            _ => return Err(InquiryError::MissingField("createdAt")),
        };

        // Not used for ordering; unparseable values are dropped.
        let replied_at = match raw.replied_at.as_deref() {
            Some(s) if !s.trim().is_empty() => {
                let parsed = parse_api_date(s);
                if parsed.is_none() {
                    warn!(inquiry = %id, value = s, "ignoring unparseable repliedAt");
                }
                parsed
            }
            _ => None,
        };

        Ok(InquiryRecord {
            id,
            message: raw.message.unwrap_or_default(),
            reply: raw.reply.filter(|r| !r.is_empty()),
            created_at,
            replied_at,
        })
    }
}

impl InquiryRecord {
    /// The blob owned by `author`.
    pub fn blob(&self, author: Author) -> Option<&str> {
        match author {
            Author::Buyer => Some(self.message.as_str()),
            Author::Dealer => self.reply.as_deref(),
        }
    }
}

/// Parse an API timestamp. RFC 3339 first, then the naive ISO-ish forms some
/// endpoints emit without an offset (read as UTC). A bare date is midnight UTC.
pub fn parse_api_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(json: &str) -> RawInquiry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn normalizes_full_record() {
        let record = InquiryRecord::try_from(raw(
            r#"{"id":"inq-1","message":"Hi","reply":"Hello","createdAt":"2025-12-13T08:00:00Z","repliedAt":"2025-12-13T09:30:00.000Z"}"#,
        ))
        .unwrap();
        assert_eq!(record.id, InquiryId("inq-1".into()));
        assert_eq!(record.message, "Hi");
        assert_eq!(record.reply.as_deref(), Some("Hello"));
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2025, 12, 13, 8, 0, 0).unwrap()
        );
        assert_eq!(
            record.replied_at,
            Some(Utc.with_ymd_and_hms(2025, 12, 13, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn defaults_missing_blobs() {
        let record =
            InquiryRecord::try_from(raw(r#"{"id":42,"createdAt":"2025-12-13T08:00:00Z","reply":""}"#))
                .unwrap();
        assert_eq!(record.id, InquiryId("42".into()));
        assert_eq!(record.message, "");
        assert_eq!(record.reply, None);
        assert_eq!(record.replied_at, None);
    }

    #[test]
    fn null_reply_is_absent() {
        let record = InquiryRecord::try_from(raw(
            r#"{"id":"a","message":"x","reply":null,"createdAt":"2025-12-13T08:00:00Z","repliedAt":null}"#,
        ))
        .unwrap();
        assert_eq!(record.blob(Author::Dealer), None);
        assert_eq!(record.blob(Author::Buyer), Some("x"));
    }

    #[test]
    fn missing_id_and_created_at_are_rejected() {
        assert_eq!(
            InquiryRecord::try_from(raw(r#"{"createdAt":"2025-12-13T08:00:00Z"}"#)),
            Err(InquiryError::MissingField("id"))
        );
        assert_eq!(
            InquiryRecord::try_from(raw(r#"{"id":"a"}"#)),
            Err(InquiryError::MissingField("createdAt"))
        );
    }

    #[test]
    fn unparseable_created_at_is_rejected() {
        let err = InquiryRecord::try_from(raw(r#"{"id":"a","createdAt":"yesterday"}"#)).unwrap_err();
        assert_eq!(
            err,
            InquiryError::InvalidDate {
                field: "createdAt",
                value: "yesterday".into()
            }
        );
    }

    #[test]
    fn garbage_replied_at_keeps_the_thread() {
        let record = InquiryRecord::try_from(raw(
            r#"{"id":"a","message":"Still for sale?","createdAt":"2025-12-13T08:00:00Z","repliedAt":"Invalid Date"}"#,
        ))
        .unwrap();
        assert_eq!(record.replied_at, None);
        assert_eq!(record.message, "Still for sale?");
    }

    #[test]
    fn date_only_created_at_is_midnight_utc() {
        let record =
            InquiryRecord::try_from(raw(r#"{"id":"a","message":"Hi","createdAt":"2025-12-13"}"#))
                .unwrap();
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2025, 12, 13, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn api_date_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 12, 13, 8, 0, 0).unwrap();
        assert_eq!(parse_api_date("2025-12-13T08:00:00Z"), Some(expected));
        assert_eq!(parse_api_date("2025-12-13T10:00:00+02:00"), Some(expected));
        assert_eq!(parse_api_date("2025-12-13T08:00:00"), Some(expected));
        assert_eq!(parse_api_date("2025-12-13 08:00:00.000"), Some(expected));
        assert_eq!(
            parse_api_date("2025-12-13"),
            Some(Utc.with_ymd_and_hms(2025, 12, 13, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_api_date("Dec 13"), None);
        assert_eq!(parse_api_date("2025-13-01"), None);
    }

    #[test]
    fn author_wire_names() {
        assert_eq!(serde_json::to_string(&Author::Buyer).unwrap(), "\"buyer\"");
        assert_eq!(serde_json::to_string(&Author::Dealer).unwrap(), "\"dealer\"");
    }
}
