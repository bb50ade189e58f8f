//! Request and response bodies shared by the HTTP handlers and the CLI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use motormart_common::thread::append_now;
use motormart_common::views::{DailyViews, ViewDistribution, MAX_DISTRIBUTION_DAYS};
use motormart_common::{
    Author, Conversation, InquiryError, InquiryId, InquiryRecord, ParsedMessage, RawInquiry,
    ThreadConfig, ThreadSummary,
};

#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub id: InquiryId,
    pub messages: Vec<ParsedMessage>,
    pub summary: ThreadSummary,
}

impl ThreadResponse {
    pub fn build(raw: RawInquiry, config: &ThreadConfig) -> Result<Self, InquiryError> {
        let record = InquiryRecord::try_from(raw)?;
        let conversation = Conversation::from_record(&record, config);
        let summary = conversation.summary();
        Ok(ThreadResponse {
            id: record.id,
            messages: conversation.into_messages(),
            summary,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub inquiry: RawInquiry,
    pub author: Author,
    pub text: String,
}

/// Both blobs after the append, ready to be written back to the listings API.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub message: String,
    pub reply: Option<String>,
}

impl ReplyResponse {
    pub fn build(request: ReplyRequest, config: &ThreadConfig) -> Result<Self, InquiryError> {
        let mut record = InquiryRecord::try_from(request.inquiry)?;
        let offset = config.separator_offset();
        let appended = append_now(record.blob(request.author), &request.text, offset)?;
        match request.author {
            Author::Buyer => record.message = appended,
            Author::Dealer => record.reply = Some(appended),
        }
        Ok(ReplyResponse {
            message: record.message,
            reply: record.reply,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewsRequest {
    pub listing_id: String,
    pub total_views: u64,
    pub days: u32,
    /// Last day of the window; the server's current UTC date when absent.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewsResponse {
    pub listing_id: String,
    pub days: Vec<DailyViews>,
}

impl ViewsResponse {
    /// Returns `None` when the window exceeds [`MAX_DISTRIBUTION_DAYS`].
    pub fn build(request: ViewsRequest, views: &dyn ViewDistribution) -> Option<Self> {
        if request.days > MAX_DISTRIBUTION_DAYS {
            return None;
        }
        let today = request
            .today
            .unwrap_or_else(|| chrono::Utc::now().date_naive());
        let days = views.distribute(
            &request.listing_id,
            request.total_views,
            request.days,
            today,
        );
        Some(ViewsResponse {
            listing_id: request.listing_id,
            days,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
