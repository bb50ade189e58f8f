pub mod config;
pub mod error;
pub mod inquiry;
pub mod thread;
pub mod views;

pub use config::ThreadConfig;
pub use error::InquiryError;
pub use inquiry::{Author, InquiryId, InquiryRecord, RawInquiry};
pub use thread::{Conversation, ParsedMessage, ThreadSummary};
