use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Settings for rebuilding threads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThreadConfig {
    /// Zone separator timestamps were written in, as minutes east of UTC.
    pub separator_offset_minutes: i32,
}

impl ThreadConfig {
    pub fn with_offset_minutes(minutes: i32) -> Self {
        ThreadConfig {
            separator_offset_minutes: minutes,
        }
    }

    /// Out-of-range offsets fall back to UTC.
    pub fn separator_offset(&self) -> FixedOffset {
        self.separator_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}
