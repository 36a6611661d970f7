use chrono::{DateTime, Utc};

use parallax_core::errors::ParallaxResult;

use crate::to_decode_err;

/// Parse an RFC3339 column value.
pub fn parse_ts(s: &str) -> ParallaxResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_decode_err(format!("bad timestamp {s:?}: {e}")))
}

/// Parse an optional RFC3339 column value.
pub fn parse_opt_ts(s: Option<String>) -> ParallaxResult<Option<DateTime<Utc>>> {
    s.as_deref().map(parse_ts).transpose()
}
