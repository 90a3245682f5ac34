//! Names for stored uploads.
//!
//! A stored name is `<unix-millis>-<8 hex chars><.ext>`. The millisecond prefix
//! keeps names roughly time-ordered; the random part keeps two uploads in the
//! same millisecond apart. The original extension survives in sanitized form.

use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Longest extension kept from the client's file name.
const MAX_EXTENSION_LEN: usize = 10;

/// Generate the stored file name for an upload received at `now`.
pub fn stored_file_name(original_name: Option<&str>, now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let ext = original_name
        .and_then(sanitized_extension)
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    format!("{}-{}{}", now.timestamp_millis(), &random[..8], ext)
}

/// Lower-cased extension of `name` if it is short and purely alphanumeric.
fn sanitized_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
