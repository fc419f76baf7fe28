//! Storage keys for uploaded media

use chrono::DateTime;
use chrono::Utc;
use unicode_normalization::UnicodeNormalization;

use super::Error;
use super::Result;

/// Namespace of all uploaded note images
pub const MEDIA_PREFIX: &str = "media/";

/// Name used when the uploaded file has none
const FALLBACK_FILE_NAME: &str = "upload";

/// Generate the storage key for an uploaded file
///
/// Shape is `media/<unix-millis>-<file-name>`. Only the timestamp separates two uploads of the
/// same file name, uploads within the same millisecond collide.
pub fn storage_key(file_name: &str, uploaded_at: DateTime<Utc>) -> String {
    // browsers send a bare name, other clients might send a full path
    let base_name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let base_name = base_name.nfc().collect::<String>();

    let base_name = if base_name.is_empty() {
        FALLBACK_FILE_NAME
    } else {
        &base_name
    };

    format!(
        "{MEDIA_PREFIX}{}-{base_name}",
        uploaded_at.timestamp_millis()
    )
}

/// Check a key is a plain relative path
pub fn validate_key(key: &str) -> Result<()> {
    let is_valid = !key.is_empty()
        && !key.contains(['\\', '\0'])
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

    if is_valid {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.to_string()))
    }
}
