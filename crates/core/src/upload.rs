//! Wedding photo upload rules and batch reporting.
//!
//! Each file in a batch is checked independently. A rejected file is
//! reported and skipped; it never aborts the rest of the batch.

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted photo (10 MiB).
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Request body cap for a multipart batch upload (200 MiB).
pub const MAX_BATCH_BODY_BYTES: usize = 200 * 1024 * 1024;

/// Length of the random part of a storage file name.
const SUFFIX_LEN: usize = 8;

/// Extension used when neither the file name nor the content type gives one.
const FALLBACK_EXTENSION: &str = "jpg";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Why a candidate file was not uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    NotAnImage { content_type: String },
    TooLarge { size: usize, max: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnImage { content_type } => {
                write!(f, "'{content_type}' is not an image type")
            }
            Self::TooLarge { size, max } => {
                write!(f, "file is {size} bytes, maximum is {max} bytes")
            }
        }
    }
}

/// Check a candidate file against the type and size rules.
pub fn check_candidate(content_type: &str, size: usize) -> Result<(), SkipReason> {
    if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(SkipReason::NotAnImage {
            content_type: content_type.to_string(),
        });
    }
    if size > MAX_PHOTO_BYTES {
        return Err(SkipReason::TooLarge {
            size,
            max: MAX_PHOTO_BYTES,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Storage paths
// ---------------------------------------------------------------------------

/// Pick a file extension from the original name, falling back to the content type.
pub fn file_extension(file_name: Option<&str>, content_type: &str) -> String {
    let from_name = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return ext;
    }

    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => "png".into(),
        "image/webp" => "webp".into(),
        "image/gif" => "gif".into(),
        "image/avif" => "avif".into(),
        "image/heic" => "heic".into(),
        _ => FALLBACK_EXTENSION.into(),
    }
}

/// Storage key for a wedding photo: `<wedding_id>/<unix_millis>-<suffix>.<ext>`.
pub fn photo_storage_path(wedding_id: DbId, unix_millis: i64, suffix: &str, extension: &str) -> String {
    format!("{wedding_id}/{unix_millis}-{suffix}.{extension}")
}

/// Random lowercase alphanumeric suffix that keeps same-millisecond uploads apart.
pub fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Batch report
// ---------------------------------------------------------------------------

/// Result of processing one file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Uploaded {
        file_name: String,
        photo_id: DbId,
        url: String,
        sort_order: i32,
    },
    Skipped {
        file_name: String,
        reason: SkipReason,
    },
    Failed {
        file_name: String,
        reason: String,
    },
}

impl FileOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }
}

/// Per-file outcomes of a batch, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    /// Number of files stored successfully.
    pub uploaded: usize,
    /// Cover URL assigned because the wedding had none before the batch.
    pub cover_assigned: Option<String>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: FileOutcome) {
        if outcome.is_uploaded() {
            self.uploaded += 1;
        }
        self.outcomes.push(outcome);
    }

    /// URL of the first successfully uploaded file, if any.
    pub fn first_uploaded_url(&self) -> Option<&str> {
        self.outcomes.iter().find_map(|o| match o {
            FileOutcome::Uploaded { url, .. } => Some(url.as_str()),
            _ => None,
        })
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_images_within_limit() {
        assert!(check_candidate("image/jpeg", 1024).is_ok());
        assert!(check_candidate("IMAGE/PNG", MAX_PHOTO_BYTES).is_ok());
    }

    #[test]
    fn rejects_non_images() {
        assert_matches!(
            check_candidate("application/pdf", 10),
            Err(SkipReason::NotAnImage { .. })
        );
        assert_matches!(check_candidate("", 10), Err(SkipReason::NotAnImage { .. }));
    }

    #[test]
    fn rejects_oversized_files() {
        assert_matches!(
            check_candidate("image/jpeg", MAX_PHOTO_BYTES + 1),
            Err(SkipReason::TooLarge { max: MAX_PHOTO_BYTES, .. })
        );
    }

    #[test]
    fn extension_prefers_file_name() {
        assert_eq!(file_extension(Some("IMG_001.JPEG"), "image/png"), "jpeg");
        assert_eq!(file_extension(Some("no-extension"), "image/png"), "png");
        assert_eq!(file_extension(None, "image/webp"), "webp");
        assert_eq!(file_extension(Some("weird.???"), "image/x-unknown"), "jpg");
    }

    #[test]
    fn storage_path_is_keyed_by_wedding() {
        assert_eq!(
            photo_storage_path(42, 1_700_000_000_000, "ab12cd34", "jpg"),
            "42/1700000000000-ab12cd34.jpg"
        );
    }

    #[test]
    fn random_suffix_shape() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn report_counts_outcomes() {
        let mut report = BatchReport::default();
        report.push(FileOutcome::Skipped {
            file_name: "a.pdf".into(),
            reason: SkipReason::NotAnImage {
                content_type: "application/pdf".into(),
            },
        });
        report.push(FileOutcome::Uploaded {
            file_name: "b.jpg".into(),
            photo_id: 7,
            url: "/media/1/b.jpg".into(),
            sort_order: 3,
        });
        report.push(FileOutcome::Failed {
            file_name: "c.jpg".into(),
            reason: "storage unavailable".into(),
        });

        assert_eq!(report.uploaded, 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.first_uploaded_url(), Some("/media/1/b.jpg"));
    }

    #[test]
    fn report_serializes_tagged_outcomes() {
        let mut report = BatchReport::default();
        report.push(FileOutcome::Skipped {
            file_name: "big.jpg".into(),
            reason: SkipReason::TooLarge { size: 11, max: 10 },
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["outcome"], "skipped");
        assert_eq!(json["outcomes"][0]["reason"]["kind"], "too_large");
        assert_eq!(json["uploaded"], 0);
    }
}
