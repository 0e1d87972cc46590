//! Sequential wedding photo batch upload.
//!
//! Every file is checked, stored and recorded on its own. A failure is
//! reported in the [`BatchReport`] and the batch moves on to the next file;
//! rows and objects written for earlier files are kept.

use chrono::Utc;
use vows_core::storage::ObjectStorage;
use vows_core::types::DbId;
use vows_core::upload::{
    check_candidate, file_extension, photo_storage_path, random_suffix, BatchReport, FileOutcome,
};
use vows_db::models::photo::CreatePhoto;
use vows_db::models::wedding::Wedding;
use vows_db::Repositories;

use crate::error::AppResult;

/// One file received in a multipart batch.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Upload `files` into `wedding`'s gallery, in order.
///
/// Sort orders continue from the number of photos the wedding had before the
/// batch. When the wedding has no cover, the first uploaded photo becomes it.
///
/// Only the initial photo count can fail the whole call; per-file errors are
/// recorded as [`FileOutcome::Failed`].
pub async fn upload_photo_batch(
    repos: &Repositories,
    storage: &dyn ObjectStorage,
    wedding: &Wedding,
    files: Vec<CandidateFile>,
) -> AppResult<BatchReport> {
    let pre_count = repos.photos.count_by_wedding(wedding.id).await?;
    let mut report = BatchReport::default();

    for file in files {
        let outcome = upload_one(repos, storage, wedding.id, pre_count, report.uploaded, file).await;
        report.push(outcome);
    }

    if wedding.cover_photo_url.is_none() {
        if let Some(url) = report.first_uploaded_url().map(str::to_string) {
            match repos.weddings.set_cover(wedding.id, &url).await {
                Ok(_) => report.cover_assigned = Some(url),
                Err(e) => {
                    tracing::warn!(wedding_id = wedding.id, error = %e, "Failed to assign fallback cover");
                }
            }
        }
    }

    tracing::info!(
        wedding_id = wedding.id,
        uploaded = report.uploaded,
        skipped = report.skipped(),
        failed = report.failed(),
        "Photo batch processed"
    );

    Ok(report)
}

async fn upload_one(
    repos: &Repositories,
    storage: &dyn ObjectStorage,
    wedding_id: DbId,
    pre_count: i64,
    uploaded_so_far: usize,
    file: CandidateFile,
) -> FileOutcome {
    let CandidateFile {
        file_name,
        content_type,
        bytes,
    } = file;

    if let Err(reason) = check_candidate(&content_type, bytes.len()) {
        tracing::debug!(wedding_id, file_name = %file_name, %reason, "Skipping file");
        return FileOutcome::Skipped { file_name, reason };
    }

    let extension = file_extension(Some(&file_name), &content_type);
    let key = photo_storage_path(
        wedding_id,
        Utc::now().timestamp_millis(),
        &random_suffix(),
        &extension,
    );

    if let Err(e) = storage.upload(&key, &bytes, &content_type).await {
        tracing::warn!(wedding_id, file_name = %file_name, error = %e, "Photo upload failed");
        return FileOutcome::Failed {
            file_name,
            reason: e.to_string(),
        };
    }

    let url = storage.public_url(&key);
    let sort_order = match i32::try_from(pre_count + uploaded_so_far as i64) {
        Ok(n) => n,
        Err(_) => {
            discard(storage, &key).await;
            return FileOutcome::Failed {
                file_name,
                reason: "Gallery is full".into(),
            };
        }
    };

    let input = CreatePhoto {
        wedding_id,
        storage_path: key.clone(),
        url: url.clone(),
        caption: None,
        sort_order,
    };

    match repos.photos.create(&input).await {
        Ok(photo) => FileOutcome::Uploaded {
            file_name,
            photo_id: photo.id,
            url,
            sort_order,
        },
        Err(e) => {
            tracing::warn!(wedding_id, file_name = %file_name, error = %e, "Photo insert failed");
            discard(storage, &key).await;
            FileOutcome::Failed {
                file_name,
                reason: "Could not record photo".into(),
            }
        }
    }
}

/// Best-effort removal of an object whose row was never written.
async fn discard(storage: &dyn ObjectStorage, key: &str) {
    if let Err(e) = storage.remove(key).await {
        tracing::warn!(key, error = %e, "Failed to remove orphaned object");
    }
}
