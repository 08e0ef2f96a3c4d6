//! Upload staging, blob streaming and blob cleanup shared by the artwork and
//! site asset handlers.

use std::path::PathBuf;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::extract::multipart::Field;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use gallery_common::storage::{BlobStore, BoxReader, ContentHash};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::entity::{artwork, site_asset};
use crate::error::AppError;
use crate::models::shared::{MIB, UploadRule};
use crate::utils::filename::content_disposition_value;
use crate::utils::signature::SNIFF_LEN;

/// Largest accepted upload plus room for the other form fields.
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(52 * MIB as usize)
}

/// An uploaded file spooled to a temp file. The temp file is removed on drop.
pub struct StagedUpload {
    path: PathBuf,
    pub filename: Option<String>,
    pub size: u64,
    head: Vec<u8>,
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        // Best effort.
        let _ = std::fs::remove_file(&self.path);
    }
}

impl StagedUpload {
    pub fn size_i64(&self) -> i64 {
        i64::try_from(self.size).unwrap_or(i64::MAX)
    }

    /// Move the staged bytes into the blob store.
    pub async fn store(&self, blob_store: &dyn BlobStore) -> Result<ContentHash, AppError> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        Ok(blob_store.put_stream(reader).await?)
    }
}

/// Whether a multipart field is an empty `<input type="file">`.
pub fn is_empty_file_field(field: &Field<'_>) -> bool {
    field.file_name().is_some_and(|name| name.trim().is_empty())
}

/// Spool a multipart file field to disk, enforcing `rule`.
///
/// The declared type is checked before reading; size while streaming; the
/// signature once the first bytes are in.
pub async fn stage_field(
    mut field: Field<'_>,
    rule: &UploadRule,
) -> Result<StagedUpload, AppError> {
    let filename = field.file_name().map(str::to_owned);
    if !rule
        .format
        .is_declared(field.content_type(), filename.as_deref())
    {
        return Err(AppError::Validation(rule.type_error.into()));
    }

    let mut staged = StagedUpload {
        path: std::env::temp_dir().join(format!("gallery-upload-{}", Uuid::new_v4())),
        filename,
        size: 0,
        head: Vec::with_capacity(SNIFF_LEN),
    };
    let mut temp_file = tokio::fs::File::create(&staged.path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        staged.size += chunk.len() as u64;
        if staged.size > rule.max_bytes {
            return Err(AppError::Validation(rule.size_error.into()));
        }
        if staged.head.len() < SNIFF_LEN {
            let take = (SNIFF_LEN - staged.head.len()).min(chunk.len());
            staged.head.extend_from_slice(&chunk[..take]);
        }
        temp_file
            .write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
    }

    temp_file
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;
    drop(temp_file);

    if !rule.format.matches_signature(&staged.head) {
        return Err(AppError::Validation(rule.type_error.into()));
    }

    Ok(staged)
}

/// What a blob download needs to know about the blob.
pub struct BlobMeta<'a> {
    pub content_hash: &'a str,
    pub content_type: &'a str,
    pub size: i64,
    /// Sent as `Content-Disposition` when present.
    pub filename: Option<&'a str>,
}

/// Stream a blob, answering `304` when `If-None-Match` carries its ETag.
pub async fn blob_response(
    meta: BlobMeta<'_>,
    headers: &HeaderMap,
    blob_store: &dyn BlobStore,
) -> Result<Response, AppError> {
    let etag_value = format!("\"{}\"", meta.content_hash);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let hash = ContentHash::from_hex(meta.content_hash)?;
    let reader = blob_store.get_stream(&hash).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, meta.content_type)
        .header(header::CONTENT_LENGTH, meta.size.to_string())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=3600");
    if let Some(filename) = meta.filename {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(filename),
        );
    }

    builder
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Delete a blob once no artwork or site asset refers to it.
///
/// Failures are logged and swallowed: the database change that released the
/// blob has already happened.
pub async fn release_blob<C: ConnectionTrait>(
    db: &C,
    blob_store: &dyn BlobStore,
    content_hash: &str,
) {
    match blob_ref_count(db, content_hash).await {
        Ok(0) => {}
        Ok(refs) => {
            debug!(content_hash, refs, "Blob still referenced, keeping");
            return;
        }
        Err(e) => {
            warn!(content_hash, error = %e, "Failed to count blob references");
            return;
        }
    }

    let hash = match ContentHash::from_hex(content_hash) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(content_hash, error = %e, "Stored content hash is malformed");
            return;
        }
    };
    match blob_store.delete(&hash).await {
        Ok(true) => debug!(content_hash, "Blob deleted"),
        Ok(false) => debug!(content_hash, "Blob already gone"),
        Err(e) => warn!(content_hash, error = %e, "Failed to delete blob"),
    }
}

async fn blob_ref_count<C: ConnectionTrait>(db: &C, content_hash: &str) -> Result<u64, DbErr> {
    let artworks = artwork::Entity::find()
        .filter(artwork::Column::ImageHash.eq(content_hash))
        .count(db)
        .await?;
    let assets = site_asset::Entity::find()
        .filter(site_asset::Column::ContentHash.eq(content_hash))
        .count(db)
        .await?;
    Ok(artworks + assets)
}
