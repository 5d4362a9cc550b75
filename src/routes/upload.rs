use axum::{extract::Multipart, response::Json, Extension};
use serde_json::{json, Value};

use crate::config::get_config;
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;

/// Extensions accepted for portfolio media: images, video and audio.
const ALLOWED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "mp4", "mov", "avi", "webm", "mp3", "wav",
];

/// Lowercased extension of `filename` if it is on the allow-list.
fn allowed_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Strips path components and maps anything outside [A-Za-z0-9._-] to '_'.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Prefixes the sanitized name with an upload timestamp so repeated
/// uploads of the same file never collide.
fn stored_name(filename: &str) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_");
    format!("{}{}", stamp, sanitize_filename(filename))
}

#[utoipa::path(
    post,
    path = "/api/upload",
    responses(
        (status = 200, description = "File stored under the upload directory"),
        (status = 400, description = "Missing file or disallowed extension"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn upload_file(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("No file provided".to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(AppError::BadRequest("No file selected".to_string())),
        };
        if allowed_extension(&original).is_none() {
            return Err(AppError::BadRequest("Invalid file type".to_string()));
        }

        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read upload body");
            AppError::InternalServerError("Failed to read uploaded file".to_string())
        })?;

        let config = get_config();
        let filename = stored_name(&original);
        let dest = std::path::Path::new(&config.upload_dir).join(&filename);

        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to create upload directory");
                AppError::InternalServerError("Failed to store file".to_string())
            })?;
        tokio::fs::write(&dest, &data).await.map_err(|e| {
            tracing::error!(error = %e, path = %dest.display(), "failed to write upload");
            AppError::InternalServerError("Failed to store file".to_string())
        })?;

        tracing::info!(user_id = user.id, %filename, size = data.len(), "file uploaded");

        return Ok(Json(json!({
            "success": true,
            "message": "File uploaded successfully",
            "filename": filename,
            "fileUrl": format!("/uploads/{}", filename)
        })));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_allow_list_is_case_insensitive() {
        assert_eq!(allowed_extension("reel.MP4"), Some("mp4".to_string()));
        assert_eq!(allowed_extension("still.jpeg"), Some("jpeg".to_string()));
        assert_eq!(allowed_extension("script.pdf"), None);
        assert_eq!(allowed_extension("noextension"), None);
    }

    #[test]
    fn sanitize_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my reel (final).mp4"), "my_reel__final_.mp4");
        assert_eq!(sanitize_filename("clean-name_v2.mov"), "clean-name_v2.mov");
    }

    #[test]
    fn stored_name_carries_timestamp_prefix() {
        let name = stored_name("cut.mp4");
        assert!(name.ends_with("_cut.mp4"));
        // YYYYMMDD_HHMMSS_ prefix is 16 chars.
        assert_eq!(name.len(), 16 + "cut.mp4".len());
    }
}
