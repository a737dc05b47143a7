//! Profiler PDF export download.
//!
//! The export endpoint either streams `application/pdf` bytes or answers
//! with a JSON envelope carrying base64 content. Both end up as a file in
//! the requested directory.

use base64::Engine as _;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use shared::{ApiResponse, ExportPayload, ProfileExportRequest, QueryParams};

use super::api::ApiClient;
use crate::error::{ClientError, ClientResult};

pub const EXPORT_PATH: &str = "profiler/export-pdf";

#[derive(Clone)]
pub struct ExportService {
    api: ApiClient,
}

impl ExportService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Download the profile statement and write it under `dest_dir`
    pub async fn download_profile_pdf(
        &self,
        request: &ProfileExportRequest,
        dest_dir: &Path,
    ) -> ClientResult<PathBuf> {
        info!("📄 EXPORT: Requesting profile PDF {:?}", request);

        let body = self.api.get_raw(EXPORT_PATH, &export_params(request)).await?;
        let is_json = body
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"));

        let (file_name, bytes) = if is_json {
            let envelope: ApiResponse<ExportPayload> = serde_json::from_slice(&body.bytes)?;
            if !envelope.success {
                return Err(ClientError::Rejected {
                    message: envelope.error_message(),
                });
            }
            let payload = envelope.data.ok_or(ClientError::MissingData)?;
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(payload.content_base64.trim())
                .map_err(|e| {
                    error!("❌ EXPORT: Invalid base64 content: {}", e);
                    ClientError::Rejected {
                        message: Some("Export returned unreadable PDF content".to_string()),
                    }
                })?;
            let name = payload
                .file_name
                .unwrap_or_else(|| default_file_name(request));
            (name, bytes)
        } else {
            (default_file_name(request), body.bytes)
        };

        let path = dest_dir.join(sanitize_file_name(&file_name));
        tokio::fs::write(&path, &bytes).await?;
        info!("✅ EXPORT: Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

fn export_params(request: &ProfileExportRequest) -> QueryParams {
    let mut params = QueryParams::new();
    params.push_opt("profile_id", request.profile_id);
    params.push_opt("client_id", request.client_id);
    params.push_opt("start_date", request.start_date);
    params.push_opt("end_date", request.end_date);
    params
}

fn default_file_name(request: &ProfileExportRequest) -> String {
    match request.profile_id {
        Some(id) => format!("profile-{}-statement.pdf", id),
        None => "profiler-statement.pdf".to_string(),
    }
}

/// Keep only the final path component so a server-supplied name cannot escape `dest_dir`
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        "export.pdf".to_string()
    } else {
        base.to_string()
    }
}
