use debate_client_core::ClientError;
use reqwest::multipart::{Form, Part};

use crate::transport::ApiTransport;

pub const UPLOAD_IMAGE_PATH: &str = "/upload/image";

/// Image upload for profile pictures and editor content. The payload is
/// the uploaded file's public URL.
#[derive(Debug, Clone)]
pub struct UploadService {
    transport: ApiTransport,
}

impl UploadService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn upload_image(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<String, ClientError> {
        let part = Part::bytes(bytes).file_name(file_name.into());
        let form = Form::new().part("file", part);
        self.transport.post_multipart(UPLOAD_IMAGE_PATH, form).await
    }
}
