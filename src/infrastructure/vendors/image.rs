//! Image generation (Stability.ai text-to-image)

use serde::Serialize;

use super::{Auth, VendorClient, VendorRequest, VendorResult};
use crate::application::errors::{Capability, VendorError};
use crate::infrastructure::config::ImageVendorConfig;

#[derive(Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    text_prompts: Vec<TextPrompt<'a>>,
    cfg_scale: u32,
    width: u32,
    height: u32,
    samples: u32,
}

pub fn generation_request(config: &ImageVendorConfig, api_key: &str, prompt: &str) -> VendorRequest {
    let body = GenerationRequest {
        text_prompts: vec![TextPrompt { text: prompt }],
        cfg_scale: config.cfg_scale,
        width: config.width,
        height: config.height,
        samples: config.samples,
    };

    VendorRequest::post(Capability::Image, config.url.as_str())
        .with_auth(Auth::Bearer(api_key.to_string()))
        .with_accept("image/png")
        .with_json(serde_json::to_value(&body).unwrap_or_default())
}

impl VendorClient {
    /// Generate one image; the response body is the image itself
    pub async fn generate_image(&self, api_key: &str, prompt: &str) -> VendorResult<Vec<u8>> {
        let request = generation_request(&self.config().vendors.image, api_key, prompt);
        let bytes = self
            .execute(request)
            .await?
            .bytes()
            .await
            .map_err(|e| VendorError::unavailable(Capability::Image, format!("failed to read image: {}", e)))?;

        if bytes.is_empty() {
            return Err(VendorError::unavailable(Capability::Image, "empty image body"));
        }

        tracing::info!(operation = "image", bytes = bytes.len(), "Image generated");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_generation_settings() {
        let request = generation_request(&ImageVendorConfig::default(), "sk-img", "neon arcade");

        assert_eq!(request.auth, Auth::Bearer("sk-img".to_string()));
        assert_eq!(request.accept, Some("image/png"));
        let body = request.body.expect("json body");
        assert_eq!(body["text_prompts"][0]["text"], "neon arcade");
        assert_eq!(body["cfg_scale"], 7);
        assert_eq!(body["width"], 512);
        assert_eq!(body["height"], 512);
        assert_eq!(body["samples"], 1);
    }
}
