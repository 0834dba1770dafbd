//! Gemini vision analyzer
//!
//! Sends the captured image to the Gemini `generateContent` endpoint with a
//! response schema that forces a JSON health report, then validates whatever
//! comes back before it becomes a [`HealthReport`].

use super::models::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use super::traits::VisionAnalyzer;
use crate::config::{AnalysisConfig, SecretString};
use crate::domain::{GlossaError, HealthReport, HealthStatus, Language, Result, ServiceError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::json;
use std::time::Duration;

/// Analyzer backed by the Gemini REST API
pub struct GeminiAnalyzer {
    /// Base URL of the API, without trailing slash
    base_url: String,

    /// Model name, e.g. `gemini-3-flash-preview`
    model: String,

    /// API key sent in the `x-goog-api-key` header
    api_key: SecretString,

    /// HTTP client for making requests
    client: Client,
}

impl GeminiAnalyzer {
    /// Create an analyzer from the `[analysis]` configuration section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no API key is configured or the HTTP
    /// client cannot be built.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            GlossaError::Configuration(
                "analysis.api_key is required to run an analysis (or set GLOSSA_ANALYSIS_API_KEY)"
                    .to_string(),
            )
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GlossaError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client,
        })
    }

    /// Full URL of the generate endpoint
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Build the request body for one image
    fn build_request(image: &[u8], language: Language) -> GenerateContentRequest {
        let encoded = general_purpose::STANDARD.encode(image);
        let language_name = language.display_name();

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::inline("image/jpeg", encoded),
                    Part::text(format!(
                        "Provide a detailed tongue analysis report in {language_name}. \
                         Include estimated Hb level, health status, specific observations, \
                         and helpful recommendations."
                    )),
                ],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(system_instruction(language_name))],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

fn system_instruction(language_name: &str) -> String {
    format!(
        "You are an expert Medical AI specializing in Tongue Diagnosis (Lingual Analysis).\n\
         Analyze the provided tongue image for:\n\
         1. Color (Pale, Pink, Red, Purple)\n\
         2. Coating (Thin, Thick, Yellow, White)\n\
         3. Texture (Cracks, Spots, Swelling)\n\
         Based on these, estimate Hemoglobin levels (Hb) and general health status.\n\
         Output language MUST be {language_name}.\n\
         Return a strictly valid JSON response."
    )
}

fn response_schema() -> serde_json::Value {
    let statuses: Vec<&str> = HealthStatus::ALL.iter().map(|s| s.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "hemoglobinEstimate": {
                "type": "STRING",
                "description": "Estimated Hemoglobin level (e.g., '12.5 g/dL')"
            },
            "healthStatus": {
                "type": "STRING",
                "enum": statuses,
                "description": "General health classification"
            },
            "observations": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "Visual findings from the tongue"
            },
            "recommendations": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "Actionable medical/health advice"
            },
            "description": {
                "type": "STRING",
                "description": "A short summary of the findings"
            }
        },
        "required": crate::domain::report::REQUIRED_FIELDS
    })
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout(err.to_string())
    } else {
        ServiceError::ConnectionFailed(err.to_string())
    }
}

#[async_trait]
impl VisionAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        image: &[u8],
        language: Language,
    ) -> std::result::Result<HealthReport, ServiceError> {
        let url = self.endpoint();
        let body = Self::build_request(image, language);

        tracing::info!(
            model = %self.model,
            language = %language,
            image_bytes = image.len(),
            "Requesting tongue analysis"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret().as_ref())
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Analysis request rejected");
            return Err(if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                ServiceError::ServerError {
                    status: status.as_u16(),
                    message,
                }
            } else {
                ServiceError::ClientError {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        let text = parsed.text().ok_or(ServiceError::EmptyResponse)?;

        let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, "Report text is not valid JSON");
            ServiceError::InvalidResponse(format!("Analysis failed to parse: {e}"))
        })?;

        let report = HealthReport::from_service_value(&value, Utc::now())?;

        tracing::info!(
            health_status = %report.health_status(),
            observations = report.observations().len(),
            "Analysis completed"
        );

        Ok(report)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
