//! Vision analyzer trait definition

use crate::domain::{HealthReport, Language, ServiceError};
use async_trait::async_trait;

/// Remote AI vision service that turns a tongue photo into a health report
///
/// A call is a single atomic request/response: it either yields a fully
/// validated [`HealthReport`], stamped with the local receipt time, or fails.
///
/// # Example
///
/// ```no_run
/// use glossa::adapters::vision::{GeminiAnalyzer, VisionAnalyzer};
/// use glossa::config::AnalysisConfig;
/// use glossa::domain::Language;
///
/// # async fn example(image: Vec<u8>) -> glossa::domain::Result<()> {
/// let analyzer = GeminiAnalyzer::new(&AnalysisConfig::default())?;
/// let report = analyzer.analyze(&image, Language::En).await?;
/// println!("{}", report.health_status());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    /// Analyze a JPEG image, asking for the report in `language`
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for transport failures, non-JSON payloads,
    /// or reports that fail validation.
    async fn analyze(&self, image: &[u8], language: Language)
        -> Result<HealthReport, ServiceError>;

    /// Human-readable name of the backing model, for logs
    fn model(&self) -> &str;
}
