//! Stand-in image analyzer.
//!
//! There is no detection model: after a simulated delay the analyzer
//! draws the verdict, confidence and location from a random generator.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::GeoPoint;
use crate::error::GlacierError;

/// Centre of the area random detections are placed in (Uttarakhand).
pub const ANALYSIS_ORIGIN: GeoPoint = GeoPoint::new(30.0869, 79.3199);

/// Half-width in degrees of the square around [`ANALYSIS_ORIGIN`].
const LOCATION_SPREAD_DEG: f64 = 1.0;

/// Outcome of analyzing one image.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Whether an outburst was "detected".
    pub is_outburst: bool,
    /// Confidence in `[0.5, 1.0)`.
    pub confidence: f64,
    /// Where the outburst was located.
    pub location: Option<GeoPoint>,
}

/// Random-number analyzer with a busy indicator.
#[derive(Debug)]
pub struct ImageAnalyzer {
    rng: Mutex<ChaCha8Rng>,
    delay: Duration,
    in_flight: AtomicUsize,
}

impl ImageAnalyzer {
    /// Creates an analyzer. A fixed `seed` makes results reproducible.
    #[must_use]
    pub fn new(delay: Duration, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
            delay,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Returns `true` while at least one analysis is running.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// "Analyzes" an uploaded image.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidRequest`] for an empty upload.
    pub async fn analyze(&self, image: &[u8]) -> Result<AnalysisResult, GlacierError> {
        if image.is_empty() {
            return Err(GlacierError::InvalidRequest("no image provided".to_string()));
        }

        let _busy = BusyGuard::enter(&self.in_flight);
        tracing::debug!(bytes = image.len(), "analyzing image");
        tokio::time::sleep(self.delay).await;

        let result = self.draw()?;
        tracing::info!(
            is_outburst = result.is_outburst,
            confidence = result.confidence,
            "image analysis finished"
        );
        Ok(result)
    }

    fn draw(&self) -> Result<AnalysisResult, GlacierError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| GlacierError::Internal("analyzer rng poisoned".to_string()))?;
        let is_outburst = rng.gen_range(0.0..1.0) > 0.5;
        let confidence = rng.gen_range(0.0..1.0) * 0.5 + 0.5;
        let latitude =
            ANALYSIS_ORIGIN.latitude + (rng.gen_range(0.0..1.0) - 0.5) * 2.0 * LOCATION_SPREAD_DEG;
        let longitude =
            ANALYSIS_ORIGIN.longitude + (rng.gen_range(0.0..1.0) - 0.5) * 2.0 * LOCATION_SPREAD_DEG;
        Ok(AnalysisResult {
            is_outburst,
            confidence,
            location: Some(GeoPoint::new(latitude, longitude)),
        })
    }
}

/// Keeps the busy counter raised until dropped, including when the
/// request future is cancelled mid-sleep.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
