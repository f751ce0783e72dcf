//! Request and response types for the Weed Guard API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration payload for `POST user/`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub fullname: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    /// Farmer-role registration, the only role this client creates.
    pub fn farmer(
        fullname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            email: email.into(),
            password: password.into(),
            role: "farmer".to_string(),
        }
    }
}

/// Registration response. The backend may issue a token pair right
/// away or require a separate login.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Login payload for `POST login/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh payload for `POST refresh-token/`
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// One prediction upload: the image plus its collection metadata.
///
/// The image travels as raw bytes; callers hand over whatever the
/// imaging subsystem produced, along with a file name and MIME type
/// for the multipart part.
#[derive(Debug, Clone)]
pub struct PredictionUpload {
    pub image: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
    pub site_name: String,
    pub location: String,
    pub farmer_id: String,
}

/// Outcome of a prediction upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictOutcome {
    pub result: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// A stored prediction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub site_name: String,
    pub location: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// Response wrapper for `GET predictions-list/`
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionsListResponse {
    pub predictions: Vec<Prediction>,
}

/// Aggregated analytics for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub overview: AnalyticsOverview,
    pub weed_statistics: Vec<WeedStatistic>,
    pub monthly_trends: Vec<MonthlyTrend>,
    #[serde(default)]
    pub recent_activity: Vec<RecentActivity>,
}

/// Headline counters for the analytics dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub total_predictions: u64,
    pub recent_predictions: u64,
    pub unique_locations: u64,
    pub unique_sites: u64,
}

/// Per-result prediction counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeedStatistic {
    pub result: String,
    pub count: u64,
}

/// Prediction volume for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub count: u64,
}

/// Recent prediction activity entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub site_name: String,
}

/// JSON error body shape used by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
