use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use feed_analyzer::config::WindowConfig;
use feed_analyzer::synthetic::FeedRequest;
use feed_analyzer::{analyze_feed, AnalysisReport, AnalyzeError, Message, Timestamp};
use serde::{Deserialize, Serialize};

pub const UNSUPPORTED_WINDOW_MESSAGE: &str =
    "Valor de janela temporal não suportado na versão atual";
pub const UNSUPPORTED_WINDOW_CODE: &str = "UNSUPPORTED_TIME_WINDOW";
pub const INVALID_TIMESTAMP_CODE: &str = "INVALID_TIMESTAMP";

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiAnalyzeResponse {
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn unsupported_window() -> Self {
        Self {
            error: UNSUPPORTED_WINDOW_MESSAGE.to_string(),
            code: UNSUPPORTED_WINDOW_CODE.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::InvalidTimestamp { .. } => Self {
                error: err.to_string(),
                code: INVALID_TIMESTAMP_CODE.to_string(),
            },
        }
    }
}

/// Applies the transport-level window policy, then runs the analyzer.
pub fn run_analysis(
    request: &FeedRequest,
    window: &WindowConfig,
) -> Result<ApiAnalyzeResponse, ApiError> {
    if window.is_rejected(request.time_window_minutes) {
        return Err(ApiError::unsupported_window());
    }
    let messages = accept_rfc3339_timestamps(&request.messages);
    let analysis = analyze_feed(&messages, request.time_window_minutes)?;
    Ok(ApiAnalyzeResponse { analysis })
}

/// Resolves wire timestamps carrying an offset or fractional seconds.
/// Strings in the canonical form, and strings that are not RFC 3339 at
/// all, are left for the analyzer to handle.
fn accept_rfc3339_timestamps(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .cloned()
        .map(|mut message| {
            if let Timestamp::Text(value) = &message.timestamp {
                if Timestamp::parse(value).is_err() {
                    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
                        message.timestamp = Timestamp::Instant(instant.with_timezone(&Utc));
                    }
                }
            }
            message
        })
        .collect()
}
