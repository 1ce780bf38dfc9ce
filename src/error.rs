use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a call to the study service, classified into the kinds the
/// screens branch on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("세션이 만료되었습니다. 다시 로그인해주세요.")]
    Unauthorized,

    #[error("이미 참여 중입니다.")]
    AlreadyMember,

    #[error("권한이 없습니다.")]
    Forbidden,

    #[error("요청한 항목을 찾을 수 없습니다.")]
    NotFound,

    #[error("{message} ({status})")]
    Rejected { status: u16, message: String },

    #[error("네트워크 오류: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("응답을 해석할 수 없습니다: {0}")]
    Decode(String),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    ///
    /// The body is expected to be `{"code": ..., "message": ...}` but plain
    /// text bodies are tolerated and used as the message.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.code.as_deref().unwrap_or("");
        if matches!(code, "ALREADY_MEMBER" | "ALREADY_JOINED") {
            return ApiError::AlreadyMember;
        }
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::CONFLICT => ApiError::AlreadyMember,
            _ => {
                let message = parsed
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| body.trim().to_string());
                let message = if message.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    message
                };
                ApiError::Rejected {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::AlreadyMember => None,
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
