use serde::Serialize;

use crate::error::{BridgeError, SearchedPaths};

/// Cosmetic processing step shown next to a reply. Always reported as completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub title: &'static str,
    pub status: &'static str,
    pub description: &'static str,
}

impl StepRecord {
    const fn completed(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            status: "completed",
            description,
        }
    }
}

/// Steps attached to a reply produced by the real agent.
pub const DELEGATE_STEPS: [StepRecord; 2] = [
    StepRecord::completed("تحليل AgentForge", "تمت المعالجة بواسطة AF-Core"),
    StepRecord::completed("توليد الرد", "تم صياغة الرد بناءً على البرومبت"),
];

/// Steps attached to a canned reply.
pub const FALLBACK_STEPS: [StepRecord; 3] = [
    StepRecord::completed("تحليل الطلب", "تم فهم السياق باستخدام AgentForge"),
    StepRecord::completed("استدعاء الأدوات", "تم فحص الملفات المتاحة"),
    StepRecord::completed("توليد الرد", "تم صياغة الرد النهائي"),
];

/// The single JSON object printed per invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BridgeResponse {
    Success {
        message: String,
        steps: Vec<StepRecord>,
    },
    MissingMessage {
        error: String,
    },
    RuntimeNotFound {
        error: String,
        path: SearchedPaths,
    },
    Failure {
        error: String,
        traceback: String,
    },
}

impl BridgeResponse {
    pub fn delegated(message: String) -> Self {
        Self::Success {
            message,
            steps: DELEGATE_STEPS.to_vec(),
        }
    }

    pub fn canned(message: String) -> Self {
        Self::Success {
            message,
            steps: FALLBACK_STEPS.to_vec(),
        }
    }

    /// Report an error that escaped the delegate and fallback stages.
    pub fn failure(err: &anyhow::Error) -> Self {
        Self::Failure {
            error: err.to_string(),
            traceback: format!("{:?}", err),
        }
    }

    /// Process exit code for this response.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingMessage { .. } | Self::RuntimeNotFound { .. } => 1,
            Self::Success { .. } | Self::Failure { .. } => 0,
        }
    }

    /// The reply text, if this is a success.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<BridgeError> for BridgeResponse {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::MissingMessage => Self::MissingMessage {
                error: BridgeError::MissingMessage.to_string(),
            },
            BridgeError::RuntimeNotFound { message, searched } => Self::RuntimeNotFound {
                error: message,
                path: searched,
            },
        }
    }
}
