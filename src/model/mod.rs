pub mod chat;
pub mod config;
pub mod diagnosis;

pub use chat::{ChatRequest, ChatResponse, ChatRole, ChatTurn, VisionChatRequest};
pub use config::{Config, LlmConfig};
pub use diagnosis::{
    AnalysisType, Condition, DiagnosisReport, DiagnosisRequest, DiagnosticFinding, ImageQuality,
    Severity,
};
