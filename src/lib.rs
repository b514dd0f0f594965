pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod server;

pub use client::{CompletionTransport, HttpTransport, StubTransport};
pub use config::AppConfig;
pub use error::ServiceError;
pub use gateway::{CompletionGateway, CompletionResult, UNEXPECTED_FORMAT_SENTINEL};
pub use prompt::{GenerationRequest, GenerationResponse, Mode, PromptSpec};
pub use server::build_router;
