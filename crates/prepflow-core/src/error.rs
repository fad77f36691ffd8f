use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepflowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings document error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Invalid pipeline config: {0}")]
    PipelineConfig(#[from] toml::de::Error),

    #[error("Pipeline config serialization failed: {0}")]
    PipelineConfigWrite(#[from] toml::ser::Error),

    #[error("Command `{line}` failed: {message}")]
    Execution { line: String, message: String },
}

pub type Result<T> = std::result::Result<T, PrepflowError>;
