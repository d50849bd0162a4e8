use thiserror::Error;

#[derive(Error, Debug)]
pub enum RustPowError {
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO错误: {0}")]
    IOError(String),

    #[error("其他错误: {0}")]
    Other(String),
}

impl From<std::io::Error> for RustPowError {
    fn from(err: std::io::Error) -> Self {
        RustPowError::IOError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RustPowError>;
