use std::fmt;

#[derive(Debug)]
pub enum HarnessError {
    ResponseParse {
        message: String,
        output: String,
    },
    ServerExit {
        code: i32,
        stderr: String,
    },
    Timeout {
        secs: u64,
    },
    #[allow(dead_code)]
    ConfigError(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    Other(String),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::ResponseParse { message, output } => {
                write!(f, "Error parsing response: {}\nOutput: {}", message, output)
            }
            HarnessError::ServerExit { code, stderr } => {
                write!(f, "Server exited with code {}\nError: {}", code, stderr)
            }
            HarnessError::Timeout { secs } => {
                write!(f, "Server did not exit within {} seconds", secs)
            }
            HarnessError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            HarnessError::IoError(e) => write!(f, "IO error: {}", e),
            HarnessError::JsonError(e) => write!(f, "JSON error: {}", e),
            HarnessError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::IoError(e) => Some(e),
            HarnessError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::IoError(err)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::JsonError(err)
    }
}

impl From<String> for HarnessError {
    fn from(msg: String) -> Self {
        HarnessError::Other(msg)
    }
}

impl From<&str> for HarnessError {
    fn from(msg: &str) -> Self {
        HarnessError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
