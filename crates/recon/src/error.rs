use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty path, duplicate column, etc.).
    ConfigValidation(String),
    /// Missing required column in input data.
    MissingColumn { input: String, column: String },
    /// A cell that could not be parsed into its field type.
    FieldParse {
        input: String,
        line: u64,
        column: String,
        value: String,
    },
    /// Dedicated worker pool could not be built.
    ThreadPool(String),
    /// IO error (file read, malformed CSV, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { input, column } => {
                write!(f, "{input}: missing column '{column}'")
            }
            Self::FieldParse { input, line, column, value } => {
                write!(f, "{input}, line {line}: cannot parse {column} '{value}'")
            }
            Self::ThreadPool(msg) => write!(f, "worker pool error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

impl From<csv::Error> for ReconError {
    fn from(e: csv::Error) -> Self {
        Self::Io(e.to_string())
    }
}
