use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Sheet '{sheet}' not found in workbook '{workbook}'")]
    MissingSheet { sheet: String, workbook: String },

    #[error("Line item '{label}' not found. Available labels: {available:?}")]
    LineItemNotFound {
        label: String,
        available: Vec<String>,
    },

    #[error("Chart rendering error: {message}")]
    Chart { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
