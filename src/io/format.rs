use std::{fmt, str::FromStr};

/// Document formats understood by the schema editor and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl DocumentFormat {
    /// Formats compiled into this build, JSON first.
    pub fn available_formats() -> Vec<DocumentFormat> {
        vec![
            DocumentFormat::Json,
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml,
            #[cfg(feature = "toml")]
            DocumentFormat::Toml,
        ]
    }

    /// Name used in parse errors, e.g. "Invalid JSON: ...".
    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Json => "JSON",
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => "YAML",
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => "TOML",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            #[cfg(feature = "toml")]
            "toml" => Ok(DocumentFormat::Toml),
            other => {
                let known: Vec<String> = DocumentFormat::available_formats()
                    .into_iter()
                    .map(|format| format.to_string())
                    .collect();
                Err(format!(
                    "unsupported document format `{other}` (expected one of: {})",
                    known.join(", ")
                ))
            }
        }
    }
}
