//! Fetch and parse the sample document.
use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
    Stdin,
}

impl Source {
    /// `http(s)://…` is a URL, `-` is stdin, anything else a file path.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            Source::Stdin
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => f.write_str("<stdin>"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {source_name}")]
    Read {
        source_name: String,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        error: Box<ureq::Error>,
    },
    #[error("failed to parse JSON from {source_name}")]
    Parse {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },
    #[error("JSON pointer `{pointer}` matched nothing in {source_name}")]
    PointerMiss { source_name: String, pointer: String },
}

#[derive(Debug, Clone)]
pub struct LoadSettings {
    pub source: Source,
    /// Narrow the document to a subnode before inference (e.g. `/data/items`).
    pub json_pointer: Option<String>,
}

impl LoadSettings {
    pub fn load(&self) -> Result<Value, LoadError> {
        let text = read_source(&self.source)?;
        log::debug!("read {} bytes from {}", text.len(), self.source);
        let value = parse_document(&text, &self.source)?;
        match self.json_pointer.as_deref() {
            None => Ok(value),
            Some(pointer) => select(value, pointer).ok_or_else(|| LoadError::PointerMiss {
                source_name: self.source.to_string(),
                pointer: pointer.to_string(),
            }),
        }
    }
}

pub fn read_source(source: &Source) -> Result<String, LoadError> {
    match source {
        Source::File(path) => std::fs::read_to_string(path).map_err(|error| LoadError::Read {
            source_name: source.to_string(),
            error,
        }),
        Source::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|error| LoadError::Read { source_name: source.to_string(), error })?;
            Ok(text)
        }
        Source::Url(url) => fetch(url).map_err(|error| LoadError::Fetch {
            url: url.clone(),
            error: Box::new(error),
        }),
    }
}

fn fetch(url: &str) -> Result<String, ureq::Error> {
    log::info!("fetching {url}");
    let mut response = ureq::get(url).header("Accept", "application/json").call()?;
    response.body_mut().read_to_string()
}

pub fn parse_document(text: &str, source: &Source) -> Result<Value, LoadError> {
    serde_json::from_str::<Value>(text).map_err(|error| LoadError::Parse {
        source_name: source.to_string(),
        error,
    })
}

/// Take the subnode at `pointer` out of `value`; an empty pointer is the whole document.
pub fn select(mut value: Value, pointer: &str) -> Option<Value> {
    value.pointer_mut(pointer).map(Value::take)
}
