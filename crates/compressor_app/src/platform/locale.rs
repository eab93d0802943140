use std::fs;
use std::io;
use std::path::Path;

use compressor_core::{Catalog, CatalogError};
use thiserror::Error;
use url::Url;

pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh"];
pub const DEFAULT_LOCALE: &str = "en";

const EN_MESSAGES: &str = include_str!("../../messages/en.json");
const ZH_MESSAGES: &str = include_str!("../../messages/zh.json");

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("no message catalog for locale {0:?}")]
    NotFound(String),
    #[error("invalid page url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to read catalog {path:?}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// What the page was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub locale: String,
    /// Taken verbatim from the `componentId` query parameter.
    pub component_id: Option<String>,
}

impl PageRequest {
    /// Locale comes from the first path segment, falling back to `default_locale`.
    pub fn parse(page_url: &str, default_locale: &str) -> Result<Self, LocaleError> {
        let url = Url::parse(page_url).map_err(|source| LocaleError::InvalidUrl {
            url: page_url.to_string(),
            source,
        })?;
        let locale = url
            .path_segments()
            .and_then(|mut segments| segments.find(|segment| !segment.is_empty()))
            .unwrap_or(default_locale)
            .to_string();
        let component_id = url
            .query_pairs()
            .find(|(key, _)| key == "componentId")
            .map(|(_, value)| value.into_owned());
        Ok(Self {
            locale,
            component_id,
        })
    }
}

/// Loads the catalog for `locale`. A catalog directory, when given, is authoritative.
pub fn load_catalog(locale: &str, messages_dir: Option<&Path>) -> Result<Catalog, LocaleError> {
    if let Some(dir) = messages_dir {
        let path = dir.join(format!("{locale}.json"));
        return match fs::read_to_string(&path) {
            Ok(text) => Ok(Catalog::from_json(locale, &text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(LocaleError::NotFound(locale.to_string()))
            }
            Err(source) => Err(LocaleError::Read { path, source }),
        };
    }

    let text = match locale {
        "en" => EN_MESSAGES,
        "zh" => ZH_MESSAGES,
        _ => return Err(LocaleError::NotFound(locale.to_string())),
    };
    Ok(Catalog::from_json(locale, text)?)
}
