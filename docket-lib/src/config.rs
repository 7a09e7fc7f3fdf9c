//! Table and export configuration

use std::num::NonZeroUsize;
use std::path::Path;

use chrono::format::Item;
use chrono::format::StrftimeItems;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::view::DEFAULT_PAGE_SIZE;

/// Configuration of one table view.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use docket_lib::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_page_size(NonZeroUsize::new(25).unwrap())
///     .with_search_field("name");
/// assert_eq!(config.page_size.get(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: NonZeroUsize,

    /// Field the search box matches against. No search when unset.
    pub search_field: Option<String>,

    /// Export settings.
    pub export: ExportConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_field: None,
            export: ExportConfig::default(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the search field.
    pub fn with_search_field(mut self, field: impl Into<String>) -> Self {
        self.search_field = Some(field.into());
        self
    }

    /// Sets the export settings.
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Parses a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.export.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// How exports are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Field delimiter of the delimited-text export.
    ///
    /// Default: `,`
    pub delimiter: char,

    /// `strftime` format for dates in exports.
    ///
    /// Default: `%m/%d/%Y`
    pub date_format: String,

    /// Firm name in the print header.
    pub brand: String,

    /// Line under the firm name in the print header.
    pub tagline: String,

    /// Footer text of the print document.
    pub footer: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            date_format: "%m/%d/%Y".to_string(),
            brand: "Docket".to_string(),
            tagline: "Legal Practice Management".to_string(),
            footer: "Confidential. Prepared for internal use only.".to_string(),
        }
    }
}

impl ExportConfig {
    /// Sets the delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Checks that the date format is a usable `strftime` pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::DateFormat {
                format: self.date_format.clone(),
            });
        }
        Ok(())
    }

    /// Sets the branding shown in the print header.
    pub fn with_brand(mut self, brand: impl Into<String>, tagline: impl Into<String>) -> Self {
        self.brand = brand.into();
        self.tagline = tagline.into();
        self
    }
}
