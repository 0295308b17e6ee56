//! Per-table configuration.
//!
//! Tables share the same knobs: how many rows a page shows by default, which
//! sizes the page-size dropdown offers, and how search and sorting behave.
//! Configuration is plain YAML:
//!
//! ```yaml
//! default_page_size: 20
//! page_size_options: [10, 20, 50]
//! fold_diacritics: true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::query::{Query, DEFAULT_PAGE_SIZE};

/// Page sizes offered by the portal's pagination control.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 6] = [5, 10, 20, 30, 40, 50];

/// Table configuration. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page when a table is first shown.
    pub default_page_size: usize,
    /// Sizes a user may pick. Empty means any positive size.
    pub page_size_options: Vec<usize>,
    /// Accent-insensitive search.
    pub fold_diacritics: bool,
    /// Fail instead of keeping input order when sort keys have mixed types.
    pub strict_sort: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            fold_diacritics: false,
            strict_sort: false,
        }
    }
}

impl TableConfig {
    /// Parses and validates a YAML configuration.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let config: TableConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the default page size is usable and offered.
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(RosterError::ConfigValue(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(RosterError::ConfigValue(
                "page_size_options must not contain 0".to_string(),
            ));
        }
        if !self.allows_page_size(self.default_page_size) {
            return Err(RosterError::ConfigValue(format!(
                "default_page_size {} is not one of page_size_options {:?}",
                self.default_page_size, self.page_size_options
            )));
        }
        Ok(())
    }

    /// Returns `true` if users may pick `size`.
    pub fn allows_page_size(&self, size: usize) -> bool {
        size > 0 && (self.page_size_options.is_empty() || self.page_size_options.contains(&size))
    }

    /// A fresh query carrying this configuration.
    pub fn query(&self) -> Query {
        Query::new()
            .page_size(self.default_page_size)
            .fold_diacritics(self.fold_diacritics)
            .strict_sort(self.strict_sort)
    }
}
