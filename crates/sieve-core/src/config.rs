use crate::{DEFAULT_DELIMITER, DEFAULT_PATH_SEPARATOR, DEFAULT_SORT_PARAM, VALUE_SEPARATOR};
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ResolverConfig
///
/// Deployment-level knobs. Only the request normalizer and the path walker
/// read these; policies are configured per context.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Separator between field path and operator token in parameter names.
    pub delimiter: String,
    /// Query parameter carrying sort requests; never parsed as a filter.
    pub sort_param: String,
    /// Separator between nested path segments.
    pub path_separator: String,
    /// Matching rule for operator tokens supplied in request bodies.
    pub body_operator_case: OperatorCase,
    /// Object name stamped on every field error.
    pub object_name: String,
}

impl ResolverConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        if self.delimiter.contains(VALUE_SEPARATOR) {
            return Err(ConfigError::DelimiterContainsValueSeparator {
                delimiter: self.delimiter.clone(),
            });
        }
        if self.sort_param.trim().is_empty() {
            return Err(ConfigError::BlankSortParam);
        }
        if self.path_separator.is_empty() {
            return Err(ConfigError::EmptyPathSeparator);
        }

        Ok(())
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn with_sort_param(mut self, sort_param: impl Into<String>) -> Self {
        self.sort_param = sort_param.into();
        self
    }

    #[must_use]
    pub const fn with_body_operator_case(mut self, case: OperatorCase) -> Self {
        self.body_operator_case = case;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            sort_param: DEFAULT_SORT_PARAM.to_string(),
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            body_operator_case: OperatorCase::default(),
            object_name: "filter".to_string(),
        }
    }
}

///
/// OperatorCase
///
/// Query-parameter operator tokens are always matched exactly; request-body
/// tokens follow this setting.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OperatorCase {
    Exact,
    #[default]
    Insensitive,
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid resolver config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("delimiter '{delimiter}' must not contain the value separator ','")]
    DelimiterContainsValueSeparator { delimiter: String },

    #[error("sort parameter name must not be blank")]
    BlankSortParam,

    #[error("path separator must not be empty")]
    EmptyPathSeparator,
}
