use crate::{
    config::OperatorCase,
    direction::Direction,
    operator::Operator,
    parse::{RequestParser, split_values},
    wrapper::{FilterWrapper, SortWrapper, SourceType},
};
use serde::Deserialize;

///
/// FilterEntry
/// One structured filter from a request body.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct FilterEntry {
    pub field: Option<String>,
    pub operator: Option<String>,
    pub value: Option<String>,
}

impl FilterEntry {
    #[must_use]
    pub fn new(field: &str, operator: &str, value: &str) -> Self {
        Self {
            field: Some(field.to_string()),
            operator: Some(operator.to_string()),
            value: Some(value.to_string()),
        }
    }
}

///
/// SortEntry
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct SortEntry {
    pub field: Option<String>,
    pub direction: Option<Direction>,
}

impl SortEntry {
    #[must_use]
    pub fn new(field: &str, direction: Option<Direction>) -> Self {
        Self {
            field: Some(field.to_string()),
            direction,
        }
    }
}

impl RequestParser<'_> {
    /// Normalize body filter entries. Blank fields are dropped; unknown or
    /// absent operators fall back to `Eq`; an absent value yields no values.
    #[must_use]
    pub fn body_filters(&self, entries: &[FilterEntry]) -> Vec<FilterWrapper> {
        let case = self.config().body_operator_case;

        entries
            .iter()
            .filter_map(|entry| {
                let original = entry.field.as_deref()?;
                let field = original.trim();
                if field.is_empty() {
                    return None;
                }

                let operator = entry
                    .operator
                    .as_deref()
                    .and_then(|token| match case {
                        OperatorCase::Exact => Operator::from_token(token.trim()),
                        OperatorCase::Insensitive => Operator::from_token_ci(token.trim()),
                    })
                    .unwrap_or(Operator::Eq);
                let values = entry.value.as_deref().map(split_values).unwrap_or_default();

                Some(FilterWrapper::new(
                    field,
                    original,
                    operator,
                    values,
                    SourceType::RequestBody,
                ))
            })
            .collect()
    }

    /// Normalize body sort entries; an absent direction is ascending.
    #[must_use]
    pub fn body_sorts(&self, entries: &[SortEntry]) -> Vec<SortWrapper> {
        entries
            .iter()
            .filter_map(|entry| {
                let original = entry.field.as_deref()?;
                let field = original.trim();
                if field.is_empty() {
                    return None;
                }

                Some(SortWrapper::new(
                    field,
                    original,
                    entry.direction.unwrap_or_default(),
                    SourceType::RequestBody,
                ))
            })
            .collect()
    }
}
