use crate::{
    direction::Direction,
    operator::Operator,
    parse::{RequestParser, split_values},
    path::{join_escaped, split_escaped},
    wrapper::{FilterWrapper, SortWrapper, SourceType},
};
use serde::Deserialize;
use std::collections::BTreeMap;

///
/// QueryParams
///
/// Decoded query string: parameter name to every raw value it was given,
/// in arrival order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `(name, value)` pairs; repeated names keep every value.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, raw) in pairs {
            push_values(&mut map, name.into(), raw.into());
        }

        Self(map)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        push_values(&mut self.0, name.into(), raw.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl RequestParser<'_> {
    /// Normalize every query parameter except the sort parameter.
    ///
    /// The trailing delimited segment is the operator when it is a case-exact
    /// operator token; otherwise the whole name is the field and the
    /// operator is `Eq`.
    #[must_use]
    pub fn query_filters(&self, params: &QueryParams) -> Vec<FilterWrapper> {
        let config = self.config();

        params
            .iter()
            .filter(|(name, _)| *name != config.sort_param)
            .map(|(name, raws)| {
                let (field, operator) = split_operator(name, &config.delimiter);
                let values = raws.iter().flat_map(|raw| split_values(raw)).collect();

                FilterWrapper::new(field, name, operator, values, SourceType::QueryParam)
            })
            .collect()
    }

    /// Normalize the sort parameter: comma-separated field names, each
    /// optionally prefixed with `-` for descending.
    #[must_use]
    pub fn query_sorts(&self, params: &QueryParams) -> Vec<SortWrapper> {
        let Some(raws) = params.get(&self.config().sort_param) else {
            return Vec::new();
        };

        raws.iter()
            .flat_map(|raw| split_values(raw))
            .filter_map(|token| {
                let (direction, name) = Direction::from_token(token.trim());
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }

                Some(SortWrapper::new(
                    name,
                    name,
                    direction,
                    SourceType::QueryParam,
                ))
            })
            .collect()
    }
}

/// Split a parameter name into `(field, operator)`.
pub(crate) fn split_operator(name: &str, delimiter: &str) -> (String, Operator) {
    let segments = split_escaped(name, delimiter);

    if let Some((last, prefix)) = segments.split_last()
        && !prefix.is_empty()
        && let Some(operator) = Operator::from_token(last)
    {
        return (join_escaped(prefix, delimiter), operator);
    }

    (name.to_string(), Operator::Eq)
}

fn push_values(map: &mut BTreeMap<String, Vec<String>>, name: String, raw: String) {
    map.entry(name).or_default().push(raw);
}
