#[macro_use]
mod macros;

use std::fmt;

///
/// ScalarKind
///
/// Canonical data-type tag for every built-in castable scalar.
/// Enum-typed fields are parameterized by their member list and live
/// outside this registry.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ScalarKind {
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Float32,
    Float64,
    BigInt,
    Decimal,
    Uuid,
    Ulid,
    Instant,
    OffsetDateTime,
    ZonedDateTime,
    LocalDate,
    LocalTime,
    LocalDateTime,
    Year,
    YearMonth,
    Text,
}

impl ScalarKind {
    /// Return the full metadata descriptor for one scalar kind.
    #[must_use]
    pub const fn metadata(self) -> ScalarMetadata {
        scalar_kind_registry!(metadata_from_registry, self)
    }

    /// Return the routing family for this scalar kind.
    #[must_use]
    pub const fn family(self) -> ScalarFamily {
        self.metadata().family
    }

    /// Return whether this scalar supports equality and membership predicates.
    #[must_use]
    pub const fn supports_equality(self) -> bool {
        self.metadata().supports_equality
    }

    /// Return whether this scalar supports ordering and range predicates.
    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        self.metadata().supports_ordering
    }

    /// Return whether this scalar supports substring predicates.
    #[must_use]
    pub const fn supports_text(self) -> bool {
        self.metadata().supports_text
    }

    /// Return the legacy temporal bucket this scalar converts through
    /// before ordering comparisons, if it is temporal.
    #[must_use]
    pub const fn temporal_bucket(self) -> Option<TemporalBucket> {
        self.metadata().temporal_bucket
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        self.temporal_bucket().is_some()
    }

    /// Stable label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        scalar_kind_registry!(label_from_registry, self)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// ScalarMetadata
///
/// Capability metadata shared by the caster, operator, and builder layers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScalarMetadata {
    pub family: ScalarFamily,
    pub supports_equality: bool,
    pub supports_ordering: bool,
    pub supports_text: bool,
    pub temporal_bucket: Option<TemporalBucket>,
}

///
/// ScalarFamily
///
/// Coarse routing family used for diagnostics and operator checks.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScalarFamily {
    Bool,
    Identifier,
    Numeric,
    Temporal,
    Textual,
}

///
/// TemporalBucket
///
/// Three-way legacy grouping that every temporal scalar maps onto
/// before it is compared by ordering operators.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TemporalBucket {
    Date,
    Time,
    Timestamp,
}

impl fmt::Display for TemporalBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
        };
        write!(f, "{label}")
    }
}

/// Ordered list of all scalar kinds in registry order.
pub const ALL_SCALAR_KINDS: [ScalarKind; 27] = scalar_kind_registry!(all_kinds_from_registry);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_every_kind_once() {
        let mut seen = std::collections::BTreeSet::new();
        for kind in ALL_SCALAR_KINDS {
            assert!(seen.insert(kind), "duplicate registry entry for {kind}");
        }
        assert_eq!(seen.len(), ALL_SCALAR_KINDS.len());
    }

    #[test]
    fn only_text_supports_substring_predicates() {
        let text_kinds: Vec<_> = ALL_SCALAR_KINDS
            .into_iter()
            .filter(|kind| kind.supports_text())
            .collect();

        assert_eq!(text_kinds, vec![ScalarKind::Text]);
    }

    #[test]
    fn temporal_family_matches_bucket_presence() {
        for kind in ALL_SCALAR_KINDS {
            assert_eq!(
                kind.family() == ScalarFamily::Temporal,
                kind.is_temporal(),
                "family/bucket mismatch for {kind}"
            );
        }
    }

    #[test]
    fn temporal_kinds_map_to_expected_buckets() {
        assert_eq!(
            ScalarKind::LocalDate.temporal_bucket(),
            Some(TemporalBucket::Date)
        );
        assert_eq!(
            ScalarKind::LocalTime.temporal_bucket(),
            Some(TemporalBucket::Time)
        );
        assert_eq!(
            ScalarKind::Instant.temporal_bucket(),
            Some(TemporalBucket::Timestamp)
        );
        assert_eq!(ScalarKind::Decimal.temporal_bucket(), None);
    }
}
