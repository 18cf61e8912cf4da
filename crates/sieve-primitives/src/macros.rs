#[macro_export]
macro_rules! scalar_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Bool,
                Bool,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Char,
                Textual,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Int8,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Int16,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Int32,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Int64,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Int128,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Uint8,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Uint16,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Uint32,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Uint64,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Uint128,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Float32,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Float64,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                BigInt,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Decimal,
                Numeric,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Uuid,
                Identifier,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Ulid,
                Identifier,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = None
            ),
            (
                Instant,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Timestamp
            ),
            (
                OffsetDateTime,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Timestamp
            ),
            (
                ZonedDateTime,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Timestamp
            ),
            (
                LocalDate,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Date
            ),
            (
                LocalTime,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Time
            ),
            (
                LocalDateTime,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Timestamp
            ),
            (
                Year,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Date
            ),
            (
                YearMonth,
                Temporal,
                supports_equality = true,
                supports_ordering = true,
                supports_text = false,
                temporal_bucket = Date
            ),
            (
                Text,
                Textual,
                supports_equality = true,
                supports_ordering = true,
                supports_text = true,
                temporal_bucket = None
            ),
        }
    };
}

#[macro_export]
macro_rules! scalar_kind_registry {
    ($macro:ident) => {
        $crate::scalar_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::scalar_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($scalar:ident, $family:ident, supports_equality = $supports_equality:expr, supports_ordering = $supports_ordering:expr, supports_text = $supports_text:expr, temporal_bucket = $bucket:ident) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ScalarKind::$scalar => $crate::ScalarMetadata {
                    family: $crate::ScalarFamily::$family,
                    supports_equality: $supports_equality,
                    supports_ordering: $supports_ordering,
                    supports_text: $supports_text,
                    temporal_bucket: temporal_bucket_from_registry!($bucket),
                },
            )*
        }
    };
}

macro_rules! temporal_bucket_from_registry {
    (None) => {
        None
    };
    ($bucket:ident) => {
        Some($crate::TemporalBucket::$bucket)
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($scalar:ident, $family:ident, supports_equality = $supports_equality:expr, supports_ordering = $supports_ordering:expr, supports_text = $supports_text:expr, temporal_bucket = $bucket:ident) ),* $(,)? ) => {
        [ $( $crate::ScalarKind::$scalar ),* ]
    };
}

macro_rules! label_from_registry {
    ( @args $kind:expr; @entries $( ($scalar:ident, $family:ident, supports_equality = $supports_equality:expr, supports_ordering = $supports_ordering:expr, supports_text = $supports_text:expr, temporal_bucket = $bucket:ident) ),* $(,)? ) => {
        match $kind {
            $( $crate::ScalarKind::$scalar => stringify!($scalar), )*
        }
    };
}
