//! Escaped delimiter segmentation.
//!
//! A delimiter written twice is one literal delimiter inside a segment. A run
//! of `2k` delimiters yields `k` literals; a run of `2k + 1` yields `k`
//! literals followed by one split.

/// Split `input` on `delimiter`, honoring doubled-delimiter escapes.
#[must_use]
pub fn split_escaped(input: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![input.to_string()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find(delimiter) {
        current.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let mut run = 0usize;
        while let Some(next) = rest.strip_prefix(delimiter) {
            run += 1;
            rest = next;
        }

        for _ in 0..run / 2 {
            current.push_str(delimiter);
        }
        if run % 2 == 1 {
            segments.push(std::mem::take(&mut current));
        }
    }

    current.push_str(rest);
    segments.push(current);

    segments
}

/// Inverse of [`split_escaped`]: double literal delimiters, then join.
#[must_use]
pub fn join_escaped<S: AsRef<str>>(segments: &[S], delimiter: &str) -> String {
    let escaped = delimiter.repeat(2);

    segments
        .iter()
        .map(|segment| segment.as_ref().replace(delimiter, &escaped))
        .collect::<Vec<_>>()
        .join(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_delimiter_splits() {
        assert_eq!(split_escaped("age__gte", "__"), vec!["age", "gte"]);
        assert_eq!(split_escaped("age", "__"), vec!["age"]);
        assert_eq!(split_escaped("", "__"), vec![""]);
    }

    #[test]
    fn doubled_delimiter_is_literal() {
        assert_eq!(
            split_escaped("first____name__eq", "__"),
            vec!["first__name", "eq"]
        );
    }

    #[test]
    fn odd_run_keeps_literals_then_splits() {
        assert_eq!(split_escaped("a______b", "__"), vec!["a__", "b"]);
        assert_eq!(split_escaped("a___b", "__"), vec!["a", "_b"]);
    }

    #[test]
    fn trailing_delimiter_leaves_empty_segment() {
        assert_eq!(split_escaped("age__", "__"), vec!["age", ""]);
    }

    #[test]
    fn join_escapes_literals() {
        assert_eq!(join_escaped(&["first__name", "eq"], "__"), "first____name__eq");
        assert_eq!(join_escaped(&["a"], "::"), "a");
    }

    fn segment() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9.]{1,5}", 1..3).prop_map(|chunks| chunks.join("__"))
    }

    proptest! {
        #[test]
        fn split_then_join_reproduces_any_input(input in "[a_]{0,16}") {
            let split = split_escaped(&input, "__");

            prop_assert_eq!(join_escaped(&split, "__"), input);
        }

        #[test]
        fn split_then_join_round_trips(segments in prop::collection::vec(segment(), 1..5)) {
            let joined = join_escaped(&segments, "__");
            let split = split_escaped(&joined, "__");

            prop_assert_eq!(&split, &segments);
            prop_assert_eq!(join_escaped(&split, "__"), joined);
        }
    }
}
