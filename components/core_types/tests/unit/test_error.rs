//! Unit tests for RuntimeError and ErrorKind

use core_types::{normalise_index, ErrorKind, RuntimeError};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_out_of_range_kind() {
        let error = RuntimeError::OutOfRange {
            index: 7,
            length: 3,
        };
        assert_eq!(error.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_type_mismatch_kind() {
        let error = RuntimeError::type_mismatch("short[]", "String");
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_uncoercible_kind() {
        let error = RuntimeError::uncoercible("abc", "char");
        assert_eq!(error.kind(), ErrorKind::UncoercibleValue);
    }

    #[test]
    fn test_kinds_are_distinct() {
        assert_ne!(ErrorKind::OutOfRange, ErrorKind::TypeMismatch);
        assert_ne!(ErrorKind::TypeMismatch, ErrorKind::UncoercibleValue);
    }
}

#[cfg(test)]
mod runtime_error_tests {
    use super::*;

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&RuntimeError::uncoercible("x", "short"));
    }

    #[test]
    fn test_out_of_range_message() {
        let error = normalise_index(-4, 3).unwrap_err();
        assert_eq!(error.to_string(), "index -4 out of range for length 3");
    }

    #[test]
    fn test_error_clone_eq() {
        let error = RuntimeError::type_mismatch("short", "int");
        assert_eq!(error.clone(), error);
    }
}
