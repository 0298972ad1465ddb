//! Error types for checked construction.
//!
//! Most preconditions in this crate (sorted input to the merge primitives, a
//! consistent comparator) are only checked with `debug_assert!`, because
//! checking them would cost as much as the operation itself. The one checked
//! entry point is [`FlatSet::try_from_sorted_vec`](crate::flat_set::FlatSet::try_from_sorted_vec),
//! which validates its input and reports the first violation.

/// Returned when input that must be strictly increasing is not.
///
/// # Examples
///
/// ```rust
/// use flat_containers::error::UnsortedInputError;
///
/// let error = UnsortedInputError { index: 3 };
/// assert_eq!(format!("{error}"), "input is not strictly increasing at index 3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnsortedInputError {
    /// Index of the first element that is not ordered after its predecessor.
    pub index: usize,
}

impl std::fmt::Display for UnsortedInputError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "input is not strictly increasing at index {}",
            self.index
        )
    }
}

impl std::error::Error for UnsortedInputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsorted_input_error_display() {
        let error = UnsortedInputError { index: 0 };
        assert_eq!(
            format!("{error}"),
            "input is not strictly increasing at index 0"
        );
    }

    #[test]
    fn test_unsorted_input_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(UnsortedInputError { index: 7 });
        assert_eq!(error.to_string(), "input is not strictly increasing at index 7");
    }
}
