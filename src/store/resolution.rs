use std::fmt;

/// How an overlay's pending result was settled.
///
/// Every removal path gets its own tag so callers can tell a timeout from
/// an explicit close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<V> {
    /// The overlay resolved itself with a value (e.g. a confirm button).
    Value(V),
    /// Removed by key with no explicit reason.
    Removed,
    /// Closed as the topmost overlay.
    Closed,
    /// Settled by a bulk clear of the stack.
    Cleared,
    /// The overlay's duration elapsed.
    TimedOut,
    /// Dismissed by a user interaction while topmost.
    Dismissed,
}

impl<V> Resolution<V> {
    pub fn is_value(&self) -> bool {
        matches!(self, Resolution::Value(_))
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Resolution::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Short machine-friendly tag, used in log fields.
    pub fn tag(&self) -> &'static str {
        match self {
            Resolution::Value(_) => "value",
            Resolution::Removed => "removed",
            Resolution::Closed => "closed",
            Resolution::Cleared => "cleared",
            Resolution::TimedOut => "timed_out",
            Resolution::Dismissed => "dismissed",
        }
    }
}

impl<V: fmt::Debug> fmt::Display for Resolution<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Value(value) => write!(f, "Overlay resolved with {:?}", value),
            Resolution::Removed => write!(f, "Overlay removed"),
            Resolution::Closed => write!(f, "Overlay closed"),
            Resolution::Cleared => write!(f, "Overlay cleared"),
            Resolution::TimedOut => write!(f, "Overlay timed out"),
            Resolution::Dismissed => write!(f, "Overlay dismissed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_removal_path() {
        assert_eq!(Resolution::<()>::Removed.to_string(), "Overlay removed");
        assert_eq!(Resolution::<()>::Closed.to_string(), "Overlay closed");
        assert_eq!(Resolution::<()>::Cleared.to_string(), "Overlay cleared");
        assert_eq!(Resolution::<()>::TimedOut.to_string(), "Overlay timed out");
        assert_eq!(Resolution::Value(true).to_string(), "Overlay resolved with true");
    }

    #[test]
    fn timeout_is_distinct_from_manual_removal() {
        assert_ne!(Resolution::<()>::TimedOut, Resolution::Removed);
        assert_ne!(Resolution::<()>::TimedOut.tag(), Resolution::<()>::Closed.tag());
    }

    #[test]
    fn into_value_only_for_values() {
        assert_eq!(Resolution::Value(7).into_value(), Some(7));
        assert_eq!(Resolution::<i32>::Dismissed.into_value(), None);
        assert!(Resolution::Value("ok").is_value());
    }
}
