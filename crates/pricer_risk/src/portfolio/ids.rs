//! Deal identifiers.

use std::fmt;

/// Identifier of a deal within one portfolio.
///
/// Portfolios hand out ids from a monotonically increasing counter, so a
/// removed deal's id is never reused by the same portfolio.
///
/// # Examples
///
/// ```
/// use pricer_risk::portfolio::DealId;
///
/// let id = DealId::new(3);
/// assert_eq!(id.value(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DealId(u64);

impl DealId {
    /// Creates a deal id.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DealId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_id_ordering() {
        assert!(DealId::new(1) < DealId::new(2));
        assert_eq!(DealId::from(5), DealId::new(5));
    }
}
