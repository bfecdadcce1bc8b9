//! # Number Classifier
//!
//! Decides which placement rule the radial scheme applies to a numerator.
//! The checks run in a fixed order (prime, then perfect power, then
//! composite) so every integer lands in exactly one class.

/// Classification of a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Prime,
    /// `n == base^exponent` with the smallest such base.
    PerfectPower { base: u64, exponent: u32 },
    /// Everything else, including the fallback for `n < 2`.
    Composite,
}

/// Classifies `n`.
///
/// # Arguments
/// * `n` - Integer to classify; values below 2 fall back to `Composite`
///
/// # Returns
/// * `Prime` if `n` has no divisor in `2..=√n`
/// * `PerfectPower` for the smallest base `b ≥ 2` with `n == b^e`, `e ≥ 2`
/// * `Composite` otherwise
pub fn classify(n: u64) -> Classification {
    if is_prime(n) {
        return Classification::Prime;
    }
    if let Some((base, exponent)) = perfect_power(n) {
        return Classification::PerfectPower { base, exponent };
    }
    Classification::Composite
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor: u64 = 2;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Scans bases upward from 2 and returns the first that has an integer
/// power equal to `n`.
fn perfect_power(n: u64) -> Option<(u64, u32)> {
    let mut base: u64 = 2;
    while base.saturating_mul(base) <= n {
        let mut exponent = 2;
        while let Some(power) = base.checked_pow(exponent) {
            if power > n {
                break;
            }
            if power == n {
                return Some((base, exponent));
            }
            exponent += 1;
        }
        base += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        for p in [2, 3, 5, 7, 11, 13, 97] {
            assert_eq!(classify(p), Classification::Prime, "{}", p);
        }
    }

    #[test]
    fn smallest_base_wins() {
        assert_eq!(classify(8), Classification::PerfectPower { base: 2, exponent: 3 });
        assert_eq!(classify(64), Classification::PerfectPower { base: 2, exponent: 6 });
        assert_eq!(classify(81), Classification::PerfectPower { base: 3, exponent: 4 });
        assert_eq!(classify(36), Classification::PerfectPower { base: 6, exponent: 2 });
    }

    #[test]
    fn composites() {
        for n in [6, 12, 15, 18, 105] {
            assert_eq!(classify(n), Classification::Composite, "{}", n);
        }
    }

    #[test]
    fn below_two_falls_back_to_composite() {
        assert_eq!(classify(0), Classification::Composite);
        assert_eq!(classify(1), Classification::Composite);
    }
}
