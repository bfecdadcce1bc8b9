//! # Rational Factorizer
//!
//! Decomposes a ratio into signed prime exponents: primes of the numerator
//! count upward, primes of the denominator count downward. `6/4` therefore
//! factors to `{2: -1, 3: 1}`.

use std::collections::BTreeMap;

use crate::ratio::Ratio;

/// Signed prime-exponent decomposition of a ratio.
///
/// Keys are always prime and iterate in ascending order. A prime that is not
/// present has exponent 0; exponents that cancel to 0 are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactorMap {
    exponents: BTreeMap<u64, i32>,
}

impl FactorMap {
    /// Exponent of `prime` (0 when absent).
    pub fn exponent(&self, prime: u64) -> i32 {
        self.exponents.get(&prime).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    /// `(prime, exponent)` pairs in ascending prime order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, i32)> + '_ {
        self.exponents.iter().map(|(&p, &e)| (p, e))
    }

    /// The primes with a positive exponent, in ascending order.
    pub fn positive_factors(&self) -> Vec<(u64, i32)> {
        self.iter().filter(|&(_, e)| e > 0).collect()
    }

    /// Multiplies the exponents back out into `(numerator, denominator)`.
    ///
    /// Because cancelled primes are dropped, the result is always in lowest
    /// terms. Returns `None` if either side overflows `u64`.
    pub fn recombine(&self) -> Option<(u64, u64)> {
        let mut numerator: u64 = 1;
        let mut denominator: u64 = 1;
        for (prime, exponent) in self.iter() {
            let power = prime.checked_pow(exponent.unsigned_abs())?;
            if exponent > 0 {
                numerator = numerator.checked_mul(power)?;
            } else {
                denominator = denominator.checked_mul(power)?;
            }
        }
        Some((numerator, denominator))
    }

    fn accumulate(&mut self, n: u64, sign: i32) {
        for (prime, count) in prime_factors(n) {
            let entry = self.exponents.entry(prime).or_insert(0);
            *entry += sign * count as i32;
            if *entry == 0 {
                self.exponents.remove(&prime);
            }
        }
    }
}

/// Factorizes a ratio by trial division of both of its sides.
pub fn factorize(ratio: &Ratio) -> FactorMap {
    let mut map = FactorMap::default();
    map.accumulate(ratio.numerator, 1);
    map.accumulate(ratio.denominator, -1);
    map
}

/// Factorizes a ratio given in its string form.
///
/// Input that is not a valid ratio yields an empty map rather than an error.
pub fn factorize_str(input: &str) -> FactorMap {
    input
        .parse::<Ratio>()
        .map(|ratio| factorize(&ratio))
        .unwrap_or_default()
}

/// Prime factors of `n` with multiplicity, smallest first.
///
/// Trial division stops at `√n`; whatever is left above 1 is itself prime.
pub fn prime_factors(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    let mut divisor: u64 = 2;
    while divisor.saturating_mul(divisor) <= n {
        let mut count = 0;
        while n % divisor == 0 {
            n /= divisor;
            count += 1;
        }
        if count > 0 {
            factors.push((divisor, count));
        }
        divisor += 1;
    }
    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(s: &str) -> Ratio {
        s.parse().unwrap()
    }

    #[test]
    fn factorizes_numerator_and_denominator() {
        let map = factorize(&ratio("15/8"));
        assert_eq!(map.exponent(3), 1);
        assert_eq!(map.exponent(5), 1);
        assert_eq!(map.exponent(2), -3);
        assert_eq!(map.exponent(7), 0);
    }

    #[test]
    fn cancelled_primes_are_dropped() {
        let map = factorize(&ratio("6/2"));
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(3, 1)]);
        assert_eq!(map.recombine(), Some((3, 1)));
    }

    #[test]
    fn unison_has_no_factors() {
        assert!(factorize(&Ratio::UNISON).is_empty());
    }

    #[test]
    fn positive_factors_are_ascending() {
        let map = factorize(&ratio("105/16"));
        assert_eq!(map.positive_factors(), vec![(3, 1), (5, 1), (7, 1)]);
    }

    #[test]
    fn large_prime_cofactor_is_kept() {
        assert_eq!(prime_factors(2 * 1_000_003), vec![(2, 1), (1_000_003, 1)]);
        assert_eq!(prime_factors(1), vec![]);
        assert_eq!(prime_factors(360), vec![(2, 3), (3, 2), (5, 1)]);
    }

    #[test]
    fn invalid_strings_factor_to_empty_map() {
        assert!(factorize_str("3/0").is_empty());
        assert!(factorize_str("three halves").is_empty());
        assert_eq!(factorize_str("9/8").exponent(3), 2);
    }
}
