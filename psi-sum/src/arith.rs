//! Modular arithmetic shared by the blinding groups and the cryptosystem.

use num_bigint::BigUint;
use num_prime::nt_funcs::is_prime;
use num_prime::{PrimalityTestConfig, RandPrime};
use rand::rngs::OsRng;

/// Smallest bit size accepted by [`random_safe_prime`].
pub const MIN_SAFE_PRIME_BITS: u64 = 4;

/// Compute `base ^ exponent mod modulus`.
///
/// # Panics
/// Panics if `modulus` is zero. Callers hold validated moduli only.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exponent, modulus)
}

/// Compute the inverse of `value` modulo `modulus`.
///
/// # Returns
/// `None` if `value` and `modulus` are not coprime.
pub fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    value.modinv(modulus)
}

/// Probabilistic primality test (BPSW with the default configuration).
pub fn probably_prime(candidate: &BigUint) -> bool {
    is_prime(candidate, Some(PrimalityTestConfig::default())).probably()
}

/// Returns true if `candidate` is a safe prime, i.e. both `p` and
/// `(p - 1) / 2` pass the primality test.
pub fn probably_safe_prime(candidate: &BigUint) -> bool {
    probably_prime(candidate) && probably_prime(&(candidate >> 1u32))
}

/// Generate a random safe prime of `bits` bits.
///
/// # Returns
/// `None` if `bits` is below [`MIN_SAFE_PRIME_BITS`].
pub fn random_safe_prime(bits: u64) -> Option<BigUint> {
    if bits < MIN_SAFE_PRIME_BITS {
        return None;
    }
    let bit_size = usize::try_from(bits).ok()?;
    Some(OsRng.gen_safe_prime_exact(bit_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn test_mod_pow() {
        let result = mod_pow(
            &BigUint::from(4u32),
            &BigUint::from(13u32),
            &BigUint::from(497u32),
        );
        assert_eq!(result, BigUint::from(445u32));
    }

    #[test]
    fn test_mod_pow_full_exponent_range() {
        let p = BigUint::from(23u32);
        let g = BigUint::from(5u32);
        // Fermat: g^(p-1) = 1 and g^0 = 1
        assert_eq!(mod_pow(&g, &(&p - 1u32), &p), BigUint::one());
        assert_eq!(mod_pow(&g, &BigUint::from(0u32), &p), BigUint::one());
    }

    #[test]
    fn test_mod_inverse() {
        let inv = mod_inverse(&BigUint::from(3u32), &BigUint::from(11u32)).unwrap();
        assert_eq!(inv, BigUint::from(4u32));
        assert!(mod_inverse(&BigUint::from(6u32), &BigUint::from(9u32)).is_none());
    }

    #[test]
    fn test_probably_prime() {
        assert!(probably_prime(&BigUint::from(1_000_000_007u64)));
        assert!(!probably_prime(&BigUint::from(1_000_000_008u64)));
    }

    #[test]
    fn test_probably_safe_prime() {
        // (23 - 1) / 2 = 11 is prime, (13 - 1) / 2 = 6 is not
        assert!(probably_safe_prime(&BigUint::from(23u32)));
        assert!(!probably_safe_prime(&BigUint::from(13u32)));
        assert!(probably_safe_prime(&BigUint::from(2_147_483_579u64)));
    }

    #[test]
    fn test_random_safe_prime() {
        let p = random_safe_prime(64).unwrap();
        assert!(p.bits() >= 64);
        assert!(probably_safe_prime(&p));
    }

    #[test]
    fn test_random_safe_prime_rejects_tiny_sizes() {
        assert_eq!(random_safe_prime(0), None);
        assert_eq!(random_safe_prime(3), None);
    }
}
