//! Error types for the PSI-Sum protocol.

use crate::homomorphic::CryptosystemError;

/// Errors that can occur during PSI-Sum protocol execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PsiSumError {
    /// The configured modulus failed the primality test.
    #[error("Modulus is not prime")]
    ModulusNotPrime,

    /// The modulus is prime but `(p - 1) / 2` is not.
    #[error("Modulus is not a safe prime")]
    ModulusNotSafePrime,

    /// The group is too small for the number of masked elements.
    #[error("Modulus too small: {bits} bits, at least {required} required")]
    ModulusTooSmall { bits: u64, required: u64 },

    /// An element received from the peer does not belong to the group.
    #[error("Invalid masked element: {0}")]
    InvalidMaskedElement(String),

    /// A weight cannot be represented as a non-negative integer.
    #[error("Weight at position {index} is not a non-negative integer")]
    InvalidWeight { index: usize },

    /// Failure reported by the homomorphic cryptosystem.
    #[error("Cryptosystem error: {0}")]
    Cryptosystem(#[from] CryptosystemError),
}

/// Result type for PSI-Sum operations.
pub type Result<T> = std::result::Result<T, PsiSumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", PsiSumError::ModulusNotPrime), "Modulus is not prime");
        assert_eq!(
            format!(
                "{}",
                PsiSumError::ModulusTooSmall {
                    bits: 32,
                    required: 48
                }
            ),
            "Modulus too small: 32 bits, at least 48 required"
        );
        assert_eq!(
            format!("{}", PsiSumError::ModulusNotSafePrime),
            "Modulus is not a safe prime"
        );
        assert_eq!(
            format!("{}", PsiSumError::InvalidWeight { index: 2 }),
            "Weight at position 2 is not a non-negative integer"
        );
        assert_eq!(
            format!("{}", PsiSumError::InvalidMaskedElement("test".to_string())),
            "Invalid masked element: test"
        );
        assert_eq!(
            format!(
                "{}",
                PsiSumError::from(CryptosystemError::PlaintextOutOfRange)
            ),
            "Cryptosystem error: plaintext does not fit in the plaintext space"
        );
    }

    #[test]
    fn test_cryptosystem_error_is_wrapped_unchanged() {
        let err: PsiSumError = CryptosystemError::MalformedCiphertext.into();
        assert_eq!(
            err,
            PsiSumError::Cryptosystem(CryptosystemError::MalformedCiphertext)
        );
    }
}
