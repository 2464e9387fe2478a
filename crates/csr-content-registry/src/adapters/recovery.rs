//! Identity recovery over secp256k1 personal-message signatures.

use crate::domain::errors::RecoveryError;
use crate::ports::outbound::IdentityRecovery;
use csr_signature_verification::{EcdsaSignature, EcdsaVerifier};
use shared_types::{Address, Hash};

/// Recovers the signer of a 32-byte message signed with `personal_sign`.
///
/// The signed payload is `keccak256("\x19Ethereum Signed Message:\n32" || message)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalMessageRecovery {
    verifier: EcdsaVerifier,
}

impl PersonalMessageRecovery {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityRecovery for PersonalMessageRecovery {
    fn recover(&self, message: &Hash, signature: &[u8]) -> Result<Address, RecoveryError> {
        let signature = EcdsaSignature::from_bytes(signature).map_err(RecoveryError::Malformed)?;
        self.verifier
            .recover_personal_signer(message, &signature)
            .map_err(RecoveryError::Unrecoverable)
    }
}
