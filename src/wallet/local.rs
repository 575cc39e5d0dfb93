use crate::call::CallDescription;
use crate::executor::{SignError, SignedCall, SigningProvider};
use crate::ledger::Address;
use async_trait::async_trait;
use ed25519_dalek::{Signer as DalekSigner, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;

/// Errors when reconstructing a wallet from stored key material.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// An in-process signing provider backed by an ed25519 keypair. Suitable for
/// tests and the CLI; production deployments plug in an external wallet
/// behind the same trait.
pub struct LocalWallet {
    signing_key: SigningKey,
    address: Address,
}

impl LocalWallet {
    /// Generate a wallet with a fresh random keypair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Reconstruct a wallet from 32 secret-key bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| WalletError::InvalidLength {
            expected: 32,
            got: bytes.len(),
        })?;
        Ok(Self::from_signing_key(SigningKey::from_bytes(&array)))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = Address::new(format!(
            "0x{}",
            hex::encode(signing_key.verifying_key().as_bytes())
        ));
        Self {
            signing_key,
            address,
        }
    }

    /// The wallet's account address: `0x` plus the hex public key.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The verifying half of the keypair.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Check a signed call against this wallet's public key.
    pub fn verify(&self, signed: &SignedCall) -> bool {
        let Ok(signature) = ed25519_dalek::Signature::from_slice(signed.signature()) else {
            return false;
        };
        self.signing_key
            .verifying_key()
            .verify(&signed.call().signing_bytes(), &signature)
            .is_ok()
    }
}

#[async_trait]
impl SigningProvider for LocalWallet {
    fn address(&self) -> Option<Address> {
        Some(self.address.clone())
    }

    async fn sign(&self, call: &CallDescription) -> Result<SignedCall, SignError> {
        let signature = self.signing_key.sign(&call.signing_bytes());
        Ok(SignedCall::from_parts(
            call.clone(),
            self.address.clone(),
            signature.to_bytes().to_vec(),
        ))
    }
}
