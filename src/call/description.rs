use crate::ledger::ObjectId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when building a call description.
#[derive(Error, Debug)]
pub enum CallError {
    #[error("Missing target: a call must name a ledger function")]
    MissingTarget,
}

// ============================================================================
// CALL ARGUMENTS
// ============================================================================

/// One typed positional argument of a ledger call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// Reference to a shared ledger object (handler, clock, claim).
    Object(ObjectId),
    /// Pure unsigned integer.
    U64(u64),
    /// Pure UTF-8 string.
    Str(String),
    /// Pure identifier reference.
    Id(ObjectId),
}

impl fmt::Display for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(id) => write!(f, "object({id})"),
            Self::U64(v) => write!(f, "u64({v})"),
            Self::Str(s) => write!(f, "str({s})"),
            Self::Id(id) => write!(f, "id({id})"),
        }
    }
}

// ============================================================================
// CALL DESCRIPTION
// ============================================================================

/// A fully-built ledger call: target function plus ordered typed arguments.
/// Immutable once built; consumed exactly once by the transaction executor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDescription {
    target: String,
    args: Vec<CallArg>,
}

impl CallDescription {
    /// The fully-qualified function target (`package::module::function`).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The positional arguments, in call order.
    pub fn args(&self) -> &[CallArg] {
        &self.args
    }

    /// Deterministic byte encoding of the call, used as the signing payload.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(&(self.target.len() as u32).to_le_bytes());
        bytes.extend_from_slice(self.target.as_bytes());
        bytes.extend_from_slice(&(self.args.len() as u32).to_le_bytes());

        for arg in &self.args {
            match arg {
                CallArg::Object(id) => {
                    bytes.push(0);
                    push_str(&mut bytes, id.as_str());
                }
                CallArg::U64(v) => {
                    bytes.push(1);
                    bytes.extend_from_slice(&v.to_le_bytes());
                }
                CallArg::Str(s) => {
                    bytes.push(2);
                    push_str(&mut bytes, s);
                }
                CallArg::Id(id) => {
                    bytes.push(3);
                    push_str(&mut bytes, id.as_str());
                }
            }
        }

        bytes
    }

    /// SHA256 digest of the signing bytes.
    pub fn digest(&self) -> [u8; 32] {
        let hash = Sha256::digest(self.signing_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        out
    }
}

fn push_str(bytes: &mut Vec<u8>, s: &str) {
    bytes.extend_from_slice(&(s.len() as u32).to_le_bytes());
    bytes.extend_from_slice(s.as_bytes());
}

// ============================================================================
// CALL BUILDER
// ============================================================================

/// Builder for call descriptions.
#[derive(Clone, Debug, Default)]
pub struct CallBuilder {
    target: Option<String>,
    args: Vec<CallArg>,
}

impl CallBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fully-qualified function target (required).
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Append a shared-object reference argument.
    pub fn object(mut self, id: &ObjectId) -> Self {
        self.args.push(CallArg::Object(id.clone()));
        self
    }

    /// Append a u64 argument.
    pub fn u64(mut self, value: u64) -> Self {
        self.args.push(CallArg::U64(value));
        self
    }

    /// Append a string argument.
    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.args.push(CallArg::Str(value.into()));
        self
    }

    /// Append a pure identifier argument.
    pub fn id(mut self, id: &ObjectId) -> Self {
        self.args.push(CallArg::Id(id.clone()));
        self
    }

    pub fn build(self) -> Result<CallDescription, CallError> {
        let target = self.target.ok_or(CallError::MissingTarget)?;
        Ok(CallDescription {
            target,
            args: self.args,
        })
    }
}
