//! Utilities for the admin scripts.

use std::str::FromStr;

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::errors::ScriptError;

/// Computes the `AccessControl` identifier of a role, i.e. `keccak256(name)`
pub fn role_id(name: &str) -> B256 {
    keccak256(name.as_bytes())
}

/// Derives the token id of a bond from its text identifier (e.g. a CUSIP).
///
/// The id is the keccak hash of the identifier's UTF-8 bytes, read as a
/// big-endian `uint256`.
pub fn token_id(identifier: &str) -> U256 {
    U256::from_be_bytes(keccak256(identifier.as_bytes()).0)
}

/// Parses a required address, naming the missing or malformed setting in the error
pub fn parse_address(name: &str, value: Option<&str>) -> Result<Address, ScriptError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScriptError::MissingConfig(name.to_string()))?;

    Address::from_str(value).map_err(|e| ScriptError::InvalidConfig(format!("{name}: {e}")))
}
