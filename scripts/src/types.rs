//! Type definitions used throughout the scripts

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, Specifier},
    json_abi::Param,
};
use alloy_primitives::U256;
use serde::{Serialize, Serializer};

use crate::{constants::NUM_METADATA_FIELDS, errors::ScriptError, utils::token_id};

/// The metadata record stored for a bond token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BondMetadata {
    /// Face value of the bond, in the stablecoin's base units
    #[serde(serialize_with = "serialize_decimal")]
    pub value: U256,
    /// Coupon paid by the bond, in the stablecoin's base units
    #[serde(serialize_with = "serialize_decimal")]
    pub coupon_value: U256,
    /// Unix timestamp of issuance
    pub issue_timestamp: u64,
    /// Unix timestamp of maturity
    pub expiration_timestamp: u64,
    /// The bond's CUSIP identifier
    #[serde(rename = "CUSIP")]
    pub cusip: String,
}

impl BondMetadata {
    /// The token id under which this bond's metadata is stored
    pub fn token_id(&self) -> U256 {
        token_id(&self.cusip)
    }

    /// Builds the ABI value of this record for the tuple parameter `param`.
    ///
    /// Integer widths are taken from the parameter's components so the record
    /// encodes against whatever the deployed contract declares.
    pub fn to_sol_value(&self, param: &Param) -> Result<DynSolValue, ScriptError> {
        if param.components.len() != NUM_METADATA_FIELDS {
            return Err(ScriptError::CalldataConstruction(format!(
                "metadata parameter `{}` has {} fields, expected {NUM_METADATA_FIELDS}",
                param.name,
                param.components.len()
            )));
        }

        let integers = [
            self.value,
            self.coupon_value,
            U256::from(self.issue_timestamp),
            U256::from(self.expiration_timestamp),
        ];
        let mut fields = param
            .components
            .iter()
            .zip(integers)
            .map(|(component, value)| uint_field(component, value))
            .collect::<Result<Vec<_>, _>>()?;

        let identifier = &param.components[NUM_METADATA_FIELDS - 1];
        match resolve(identifier)? {
            DynSolType::String => fields.push(DynSolValue::String(self.cusip.clone())),
            other => {
                return Err(ScriptError::CalldataConstruction(format!(
                    "metadata field `{}` has type {other}, expected string",
                    identifier.name
                )))
            }
        }

        Ok(DynSolValue::Tuple(fields))
    }
}

/// Writes an amount as a decimal string, since it may exceed a JSON number
fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Resolves the type of an ABI parameter
fn resolve(param: &Param) -> Result<DynSolType, ScriptError> {
    param
        .resolve()
        .map_err(|e| ScriptError::CalldataConstruction(format!("`{}`: {e}", param.name)))
}

/// Builds an unsigned integer value for `param`, checking that it fits
fn uint_field(param: &Param, value: U256) -> Result<DynSolValue, ScriptError> {
    match resolve(param)? {
        DynSolType::Uint(bits) if value.bit_len() <= bits => Ok(DynSolValue::Uint(value, bits)),
        DynSolType::Uint(bits) => Err(ScriptError::CalldataConstruction(format!(
            "metadata field `{}` does not fit in uint{bits}: {value}",
            param.name
        ))),
        other => Err(ScriptError::CalldataConstruction(format!(
            "metadata field `{}` has type {other}, expected an unsigned integer",
            param.name
        ))),
    }
}
