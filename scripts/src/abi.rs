//! Loading of contract interface descriptions (ABI files) and calldata construction

use std::{fs, path::Path};

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Function, JsonAbi},
};
use serde_json::Value;
use tracing::debug;

use crate::{constants::ARTIFACT_ABI_KEY, errors::ScriptError};

/// The callable interface of a deployed contract
#[derive(Debug, Clone)]
pub struct InterfaceDescription {
    /// The parsed ABI
    abi: JsonAbi,
}

impl InterfaceDescription {
    /// Reads an interface description from a JSON file.
    ///
    /// Both bare ABI arrays and compiler artifacts (objects with an `abi`
    /// field) are accepted.
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadAbi(format!("{}: {e}", path.display())))?;
        let interface = Self::from_json_str(&contents)
            .map_err(|e| ScriptError::ReadAbi(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), "loaded contract ABI");
        Ok(interface)
    }

    /// Parses an interface description from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut value: Value = serde_json::from_str(json)?;
        if let Some(abi) = value.get_mut(ARTIFACT_ABI_KEY) {
            value = abi.take();
        }

        let abi = serde_json::from_value(value)?;
        Ok(Self { abi })
    }

    /// Finds the function `name` taking `num_args` arguments
    pub fn function(&self, name: &str, num_args: usize) -> Result<&Function, ScriptError> {
        let overloads = self.abi.function(name).ok_or_else(|| {
            ScriptError::CalldataConstruction(format!("function `{name}` not found in ABI"))
        })?;

        overloads
            .iter()
            .find(|f| f.inputs.len() == num_args)
            .ok_or_else(|| {
                let arities = overloads.iter().map(|f| f.inputs.len().to_string());
                ScriptError::CalldataConstruction(format!(
                    "function `{name}` takes {} argument(s), got {num_args}",
                    arities.collect::<Vec<_>>().join(" or ")
                ))
            })
    }
}

/// Encodes a call to `function` with the given arguments, checking them
/// against the declared input types
pub fn encode_call(function: &Function, args: &[DynSolValue]) -> Result<Vec<u8>, ScriptError> {
    function
        .abi_encode_input(args)
        .map_err(|e| ScriptError::CalldataConstruction(format!("{}: {e}", function.signature())))
}

/// Coerces string arguments into values of the function's input types
pub fn coerce_args<S: AsRef<str>>(
    function: &Function,
    args: &[S],
) -> Result<Vec<DynSolValue>, ScriptError> {
    if args.len() != function.inputs.len() {
        return Err(ScriptError::CalldataConstruction(format!(
            "{} takes {} argument(s), got {}",
            function.signature(),
            function.inputs.len(),
            args.len()
        )));
    }

    function
        .inputs
        .iter()
        .zip(args)
        .map(|(param, arg)| {
            let ty: DynSolType = param
                .resolve()
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
            ty.coerce_str(arg.as_ref()).map_err(|e| {
                ScriptError::CalldataConstruction(format!("argument `{}`: {e}", param.name))
            })
        })
        .collect()
}
