//! Definitions of errors that can occur during the execution of the contract management scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the contract management scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A required configuration value was not provided
    MissingConfig(String),
    /// A configuration value could not be parsed
    InvalidConfig(String),
    /// Error reading or parsing a contract ABI file
    ReadAbi(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error reaching the RPC endpoint
    Connectivity(String),
    /// The node rejected the transaction before inclusion
    Submission(String),
    /// The contract reverted the call
    Reverted(String),
    /// Error waiting for the transaction to be included
    Confirmation(String),
}

/// The coarse classes of [`ScriptError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input, detected before any network interaction
    Configuration,
    /// The endpoint could not be reached
    Connectivity,
    /// The transaction was rejected before inclusion
    Submission,
    /// The target contract reverted the call
    Execution,
}

impl ScriptError {
    /// The class this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScriptError::MissingConfig(_)
            | ScriptError::InvalidConfig(_)
            | ScriptError::ReadAbi(_)
            | ScriptError::CalldataConstruction(_) => ErrorKind::Configuration,
            ScriptError::Connectivity(_) | ScriptError::Confirmation(_) => ErrorKind::Connectivity,
            ScriptError::Submission(_) => ErrorKind::Submission,
            ScriptError::Reverted(_) => ErrorKind::Execution,
        }
    }
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::MissingConfig(s) => write!(f, "missing configuration: {}", s),
            ScriptError::InvalidConfig(s) => write!(f, "invalid configuration: {}", s),
            ScriptError::ReadAbi(s) => write!(f, "error reading ABI: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::Connectivity(s) => write!(f, "error reaching RPC endpoint: {}", s),
            ScriptError::Submission(s) => write!(f, "transaction rejected: {}", s),
            ScriptError::Reverted(s) => write!(f, "transaction reverted: {}", s),
            ScriptError::Confirmation(s) => {
                write!(f, "error waiting for confirmation: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}
