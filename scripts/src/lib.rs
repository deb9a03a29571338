//! Scripts for administering the deployed bond & stablecoin contracts.
//!
//! Each script binds a contract ABI to a deployed address and submits a
//! single signed transaction through [`executor::execute_call`].

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod abi;
pub mod cli;
mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod executor;
pub mod types;
pub mod utils;
