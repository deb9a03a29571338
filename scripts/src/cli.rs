//! Definitions of CLI arguments and commands for the admin scripts

use std::path::{Path, PathBuf};

use alloy_primitives::U256;
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{
        generic_call, print_token_id, set_metadata_call, set_minter_call, set_stables_staking_call,
        submit, whitelist_nft_call,
    },
    constants::{
        ABI_DIR_ENV_VAR, DEFAULT_ABI_DIR, DEFAULT_MINTER_ROLE, NFT_ADDRESS_ENV_VAR,
        NFT_STAKING_ADDRESS_ENV_VAR, PRIVATE_KEY_ENV_VAR, RPC_URL_ENV_VAR,
        STABLES_ADDRESS_ENV_VAR, STABLES_STAKING_ADDRESS_ENV_VAR,
    },
    errors::ScriptError,
};

/// Administrative calls on the deployed bond & stablecoin contracts.
///
/// Every command except `token-id` submits exactly one transaction.
///
/// Exits with a non-zero status if the configuration is missing or invalid,
/// the node cannot be reached, the transaction is rejected or it reverts.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Private key of the signing account
    #[arg(short, long, global = true, env = PRIVATE_KEY_ENV_VAR, hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, global = true, env = RPC_URL_ENV_VAR)]
    pub rpc_url: Option<String>,

    /// Directory containing the contract ABI files
    #[arg(long, global = true, env = ABI_DIR_ENV_VAR, default_value = DEFAULT_ABI_DIR)]
    pub abi_dir: PathBuf,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available scripts
#[derive(Subcommand)]
pub enum Command {
    /// Grant the minter role on the stablecoin contract
    SetMinter(SetMinterArgs),
    /// Whitelist an NFT contract on the staking contract
    WhitelistNft(WhitelistNftArgs),
    /// Point the staking contract at the stables staking contract
    SetStablesStaking(SetStablesStakingArgs),
    /// Write the metadata of a bond token
    SetMetadata(SetMetadataArgs),
    /// Invoke an arbitrary method described by an ABI file
    Call(CallArgs),
    /// Print the token id derived from a CUSIP; sends nothing
    TokenId(TokenIdArgs),
}

impl Command {
    /// Runs the command, submitting at most one transaction
    pub async fn run(
        self,
        priv_key: Option<&str>,
        rpc_url: Option<&str>,
        abi_dir: &Path,
    ) -> Result<(), ScriptError> {
        let call = match self {
            Command::TokenId(args) => {
                print_token_id(&args);
                return Ok(());
            }
            Command::SetMinter(args) => set_minter_call(&args, abi_dir)?,
            Command::WhitelistNft(args) => whitelist_nft_call(&args, abi_dir)?,
            Command::SetStablesStaking(args) => set_stables_staking_call(&args, abi_dir)?,
            Command::SetMetadata(args) => set_metadata_call(&args, abi_dir)?,
            Command::Call(args) => generic_call(&args)?,
        };

        submit(&call, priv_key, rpc_url).await.map(|_| ())
    }
}

/// Grant a role on the stablecoin contract
#[derive(Args)]
pub struct SetMinterArgs {
    /// Address of the stablecoin contract
    #[arg(long, env = STABLES_ADDRESS_ENV_VAR)]
    pub stables: Option<String>,

    /// Address receiving the role, the NFT staking contract by default
    #[arg(long, env = NFT_STAKING_ADDRESS_ENV_VAR)]
    pub minter: Option<String>,

    /// Name of the role to grant
    #[arg(long, default_value = DEFAULT_MINTER_ROLE)]
    pub role: String,
}

/// Whitelist an NFT contract
#[derive(Args)]
pub struct WhitelistNftArgs {
    /// Address of the NFT staking & borrowing contract
    #[arg(long, env = NFT_STAKING_ADDRESS_ENV_VAR)]
    pub nft_staking: Option<String>,

    /// Address of the NFT contract to whitelist
    #[arg(long, env = NFT_ADDRESS_ENV_VAR)]
    pub nft: Option<String>,

    /// Remove the NFT contract from the whitelist instead
    #[arg(long)]
    pub remove: bool,
}

/// Set the stables staking contract
#[derive(Args)]
pub struct SetStablesStakingArgs {
    /// Address of the NFT staking & borrowing contract
    #[arg(long, env = NFT_STAKING_ADDRESS_ENV_VAR)]
    pub nft_staking: Option<String>,

    /// Address of the stables staking contract
    #[arg(long, env = STABLES_STAKING_ADDRESS_ENV_VAR)]
    pub stables_staking: Option<String>,
}

/// Write bond metadata
#[derive(Args)]
pub struct SetMetadataArgs {
    /// Address of the bond NFT contract
    #[arg(long, env = NFT_ADDRESS_ENV_VAR)]
    pub nft: Option<String>,

    /// Face value, in the stablecoin's base units
    #[arg(long)]
    pub value: U256,

    /// Coupon value, in the stablecoin's base units
    #[arg(long, default_value = "0")]
    pub coupon_value: U256,

    /// Issue date as a unix timestamp
    #[arg(long)]
    pub issue_timestamp: u64,

    /// Maturity date as a unix timestamp
    #[arg(long)]
    pub expiration_timestamp: u64,

    /// CUSIP of the bond, from which the token id is derived
    #[arg(long)]
    pub cusip: String,
}

/// Invoke a method by name
#[derive(Args)]
pub struct CallArgs {
    /// Address of the target contract
    #[arg(short, long)]
    pub address: String,

    /// Path to the contract's ABI file
    #[arg(long)]
    pub abi: PathBuf,

    /// Name of the method to invoke
    #[arg(short, long)]
    pub function: String,

    /// Method arguments, in ABI order
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Derive a bond token id
#[derive(Args)]
pub struct TokenIdArgs {
    /// CUSIP of the bond
    pub cusip: String,
}
