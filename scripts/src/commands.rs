//! Implementations of the various admin scripts

use std::path::Path;

use alloy::dyn_abi::DynSolValue;
use tracing::{info, warn};

use crate::{
    abi::InterfaceDescription,
    cli::{
        CallArgs, SetMetadataArgs, SetMinterArgs, SetStablesStakingArgs, TokenIdArgs,
        WhitelistNftArgs,
    },
    config::Credentials,
    constants::{
        BOND_NFT_ABI_FILE, GRANT_ROLE_METHOD, NFT_ADDRESS_ENV_VAR, NFT_STAKING_ABI_FILE,
        NFT_STAKING_ADDRESS_ENV_VAR, SET_METADATA_METHOD, SET_STABLES_STAKING_METHOD,
        STABLES_ADDRESS_ENV_VAR, STABLES_STAKING_ADDRESS_ENV_VAR, STABLE_BOND_COINS_ABI_FILE,
        WHITELIST_NFT_METHOD,
    },
    errors::ScriptError,
    executor::{execute_call, CallOutcome, ContractCall},
    types::BondMetadata,
    utils::{parse_address, role_id, token_id},
};

/// Builds the `grantRole(role, minter)` call on the stablecoin contract
pub fn set_minter_call(args: &SetMinterArgs, abi_dir: &Path) -> Result<ContractCall, ScriptError> {
    let stables = parse_address(STABLES_ADDRESS_ENV_VAR, args.stables.as_deref())?;
    let minter = parse_address(NFT_STAKING_ADDRESS_ENV_VAR, args.minter.as_deref())?;
    let interface = InterfaceDescription::from_file(&abi_dir.join(STABLE_BOND_COINS_ABI_FILE))?;

    let role = role_id(&args.role);
    let call = ContractCall::new(
        stables,
        &interface,
        GRANT_ROLE_METHOD,
        &[DynSolValue::FixedBytes(role, 32), DynSolValue::Address(minter)],
    )?;

    Ok(call.with_action(format!("Granting {} to {minter:#x}...", args.role)))
}

/// Builds the `whitelistNFT(nft, status)` call on the staking contract
pub fn whitelist_nft_call(
    args: &WhitelistNftArgs,
    abi_dir: &Path,
) -> Result<ContractCall, ScriptError> {
    let staking = parse_address(NFT_STAKING_ADDRESS_ENV_VAR, args.nft_staking.as_deref())?;
    let nft = parse_address(NFT_ADDRESS_ENV_VAR, args.nft.as_deref())?;
    let interface = InterfaceDescription::from_file(&abi_dir.join(NFT_STAKING_ABI_FILE))?;

    let whitelisted = !args.remove;
    let action = if whitelisted {
        format!("Whitelisting NFT contract {nft:#x}...")
    } else {
        format!("Removing NFT contract {nft:#x} from the whitelist...")
    };

    let call = ContractCall::new(
        staking,
        &interface,
        WHITELIST_NFT_METHOD,
        &[DynSolValue::Address(nft), DynSolValue::Bool(whitelisted)],
    )?;
    Ok(call.with_action(action))
}

/// Builds the `setStablesStakingAddress(stablesStaking)` call on the staking contract
pub fn set_stables_staking_call(
    args: &SetStablesStakingArgs,
    abi_dir: &Path,
) -> Result<ContractCall, ScriptError> {
    let staking = parse_address(NFT_STAKING_ADDRESS_ENV_VAR, args.nft_staking.as_deref())?;
    let stables_staking =
        parse_address(STABLES_STAKING_ADDRESS_ENV_VAR, args.stables_staking.as_deref())?;
    let interface = InterfaceDescription::from_file(&abi_dir.join(NFT_STAKING_ABI_FILE))?;

    let call = ContractCall::new(
        staking,
        &interface,
        SET_STABLES_STAKING_METHOD,
        &[DynSolValue::Address(stables_staking)],
    )?;
    Ok(call.with_action(format!(
        "Setting stables staking contract to {stables_staking:#x}..."
    )))
}

/// Builds the `setMetaData(tokenId, metadata)` call on the bond NFT contract
pub fn set_metadata_call(
    args: &SetMetadataArgs,
    abi_dir: &Path,
) -> Result<ContractCall, ScriptError> {
    let nft = parse_address(NFT_ADDRESS_ENV_VAR, args.nft.as_deref())?;
    let interface = InterfaceDescription::from_file(&abi_dir.join(BOND_NFT_ABI_FILE))?;

    let metadata = BondMetadata::from(args);
    if metadata.expiration_timestamp <= metadata.issue_timestamp {
        warn!(
            issue = metadata.issue_timestamp,
            expiration = metadata.expiration_timestamp,
            "bond expires before it is issued"
        );
    }

    let token_id = metadata.token_id();
    let function = interface.function(SET_METADATA_METHOD, 2)?;
    let record = metadata.to_sol_value(&function.inputs[1])?;

    // The metadata struct serializes infallibly
    let json = serde_json::to_string_pretty(&metadata).unwrap_or_default();
    println!("Metadata: {json}");
    println!("TokenId: {token_id}");

    let call = ContractCall::new(
        nft,
        &interface,
        SET_METADATA_METHOD,
        &[DynSolValue::Uint(token_id, 256), record],
    )?;
    Ok(call.with_action("Setting metadata..."))
}

/// Builds a call to an arbitrary method from string arguments
pub fn generic_call(args: &CallArgs) -> Result<ContractCall, ScriptError> {
    let address = parse_address("--address", Some(&args.address))?;
    let interface = InterfaceDescription::from_file(&args.abi)?;

    ContractCall::from_str_args(address, &interface, &args.function, &args.args)
}

/// Prints the token id derived from a CUSIP
pub fn print_token_id(args: &TokenIdArgs) {
    let id = token_id(&args.cusip);
    println!("TokenId: {id}");
    println!("TokenId (hex): {:#x}", id);
}

/// Signs and submits a call, waiting for its inclusion
pub async fn submit(
    call: &ContractCall,
    priv_key: Option<&str>,
    rpc_url: Option<&str>,
) -> Result<CallOutcome, ScriptError> {
    let credentials = Credentials::new(priv_key, rpc_url)?;
    if let Some(action) = call.action() {
        println!("{action}");
    }

    info!(
        signer = %format!("{:#x}", credentials.address()),
        rpc_url = %credentials.rpc_url(),
        "connecting"
    );

    let sender = credentials.connect();
    execute_call(&sender, call).await
}

impl From<&SetMetadataArgs> for BondMetadata {
    fn from(args: &SetMetadataArgs) -> Self {
        BondMetadata {
            value: args.value,
            coupon_value: args.coupon_value,
            issue_timestamp: args.issue_timestamp,
            expiration_timestamp: args.expiration_timestamp,
            cusip: args.cusip.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use alloy_primitives::{hex, keccak256, U256};

    use crate::{
        cli::{
            CallArgs, Command, SetMetadataArgs, SetMinterArgs, SetStablesStakingArgs,
            TokenIdArgs, WhitelistNftArgs,
        },
        errors::{ErrorKind, ScriptError},
        executor::{execute_call, tests::MockSender},
        utils::{role_id, token_id},
    };

    use super::{
        generic_call, set_metadata_call, set_minter_call, set_stables_staking_call,
        whitelist_nft_call,
    };

    /// The stablecoin contract
    const STABLES: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    /// The NFT staking contract
    const NFT_STAKING: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";
    /// The bond NFT contract
    const NFT: &str = "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0";
    /// The stables staking contract
    const STABLES_STAKING: &str = "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9";
    /// The first default Anvil account
    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    /// The directory of bundled ABI files
    fn abi_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("abi")
    }

    /// The first four bytes of the keccak hash of a signature
    fn selector(signature: &str) -> [u8; 4] {
        keccak256(signature.as_bytes())[..4].try_into().unwrap()
    }

    /// Metadata arguments for a sample treasury bill
    fn metadata_args() -> SetMetadataArgs {
        SetMetadataArgs {
            nft: Some(NFT.to_string()),
            value: U256::from(100_000000u64),
            coupon_value: U256::ZERO,
            issue_timestamp: 1728518400,
            expiration_timestamp: 1744243200,
            cusip: "912797NB9".to_string(),
        }
    }

    #[test]
    fn test_set_minter_call() {
        let args = SetMinterArgs {
            stables: Some(STABLES.to_string()),
            minter: Some(NFT_STAKING.to_string()),
            role: "MINTER_ROLE".to_string(),
        };
        let call = set_minter_call(&args, &abi_dir()).unwrap();

        assert_eq!(format!("{:#x}", call.address()), STABLES.to_lowercase());
        assert_eq!(
            call.action(),
            Some(format!("Granting MINTER_ROLE to {}...", NFT_STAKING.to_lowercase()).as_str())
        );
        assert_eq!(call.calldata()[..4], hex!("2f2ff15d"));
        assert_eq!(call.calldata()[4..36], role_id("MINTER_ROLE")[..]);
    }

    #[test]
    fn test_set_minter_missing_address() {
        let args = SetMinterArgs {
            stables: None,
            minter: Some(NFT_STAKING.to_string()),
            role: "MINTER_ROLE".to_string(),
        };
        let err = set_minter_call(&args, &abi_dir()).unwrap_err();
        assert_eq!(err, ScriptError::MissingConfig("STABLES_ADDRESS".to_string()));
    }

    #[test]
    fn test_whitelist_nft_call() {
        let mut args = WhitelistNftArgs {
            nft_staking: Some(NFT_STAKING.to_string()),
            nft: Some(NFT.to_string()),
            remove: false,
        };
        let call = whitelist_nft_call(&args, &abi_dir()).unwrap();
        assert_eq!(call.signature(), "whitelistNFT(address,bool)");
        assert_eq!(call.calldata()[..4], selector("whitelistNFT(address,bool)"));
        assert_eq!(call.calldata()[67], 1);

        args.remove = true;
        let call = whitelist_nft_call(&args, &abi_dir()).unwrap();
        assert_eq!(call.calldata()[67], 0);
        assert!(call.action().unwrap().starts_with("Removing NFT contract"));
    }

    #[test]
    fn test_set_stables_staking_call() {
        let args = SetStablesStakingArgs {
            nft_staking: Some(NFT_STAKING.to_string()),
            stables_staking: Some(STABLES_STAKING.to_string()),
        };
        let call = set_stables_staking_call(&args, &abi_dir()).unwrap();
        assert_eq!(
            call.calldata()[..4],
            selector("setStablesStakingAddress(address)")
        );
        assert_eq!(call.calldata().len(), 4 + 32);
    }

    #[test]
    fn test_set_stables_staking_malformed_address() {
        let args = SetStablesStakingArgs {
            nft_staking: Some(NFT_STAKING.to_string()),
            stables_staking: Some("0xnot-an-address".to_string()),
        };
        let err = set_stables_staking_call(&args, &abi_dir()).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidConfig(_)));
    }

    #[test]
    fn test_set_metadata_call() {
        let call = set_metadata_call(&metadata_args(), &abi_dir()).unwrap();
        assert_eq!(call.action(), Some("Setting metadata..."));

        assert_eq!(
            call.signature(),
            "setMetaData(uint256,(uint256,uint256,uint256,uint256,string))"
        );
        assert_eq!(
            call.calldata()[4..36],
            token_id("912797NB9").to_be_bytes::<32>()
        );
    }

    #[test]
    fn test_set_metadata_missing_abi() {
        let err = set_metadata_call(&metadata_args(), &abi_dir().join("missing")).unwrap_err();
        assert!(matches!(err, ScriptError::ReadAbi(_)));
    }

    #[test]
    fn test_generic_call() {
        let args = CallArgs {
            address: NFT.to_string(),
            abi: abi_dir().join("BondNFT.json"),
            function: "balanceOf".to_string(),
            args: vec![NFT_STAKING.to_string(), "1".to_string()],
        };
        let call = generic_call(&args).unwrap();
        assert_eq!(call.signature(), "balanceOf(address,uint256)");

        let args = CallArgs {
            args: vec![NFT_STAKING.to_string()],
            ..args
        };
        assert_eq!(generic_call(&args).unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_set_minter_submits_once() {
        let args = SetMinterArgs {
            stables: Some(STABLES.to_string()),
            minter: Some(NFT_STAKING.to_string()),
            role: "MINTER_ROLE".to_string(),
        };
        let call = set_minter_call(&args, &abi_dir()).unwrap();

        let sender = MockSender::succeeding();
        let outcome = execute_call(&sender, &call).await.unwrap();
        assert!(outcome.gas_used > 0);
        assert!(outcome.block_number > 0);
        assert_eq!(sender.num_sent(), 1);
    }

    #[tokio::test]
    async fn test_missing_secret_fails_before_network() {
        let command = Command::SetStablesStaking(SetStablesStakingArgs {
            nft_staking: Some(NFT_STAKING.to_string()),
            stables_staking: Some(STABLES_STAKING.to_string()),
        });

        // Nothing listens on this port; reaching it would surface a connectivity error
        let err = command
            .run(None, Some("http://127.0.0.1:1"), &abi_dir())
            .await
            .unwrap_err();
        assert_eq!(err, ScriptError::MissingConfig("PRIVATE_KEY".to_string()));
    }

    #[tokio::test]
    async fn test_missing_address_fails_before_network() {
        let command = Command::WhitelistNft(WhitelistNftArgs {
            nft_staking: Some(NFT_STAKING.to_string()),
            nft: None,
            remove: false,
        });

        let err = command
            .run(Some(ANVIL_KEY), Some("http://127.0.0.1:1"), &abi_dir())
            .await
            .unwrap_err();
        assert_eq!(err, ScriptError::MissingConfig("NFT_ADDRESS".to_string()));
    }

    #[tokio::test]
    async fn test_token_id_offline() {
        let command = Command::TokenId(TokenIdArgs {
            cusip: "912797NB9".to_string(),
        });
        command.run(None, None, &abi_dir()).await.unwrap();
    }
}
