//! Constants used in the admin scripts

/// The environment variable holding the signer's private key
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// The environment variable holding the network RPC URL
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// The environment variable pointing to the directory of ABI files
pub const ABI_DIR_ENV_VAR: &str = "ABI_DIR";

/// The default directory from which ABI files are read
pub const DEFAULT_ABI_DIR: &str = "abi";

/// The environment variable holding the stablecoin contract address
pub const STABLES_ADDRESS_ENV_VAR: &str = "STABLES_ADDRESS";

/// The environment variable holding the NFT staking & borrowing contract address
pub const NFT_STAKING_ADDRESS_ENV_VAR: &str = "NFT_STAKING_ADDRESS";

/// The environment variable holding the bond NFT contract address
pub const NFT_ADDRESS_ENV_VAR: &str = "NFT_ADDRESS";

/// The environment variable holding the stables staking contract address
pub const STABLES_STAKING_ADDRESS_ENV_VAR: &str = "STABLES_STAKING_ADDRESS";

/// The ABI file of the stablecoin contract
pub const STABLE_BOND_COINS_ABI_FILE: &str = "StableBondCoins.json";

/// The ABI file of the NFT staking & borrowing contract
pub const NFT_STAKING_ABI_FILE: &str = "NFTStakingAndBorrowing.json";

/// The ABI file of the bond NFT contract
pub const BOND_NFT_ABI_FILE: &str = "BondNFT.json";

/// The key under which compiler artifacts store the ABI
pub const ARTIFACT_ABI_KEY: &str = "abi";

/// The role granted by `set-minter` unless overridden
pub const DEFAULT_MINTER_ROLE: &str = "MINTER_ROLE";

/// `AccessControl` role granting method
pub const GRANT_ROLE_METHOD: &str = "grantRole";

/// NFT whitelisting method on the staking contract
pub const WHITELIST_NFT_METHOD: &str = "whitelistNFT";

/// Stables staking pointer setter on the staking contract
pub const SET_STABLES_STAKING_METHOD: &str = "setStablesStakingAddress";

/// Bond metadata setter on the bond NFT contract
pub const SET_METADATA_METHOD: &str = "setMetaData";

/// The number of fields in a bond metadata record
pub const NUM_METADATA_FIELDS: usize = 5;
