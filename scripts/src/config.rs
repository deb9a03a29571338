//! Signer and endpoint configuration for the scripts

use std::{
    fmt::{self, Debug, Formatter},
    str::FromStr,
};

use alloy::{
    network::EthereumWallet,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::Address;

use crate::{
    constants::{PRIVATE_KEY_ENV_VAR, RPC_URL_ENV_VAR},
    errors::ScriptError,
    executor::RpcSender,
};

/// The credentials with which a script signs and submits its transaction
#[derive(Clone)]
pub struct Credentials {
    /// The signing key
    signer: PrivateKeySigner,
    /// The RPC endpoint
    rpc_url: Url,
}

impl Credentials {
    /// Validates the raw private key and RPC URL settings.
    ///
    /// Performs no network I/O, so missing or malformed settings are caught
    /// before anything is sent.
    pub fn new(priv_key: Option<&str>, rpc_url: Option<&str>) -> Result<Self, ScriptError> {
        let priv_key = required(PRIVATE_KEY_ENV_VAR, priv_key)?;
        let rpc_url = required(RPC_URL_ENV_VAR, rpc_url)?;

        // The key itself must never end up in an error message
        let signer = PrivateKeySigner::from_str(priv_key).map_err(|_| {
            ScriptError::InvalidConfig(format!("{PRIVATE_KEY_ENV_VAR} is not a valid private key"))
        })?;
        let rpc_url = Url::parse(rpc_url)
            .map_err(|e| ScriptError::InvalidConfig(format!("{RPC_URL_ENV_VAR}: {e}")))?;

        Ok(Self { signer, rpc_url })
    }

    /// The address of the signing account
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The RPC endpoint
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Builds a signing client for the endpoint.
    ///
    /// The client fills nonce, gas and chain id itself; nothing is sent until
    /// the first request.
    pub fn connect(&self) -> RpcSender {
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .on_http(self.rpc_url.clone());

        RpcSender::new(DynProvider::new(provider))
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &self.address())
            .field("rpc_url", &self.rpc_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Unwraps a required, non-empty setting
fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ScriptError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScriptError::MissingConfig(name.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use crate::errors::{ErrorKind, ScriptError};

    use super::Credentials;

    /// The first default Anvil account
    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_credentials() {
        let creds = Credentials::new(Some(ANVIL_KEY), Some("http://127.0.0.1:8545")).unwrap();
        assert_eq!(
            creds.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert_eq!(creds.rpc_url().as_str(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn test_missing_secret() {
        let err = Credentials::new(None, Some("http://127.0.0.1:8545")).unwrap_err();
        assert_eq!(err, ScriptError::MissingConfig("PRIVATE_KEY".to_string()));
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = Credentials::new(Some(""), Some("http://127.0.0.1:8545")).unwrap_err();
        assert_eq!(err, ScriptError::MissingConfig("PRIVATE_KEY".to_string()));
    }

    #[test]
    fn test_missing_rpc_url() {
        let err = Credentials::new(Some(ANVIL_KEY), None).unwrap_err();
        assert_eq!(err, ScriptError::MissingConfig("RPC_URL".to_string()));
    }

    #[test]
    fn test_invalid_values() {
        let err = Credentials::new(Some("0xdeadbeef"), Some("http://127.0.0.1:8545")).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidConfig(_)));
        assert!(!err.to_string().contains("deadbeef"));

        let err = Credentials::new(Some(ANVIL_KEY), Some("not a url")).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidConfig(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let creds = Credentials::new(Some(ANVIL_KEY), Some("http://127.0.0.1:8545")).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
    }
}
