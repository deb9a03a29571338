//! The one-shot authenticated contract call: build the call, submit it once,
//! wait for inclusion and report the receipt.
//!
//! No step is ever retried; each run submits at most one transaction.

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::Function,
    network::{Ethereum, TransactionBuilder},
    providers::{DynProvider, PendingTransactionBuilder, Provider},
    rpc::types::TransactionRequest,
    transports::{RpcError, TransportErrorKind},
};
use alloy_primitives::{Address, Bytes, TxHash};
use tracing::{debug, info};

use crate::{
    abi::{coerce_args, encode_call, InterfaceDescription},
    errors::ScriptError,
};

// -----------------
// | Contract Call |
// -----------------

/// A fully-encoded, not-yet-submitted call to a contract method
#[derive(Debug, Clone)]
pub struct ContractCall {
    /// The target contract
    address: Address,
    /// The method being invoked
    function: Function,
    /// The ABI-encoded calldata
    calldata: Bytes,
    /// What the call does, announced once it is about to be submitted
    action: Option<String>,
}

impl ContractCall {
    /// Binds `name` on the given interface to `address` and encodes `args`
    pub fn new(
        address: Address,
        interface: &InterfaceDescription,
        name: &str,
        args: &[DynSolValue],
    ) -> Result<Self, ScriptError> {
        let function = interface.function(name, args.len())?;
        let calldata = encode_call(function, args)?;

        Ok(Self {
            address,
            function: function.clone(),
            calldata: calldata.into(),
            action: None,
        })
    }

    /// Like [`ContractCall::new`], coercing string arguments to the method's input types
    pub fn from_str_args<S: AsRef<str>>(
        address: Address,
        interface: &InterfaceDescription,
        name: &str,
        args: &[S],
    ) -> Result<Self, ScriptError> {
        let function = interface.function(name, args.len())?;
        let values = coerce_args(function, args)?;
        Self::new(address, interface, name, &values)
    }

    /// Attaches a human-readable description of what the call does
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// The description of what the call does, if any
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// The target contract
    pub fn address(&self) -> Address {
        self.address
    }

    /// The signature of the invoked method
    pub fn signature(&self) -> String {
        self.function.signature()
    }

    /// The ABI-encoded calldata
    pub fn calldata(&self) -> &Bytes {
        &self.calldata
    }

    /// The transaction submitting this call; nonce, gas and chain id are left to the client
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_to(self.address)
            .with_input(self.calldata.clone())
    }
}

// ------------
// | Outcomes |
// ------------

/// What the network reported once the transaction was included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inclusion {
    /// Whether execution succeeded
    pub status: bool,
    /// Gas consumed by the transaction
    pub gas_used: u128,
    /// The block containing the transaction
    pub block_number: Option<u64>,
}

/// The record of a successfully executed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallOutcome {
    /// The transaction hash
    pub tx_hash: TxHash,
    /// Gas consumed by the transaction
    pub gas_used: u128,
    /// The block containing the transaction
    pub block_number: u64,
}

impl CallOutcome {
    /// Prints the confirmation lines
    pub fn report(&self) {
        println!("Transaction confirmed");
        println!("Gas used: {}", self.gas_used);
        println!("Block number: {}", self.block_number);
    }
}

// ----------
// | Sender |
// ----------

/// Submits transactions and waits for their inclusion
#[allow(async_fn_in_trait)]
pub trait CallSender {
    /// A handle on a submitted, not-yet-included transaction
    type Pending;

    /// Submits the transaction, returning its hash once the node accepts it
    async fn send(&self, tx: TransactionRequest) -> Result<(TxHash, Self::Pending), ScriptError>;

    /// Blocks until the transaction is included
    async fn confirm(&self, pending: Self::Pending) -> Result<Inclusion, ScriptError>;
}

/// A [`CallSender`] backed by a signing JSON-RPC client
#[derive(Clone)]
pub struct RpcSender {
    /// The signing provider
    provider: DynProvider,
}

impl RpcSender {
    /// Wraps a signing provider
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

impl CallSender for RpcSender {
    type Pending = PendingTransactionBuilder<Ethereum>;

    async fn send(&self, tx: TransactionRequest) -> Result<(TxHash, Self::Pending), ScriptError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(classify_rpc_error)?;

        Ok((*pending.tx_hash(), pending))
    }

    async fn confirm(&self, pending: Self::Pending) -> Result<Inclusion, ScriptError> {
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ScriptError::Confirmation(e.to_string()))?;

        Ok(Inclusion {
            status: receipt.status(),
            gas_used: u128::from(receipt.gas_used),
            block_number: receipt.block_number,
        })
    }
}

/// Sorts a JSON-RPC failure into the script error taxonomy
fn classify_rpc_error(err: RpcError<TransportErrorKind>) -> ScriptError {
    match err {
        RpcError::Transport(kind) => ScriptError::Connectivity(kind.to_string()),
        // Reverts surface here when gas estimation simulates the call
        RpcError::ErrorResp(payload) if is_revert(&payload.message) => {
            ScriptError::Reverted(payload.to_string())
        }
        RpcError::ErrorResp(payload) => ScriptError::Submission(payload.to_string()),
        other => ScriptError::Submission(other.to_string()),
    }
}

/// Whether a node error message reports a reverted execution
fn is_revert(message: &str) -> bool {
    message.to_ascii_lowercase().contains("revert")
}

// ------------
// | Executor |
// ------------

/// Submits `call` exactly once and waits for its inclusion.
///
/// Prints the transaction hash as soon as it is known and the confirmation
/// lines once the receipt arrives. A reverted receipt is an error.
pub async fn execute_call<S: CallSender>(
    sender: &S,
    call: &ContractCall,
) -> Result<CallOutcome, ScriptError> {
    info!(
        contract = %format!("{:#x}", call.address()),
        method = %call.signature(),
        "submitting transaction"
    );

    let (tx_hash, pending) = sender.send(call.to_request()).await?;
    println!("Transaction hash: {tx_hash:#x}");

    debug!("waiting for inclusion");
    let inclusion = sender.confirm(pending).await?;

    if !inclusion.status {
        let block = inclusion
            .block_number
            .map(|n| format!(" in block {n}"))
            .unwrap_or_default();
        return Err(ScriptError::Reverted(format!(
            "{} reverted{block} (tx {tx_hash:#x})",
            call.signature()
        )));
    }

    let block_number = inclusion.block_number.ok_or_else(|| {
        ScriptError::Confirmation(format!("receipt for {tx_hash:#x} has no block number"))
    })?;

    let outcome = CallOutcome {
        tx_hash,
        gas_used: inclusion.gas_used,
        block_number,
    };
    outcome.report();

    Ok(outcome)
}
