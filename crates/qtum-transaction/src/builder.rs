//! End-to-end transaction assembly.
//!
//! The builder turns an account-style request into a signed UTXO
//! transaction: classify, fetch candidate UTXOs, select inputs, plan
//! outputs with fees, and sign every input. When the first selection
//! cannot cover the fee, selection is retried once against the updated
//! target before giving up.

use std::future::Future;

use tracing::debug;

use qtum_primitives::Amount;
use qtum_script::template;

use crate::fees::{plan_outputs, OutputPlan};
use crate::request::{parse_address, TransactionKind, TransactionRequest};
use crate::selector::{select_inputs, Utxo};
use crate::signer::{sign_all, DigestSigner};
use crate::transaction::Transaction;
use crate::TransactionError;

/// Errors a UTXO source can report.
#[derive(Debug, thiserror::Error)]
pub enum UtxoSourceError {
    /// The source itself determined the balance is insufficient.
    /// Forwarded to callers without remapping.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Any other source failure (transport, RPC, decoding).
    #[error("{0}")]
    Source(String),
}

/// A provider of spendable outputs for an address.
pub trait UtxoSource {
    /// Fetch UTXOs for `address` able to cover at least `target`.
    ///
    /// Sources may return more candidates than needed; selection trims
    /// the set.
    fn fetch_utxos(
        &self,
        address: &str,
        target: Amount,
    ) -> impl Future<Output = Result<Vec<Utxo>, UtxoSourceError>> + Send;
}

/// Build and sign a transaction satisfying `request`.
///
/// The spender is identified by the signer's public key; all selected
/// UTXOs are assumed locked to its key hash. Selection runs at most
/// twice: when the first pass cannot cover value, gas, and fee, the
/// source is queried again with the fee-adjusted target, and a second
/// shortfall is fatal.
///
/// # Arguments
/// * `source` - The UTXO source queried for spendable outputs.
/// * `signer` - The digest signer holding the spending key.
/// * `request` - The account-style request to satisfy.
///
/// # Returns
/// A fully signed transaction, or an error per the request validation
/// and funding rules.
pub async fn build_signed_transaction<S, K>(
    source: &S,
    signer: &K,
    request: &TransactionRequest,
) -> Result<Transaction, TransactionError>
where
    S: UtxoSource,
    K: DigestSigner,
{
    let (kind, needed) = request.classify()?;
    debug!(?kind, needed = %needed, "classified request");

    let spender_hash = signer.public_key().hash160();
    let spender_address = format!("0x{}", hex::encode(spender_hash));
    let spender_script = template::p2pkh_lock(&spender_hash);

    let (primary_script, primary_value, gas) = match kind {
        TransactionKind::Transfer => {
            let to = request.to.as_deref().unwrap_or_default();
            (
                template::p2pkh_lock(&parse_address(to)?),
                request.value.trunc7(),
                Amount::ZERO,
            )
        }
        TransactionKind::ContractCall => {
            let to = request.to.as_deref().unwrap_or_default();
            (
                template::contract_call(
                    request.gas_limit,
                    request.gas_price,
                    &request.data,
                    &parse_address(to)?,
                )?,
                request.value.trunc7(),
                request.gas_budget()?,
            )
        }
        TransactionKind::ContractCreation => (
            template::contract_create(request.gas_limit, request.gas_price, &request.data)?,
            Amount::ZERO,
            request.gas_budget()?,
        ),
    };

    let mut target = needed;
    let mut attempt = 0;
    loop {
        let utxos = source
            .fetch_utxos(&spender_address, target)
            .await
            .map_err(|e| match e {
                UtxoSourceError::InsufficientFunds(msg) => {
                    TransactionError::InsufficientFunds(msg)
                }
                // Any other fetch failure means funds cannot be gathered;
                // the source failure rides along as context.
                UtxoSourceError::Source(msg) => TransactionError::InsufficientFunds(format!(
                    "could not gather utxos: {}",
                    msg
                )),
            })?;
        debug!(attempt, count = utxos.len(), target = %target, "fetched utxos");

        let selection = select_inputs(&utxos, target, &spender_script)?;
        let plan = plan_outputs(
            primary_script.clone(),
            primary_value,
            gas,
            selection.total,
            selection.inputs.len(),
            &spender_hash,
            target,
        )?;

        match plan {
            OutputPlan::Funded(outputs) => {
                let mut tx = Transaction::new();
                tx.inputs = selection.inputs;
                tx.outputs = outputs;
                sign_all(&mut tx, signer)?;
                debug!(txid = %tx.tx_id_hex(), "built signed transaction");
                return Ok(tx);
            }
            OutputPlan::Underfunded(retry_target) => {
                if attempt > 0 {
                    return Err(TransactionError::InsufficientFunds(format!(
                        "needed {} but only {} available",
                        retry_target, selection.total
                    )));
                }
                debug!(selected = %selection.total, retry_target = %retry_target, "selection underfunded, retrying");
                target = retry_target;
                attempt += 1;
            }
        }
    }
}
