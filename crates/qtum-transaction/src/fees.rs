//! Fee estimation and output planning.
//!
//! Fees are charged per estimated serialized byte. The estimate is
//! computed before signing, so each input is costed at the fixed size
//! of a signed P2PKH input and each output at its script length plus
//! the value/length overhead.

use qtum_primitives::Amount;
use qtum_script::{template, Script};

use crate::output::TxOutput;
use crate::TransactionError;

/// Fixed overhead of a transaction: version, locktime, and the two
/// count varints.
pub const TX_EMPTY_SIZE: usize = 10;

/// Per-input overhead excluding the script: txid, vout, script length
/// varint, sequence.
pub const TX_INPUT_BASE: usize = 41;

/// Estimated size of a signed P2PKH unlocking script: signature push
/// (1 + 72) plus compressed key push (1 + 33).
pub const TX_INPUT_SCRIPT_SIG: usize = 107;

/// Per-output overhead excluding the script: value plus script length
/// varint.
pub const TX_OUTPUT_BASE: usize = 9;

/// Fee rate in satoshis per estimated byte.
pub const FEE_PER_BYTE: i64 = 400;

/// Margin added to the funding target when a selection comes up short,
/// covering the fee growth from spending additional inputs on retry.
pub const RETRY_MARGIN: Amount = Amount::from_sats(194_000);

/// Estimate the serialized size of a transaction before signing.
///
/// # Arguments
/// * `input_count` - Number of inputs, each costed as a signed P2PKH spend.
/// * `output_scripts` - The locking scripts of every planned output.
pub fn estimate_size(input_count: usize, output_scripts: &[&Script]) -> usize {
    TX_EMPTY_SIZE
        + input_count * (TX_INPUT_BASE + TX_INPUT_SCRIPT_SIG)
        + output_scripts
            .iter()
            .map(|s| TX_OUTPUT_BASE + s.len())
            .sum::<usize>()
}

/// Compute the fee for an estimated transaction size.
pub fn fee_for_size(size: usize) -> Result<Amount, TransactionError> {
    Ok(Amount::from_sats(size as i64)
        .checked_mul(FEE_PER_BYTE)?
        .trunc7())
}

/// The outcome of planning a transaction's outputs.
#[derive(Clone, Debug)]
pub enum OutputPlan {
    /// The selection covers value, gas, and fee; outputs are final.
    Funded(Vec<TxOutput>),
    /// The selection comes up short; retry selection with this target.
    Underfunded(Amount),
}

/// Plan the outputs for a funded transaction.
///
/// The primary output always sits at index 0. Whatever remains of the
/// selected balance after the transferred value, the gas budget, and
/// the fee returns to the spender as a P2PKH change output at index 1.
/// Zero change drops the change output; negative change reports an
/// updated funding target (original target plus fee plus retry margin).
///
/// The fee is estimated against both the primary and change scripts
/// even when the change output is ultimately dropped.
///
/// # Arguments
/// * `primary_script` - Locking script of the main output.
/// * `primary_value` - Value carried by the main output.
/// * `gas` - Gas budget consumed by contract execution (zero for transfers).
/// * `selection_total` - Total selected input balance.
/// * `input_count` - Number of selected inputs.
/// * `change_pubkey_hash` - The spender's public key hash for change.
/// * `target` - The pre-fee funding target, used to derive the retry target.
pub fn plan_outputs(
    primary_script: Script,
    primary_value: Amount,
    gas: Amount,
    selection_total: Amount,
    input_count: usize,
    change_pubkey_hash: &[u8; 20],
    target: Amount,
) -> Result<OutputPlan, TransactionError> {
    let change_script = template::p2pkh_lock(change_pubkey_hash);

    let size = estimate_size(input_count, &[&primary_script, &change_script]);
    let fee = fee_for_size(size)?;

    let change = selection_total
        .checked_sub(gas)?
        .checked_sub(primary_value)?
        .checked_sub(fee)?;

    if change.is_negative() {
        let retry_target = target.checked_add(fee)?.checked_add(RETRY_MARGIN)?;
        return Ok(OutputPlan::Underfunded(retry_target));
    }

    let mut outputs = vec![TxOutput::new(primary_value, primary_script)];
    if change > Amount::ZERO {
        outputs.push(TxOutput::new(change, change_script));
    }
    Ok(OutputPlan::Funded(outputs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkh() -> [u8; 20] {
        [0x75; 20]
    }

    fn p2pkh() -> Script {
        template::p2pkh_lock(&pkh())
    }

    #[test]
    fn test_estimate_size_transfer_shape() {
        // 1 input, payment + change outputs, both P2PKH
        let out = p2pkh();
        let size = estimate_size(1, &[&out, &out]);
        assert_eq!(size, 10 + 148 + 34 + 34);
    }

    #[test]
    fn test_fee_is_per_byte() {
        assert_eq!(fee_for_size(226).unwrap(), Amount::from_sats(90_400));
        assert_eq!(fee_for_size(0).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_fee_monotonic_in_size() {
        let mut last = Amount::ZERO;
        for size in [10usize, 100, 250, 1000, 10_000] {
            let fee = fee_for_size(size).unwrap();
            assert!(fee > last);
            last = fee;
        }
    }

    #[test]
    fn test_plan_with_change() {
        // 5 coins selected, 0.1 value, no gas
        let plan = plan_outputs(
            p2pkh(),
            Amount::from_sats(10_000_000),
            Amount::ZERO,
            Amount::from_coins(5),
            1,
            &pkh(),
            Amount::from_sats(10_000_000),
        )
        .unwrap();

        let outputs = match plan {
            OutputPlan::Funded(o) => o,
            OutputPlan::Underfunded(_) => panic!("expected funded plan"),
        };
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].value, Amount::from_sats(10_000_000));

        let fee = fee_for_size(estimate_size(1, &[&p2pkh(), &p2pkh()])).unwrap();
        assert_eq!(
            outputs[1].value,
            Amount::from_coins(5) - Amount::from_sats(10_000_000) - fee
        );
        assert!(outputs[1].script.is_p2pkh());
    }

    #[test]
    fn test_exactly_sufficient_drops_change() {
        let fee = fee_for_size(estimate_size(1, &[&p2pkh(), &p2pkh()])).unwrap();
        let value = Amount::from_sats(10_000_000);
        let plan = plan_outputs(
            p2pkh(),
            value,
            Amount::ZERO,
            value.checked_add(fee).unwrap(),
            1,
            &pkh(),
            value,
        )
        .unwrap();

        match plan {
            OutputPlan::Funded(outputs) => {
                assert_eq!(outputs.len(), 1, "zero change drops the change output");
            }
            OutputPlan::Underfunded(_) => panic!("expected funded plan"),
        }
    }

    #[test]
    fn test_underfunded_reports_retry_target() {
        let value = Amount::from_sats(10_000_000);
        let plan = plan_outputs(
            p2pkh(),
            value,
            Amount::ZERO,
            Amount::from_sats(10_000_000), // covers value but not fee
            1,
            &pkh(),
            value,
        )
        .unwrap();

        let fee = fee_for_size(estimate_size(1, &[&p2pkh(), &p2pkh()])).unwrap();
        match plan {
            OutputPlan::Underfunded(retry) => {
                assert_eq!(
                    retry,
                    value.checked_add(fee).unwrap().checked_add(RETRY_MARGIN).unwrap()
                );
            }
            OutputPlan::Funded(_) => panic!("expected underfunded plan"),
        }
    }

    #[test]
    fn test_gas_reduces_change() {
        let gas = Amount::from_sats(10_000_000);
        let plan = plan_outputs(
            p2pkh(),
            Amount::ZERO,
            gas,
            Amount::from_coins(1),
            1,
            &pkh(),
            gas,
        )
        .unwrap();
        let outputs = match plan {
            OutputPlan::Funded(o) => o,
            OutputPlan::Underfunded(_) => panic!("expected funded plan"),
        };
        let fee = fee_for_size(estimate_size(1, &[&p2pkh(), &p2pkh()])).unwrap();
        assert_eq!(outputs[1].value, Amount::from_coins(1) - gas - fee);
    }
}
