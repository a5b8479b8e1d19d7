//! Energy cost schedule
//!
//! Energy charged for an account transaction is
//!
//! ```text
//! base + 100 * signatures + (60 + payload size)
//! ```
//!
//! where the base cost depends on the payload. The node rejects a
//! transaction whose header declares less energy than this, so the numbers
//! here must match the node's accounting exactly.

use ccd_codec::CodecError;
use ccd_primitives::Energy;

use crate::payload::Payload;
use crate::transaction::HEADER_SIZE;
use crate::TransactionError;

/// Energy per signature checked
pub const COST_PER_SIGNATURE: u64 = 100;

/// Energy per byte of header and payload
pub const COST_PER_BYTE: u64 = 1;

/// Base cost of plain transfers, baker updates and data registration
pub const SIMPLE_TRANSFER_COST: u64 = 300;

/// Base cost of adding a baker or changing its keys
pub const BAKER_KEYS_COST: u64 = 4050;

/// Base cost of moving public balance to the shielded balance
pub const TRANSFER_TO_ENCRYPTED_COST: u64 = 600;

/// Base cost of moving shielded balance to the public balance
pub const TRANSFER_TO_PUBLIC_COST: u64 = 14850;

/// Base cost of a shielded transfer
pub const ENCRYPTED_TRANSFER_COST: u64 = 27000;

/// Base cost per release of a scheduled transfer
pub const SCHEDULE_POINT_COST: u64 = 364;

/// Base cost per existing credential when updating credentials
pub const CREDENTIAL_COST: u64 = 500;

/// Base cost per key on a new or updated credential
pub const CREDENTIAL_KEY_COST: u64 = 100;

/// Base cost of deploying one credential
pub const CREDENTIAL_DEPLOYMENT_COST: u64 = 54000;

/// Divisor applied to the module size when deploying a module
pub const MODULE_SIZE_DIVISOR: u64 = 10;

/// Payloads with a base energy cost
pub trait EnergyCost {
    /// Energy charged for executing the payload, before the per-signature
    /// and per-byte charges
    fn base_energy_cost(&self) -> Result<Energy, TransactionError>;
}

fn overflow(value: u128) -> TransactionError {
    CodecError::Range {
        what: "energy",
        value: value as i128,
        width: 8,
    }
    .into()
}

fn to_energy(value: u128) -> Result<Energy, TransactionError> {
    u64::try_from(value)
        .map(Energy::new)
        .map_err(|_| overflow(value))
}

impl EnergyCost for Payload {
    fn base_energy_cost(&self) -> Result<Energy, TransactionError> {
        let base: u128 = match self {
            Payload::Transfer { .. }
            | Payload::TransferWithMemo { .. }
            | Payload::RemoveBaker
            | Payload::UpdateBakerStake { .. }
            | Payload::UpdateBakerRestakeEarnings { .. }
            | Payload::RegisterData { .. } => SIMPLE_TRANSFER_COST.into(),
            Payload::AddBaker { .. } | Payload::UpdateBakerKeys { .. } => BAKER_KEYS_COST.into(),
            Payload::TransferToEncrypted { .. } => TRANSFER_TO_ENCRYPTED_COST.into(),
            Payload::TransferToPublic { .. } => TRANSFER_TO_PUBLIC_COST.into(),
            Payload::EncryptedAmountTransfer { .. }
            | Payload::EncryptedAmountTransferWithMemo { .. } => ENCRYPTED_TRANSFER_COST.into(),
            Payload::TransferWithSchedule { schedule, .. }
            | Payload::TransferWithScheduleAndMemo { schedule, .. } => {
                u128::from(SCHEDULE_POINT_COST) * schedule.len() as u128
            }
            Payload::DeployModule { source, .. } => {
                source.len() as u128 / u128::from(MODULE_SIZE_DIVISOR)
            }
            Payload::InitContract { max_energy, .. } | Payload::Update { max_energy, .. } => {
                max_energy.get().into()
            }
            Payload::UpdateCredentialKeys {
                keys,
                current_credential_count,
                ..
            } => {
                u128::from(CREDENTIAL_COST) * u128::from(*current_credential_count)
                    + u128::from(CREDENTIAL_KEY_COST) * keys.keys.len() as u128
            }
            Payload::UpdateCredentials {
                new_credentials,
                current_credential_count,
                ..
            } => {
                let deployments: u128 = new_credentials
                    .iter()
                    .map(|new| {
                        u128::from(CREDENTIAL_DEPLOYMENT_COST)
                            + u128::from(CREDENTIAL_KEY_COST)
                                * u128::from(new.credential.values.key_count())
                    })
                    .sum();
                u128::from(CREDENTIAL_COST) * u128::from(*current_credential_count) + deployments
            }
        };
        to_energy(base)
    }
}

/// Total energy charged for a transaction.
///
/// `payload_size` is the length of the encoded payload, type byte included.
/// Fails with a range error if the total does not fit in a u64.
pub fn calculate_energy_cost(
    signature_count: u32,
    payload_size: u64,
    base: Energy,
) -> Result<Energy, TransactionError> {
    let total = u128::from(base.get())
        + u128::from(COST_PER_SIGNATURE) * u128::from(signature_count)
        + u128::from(COST_PER_BYTE) * (HEADER_SIZE as u128 + u128::from(payload_size));
    to_energy(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{Memo, SchedulePoint};
    use ccd_primitives::{AccountAddress, Amount, Timestamp};
    use proptest::prelude::*;

    fn to() -> AccountAddress {
        AccountAddress::from_bytes([7; 32])
    }

    #[test]
    fn test_simple_transfer_single_signature() {
        let payload = Payload::transfer(to(), Amount::from_micro_ccd(5_100_000));
        let size = payload.encode().unwrap().len() as u64;
        let base = payload.base_energy_cost().unwrap();
        assert_eq!(base, Energy::new(300));
        assert_eq!(calculate_energy_cost(1, size, base).unwrap(), Energy::new(501));
    }

    #[test]
    fn test_memo_transfer_costs_memo_bytes() {
        let plain = Payload::transfer(to(), Amount::from_micro_ccd(1));
        let memo = Payload::TransferWithMemo {
            to_address: to(),
            memo: Memo::new(vec![0; 10]).unwrap(),
            amount: Amount::from_micro_ccd(1),
        };
        let cost = |p: &Payload| {
            calculate_energy_cost(1, p.encode().unwrap().len() as u64, p.base_energy_cost().unwrap())
                .unwrap()
                .get()
        };
        assert_eq!(cost(&memo) - cost(&plain), 12);
    }

    #[test]
    fn test_schedule_base_cost() {
        let point = SchedulePoint {
            timestamp: Timestamp::from_millis(1),
            amount: Amount::from_micro_ccd(1),
        };
        let payload = Payload::TransferWithSchedule {
            to_address: to(),
            schedule: vec![point; 3],
        };
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(3 * 364));
    }

    #[test]
    fn test_fixed_base_costs() {
        assert_eq!(Payload::RemoveBaker.base_energy_cost().unwrap().get(), 300);
        assert_eq!(
            Payload::TransferToEncrypted { amount: Amount::ZERO }
                .base_energy_cost()
                .unwrap()
                .get(),
            600
        );
    }

    #[test]
    fn test_deploy_module_cost_scales_with_size() {
        let payload = Payload::DeployModule {
            version: crate::payload::WasmVersion::V1,
            source: bytes::Bytes::from(vec![0u8; 1234]),
        };
        assert_eq!(payload.base_energy_cost().unwrap(), Energy::new(123));
    }

    #[test]
    fn test_overflow_is_range_error() {
        let err = calculate_energy_cost(1, 0, Energy::new(u64::MAX)).unwrap_err();
        assert!(matches!(err, TransactionError::Range(_)));
    }

    proptest! {
        #[test]
        fn prop_monotonic_in_signatures(sigs in 0u32..1000, size in 0u64..100_000, base in 0u64..1_000_000) {
            let a = calculate_energy_cost(sigs, size, Energy::new(base)).unwrap();
            let b = calculate_energy_cost(sigs + 1, size, Energy::new(base)).unwrap();
            prop_assert_eq!(b.get() - a.get(), COST_PER_SIGNATURE);
        }

        #[test]
        fn prop_monotonic_in_payload_size(sigs in 0u32..1000, size in 0u64..100_000, base in 0u64..1_000_000) {
            let a = calculate_energy_cost(sigs, size, Energy::new(base)).unwrap();
            let b = calculate_energy_cost(sigs, size + 1, Energy::new(base)).unwrap();
            prop_assert!(b > a);
        }
    }
}
