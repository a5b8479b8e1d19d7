//! Numeric newtypes used in transactions

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Amount of CCD in its smallest unit (microCCD, 10^-6 CCD)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Amount(u64);

impl Amount {
    /// microCCD per CCD
    pub const MICRO_CCD_PER_CCD: u64 = 1_000_000;

    /// Zero amount
    pub const ZERO: Amount = Amount(0);

    /// Create from microCCD
    pub const fn from_micro_ccd(micro_ccd: u64) -> Self {
        Amount(micro_ccd)
    }

    /// Create from whole CCD, `None` on overflow
    pub fn from_ccd(ccd: u64) -> Option<Self> {
        ccd.checked_mul(Self::MICRO_CCD_PER_CCD).map(Amount)
    }

    /// Value in microCCD
    pub const fn micro_ccd(&self) -> u64 {
        self.0
    }

    /// Checked addition
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::MICRO_CCD_PER_CCD;
        let frac = self.0 % Self::MICRO_CCD_PER_CCD;
        write!(f, "{}.{:06} CCD", whole, frac)
    }
}

/// Energy, the unit transaction execution is charged in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Energy(u64);

impl Energy {
    /// Create from raw value
    pub const fn new(energy: u64) -> Self {
        Energy(energy)
    }

    /// Raw value
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Checked addition
    pub fn checked_add(self, other: Energy) -> Option<Energy> {
        self.0.checked_add(other.0).map(Energy)
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} NRG", self.0)
    }
}

/// Account sequence number (nonce)
///
/// Sequence numbers start at 1; every accepted account transaction
/// increments the sender's next sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Nonce(u64);

impl Nonce {
    /// Create from raw value
    pub const fn new(nonce: u64) -> Self {
        Nonce(nonce)
    }

    /// Raw value
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The following sequence number
    pub fn next(&self) -> Nonce {
        Nonce(self.0.saturating_add(1))
    }
}

impl Default for Nonce {
    fn default() -> Self {
        Nonce(1)
    }
}

/// Expiry of a transaction in seconds since the Unix epoch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TransactionExpiry(u64);

impl TransactionExpiry {
    /// Create from Unix seconds
    pub const fn from_seconds(seconds: u64) -> Self {
        TransactionExpiry(seconds)
    }

    /// Expiry `ttl` from the current system time
    pub fn from_now(ttl: Duration) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        TransactionExpiry(now.saturating_add(ttl).as_secs())
    }

    /// Unix seconds
    pub const fn seconds(&self) -> u64 {
        self.0
    }
}

/// Millisecond Unix timestamp, used by release schedules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create from Unix milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    /// Unix milliseconds
    pub const fn millis(&self) -> u64 {
        self.0
    }
}

/// Index of an account in the order of creation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AccountIndex(pub u64);

/// Address of a smart contract instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractAddress {
    /// Instance index
    pub index: u64,
    /// Instance subindex
    pub subindex: u64,
}

impl ContractAddress {
    /// Create a contract address
    pub const fn new(index: u64, subindex: u64) -> Self {
        Self { index, subindex }
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.index, self.subindex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_from_ccd() {
        assert_eq!(Amount::from_ccd(5).unwrap().micro_ccd(), 5_000_000);
        assert!(Amount::from_ccd(u64::MAX).is_none());
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::from_micro_ccd(5_100_000).to_string(), "5.100000 CCD");
        assert_eq!(Amount::from_micro_ccd(1).to_string(), "0.000001 CCD");
    }

    #[test]
    fn test_energy_checked_add() {
        assert_eq!(
            Energy::new(300).checked_add(Energy::new(201)),
            Some(Energy::new(501))
        );
        assert_eq!(Energy::new(u64::MAX).checked_add(Energy::new(1)), None);
    }

    #[test]
    fn test_nonce_next() {
        assert_eq!(Nonce::default().get(), 1);
        assert_eq!(Nonce::new(7).next(), Nonce::new(8));
        assert_eq!(Nonce::new(u64::MAX).next(), Nonce::new(u64::MAX));
    }

    #[test]
    fn test_expiry_from_now_is_in_future() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let expiry = TransactionExpiry::from_now(Duration::from_secs(600));
        assert!(expiry.seconds() >= now + 600);
    }

    #[test]
    fn test_contract_address_display() {
        assert_eq!(ContractAddress::new(12, 0).to_string(), "<12,0>");
    }
}
