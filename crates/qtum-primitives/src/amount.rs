//! Fixed-point coin amounts.
//!
//! All monetary values are held as signed satoshi counts (1 coin =
//! 10^8 satoshis). Funding arithmetic works at 7-decimal-place
//! precision: [`Amount::trunc7`] discards the 8th decimal digit,
//! truncating toward zero, which is the precision every needed-balance
//! and fee figure is quoted at.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::PrimitivesError;

/// Satoshis per coin.
pub const COIN: i64 = 100_000_000;

/// A coin amount in satoshis.
///
/// Wraps an `i64` satoshi count. Negative amounts are representable so
/// that change computation can detect shortfalls before erroring.
/// Serializes transparently as the raw satoshi count.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Construct an amount from a raw satoshi count.
    pub const fn from_sats(sats: i64) -> Self {
        Amount(sats)
    }

    /// Construct an amount from a whole number of coins.
    pub const fn from_coins(coins: i64) -> Self {
        Amount(coins * COIN)
    }

    /// Return the raw satoshi count.
    pub const fn sats(&self) -> i64 {
        self.0
    }

    /// Truncate to 7 decimal places of coin precision.
    ///
    /// Zeroes the final satoshi digit, rounding toward zero for both
    /// positive and negative amounts.
    pub const fn trunc7(&self) -> Self {
        Amount((self.0 / 10) * 10)
    }

    /// Checked addition.
    pub fn checked_add(self, rhs: Amount) -> Result<Amount, PrimitivesError> {
        self.0
            .checked_add(rhs.0)
            .map(Amount)
            .ok_or(PrimitivesError::AmountOverflow("add"))
    }

    /// Checked subtraction.
    pub fn checked_sub(self, rhs: Amount) -> Result<Amount, PrimitivesError> {
        self.0
            .checked_sub(rhs.0)
            .map(Amount)
            .ok_or(PrimitivesError::AmountOverflow("sub"))
    }

    /// Checked multiplication by an integer scalar.
    pub fn checked_mul(self, rhs: i64) -> Result<Amount, PrimitivesError> {
        self.0
            .checked_mul(rhs)
            .map(Amount)
            .ok_or(PrimitivesError::AmountOverflow("mul"))
    }

    /// True if the amount is negative.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a decimal coin string (e.g. `"4.8998448"`) into an amount.
    ///
    /// Accepts an optional leading minus sign, an integer part, and up
    /// to eight fractional digits. Digits past the 7th fractional place
    /// are dropped without rounding, matching [`Amount::trunc7`].
    ///
    /// # Returns
    /// The parsed amount, or `InvalidAmount` for empty input, stray
    /// characters, or integer overflow.
    pub fn parse_coins(s: &str) -> Result<Amount, PrimitivesError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PrimitivesError::InvalidAmount("empty string".into()));
        }
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(PrimitivesError::InvalidAmount(format!("not a number: {s}")));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(PrimitivesError::InvalidAmount(format!(
                "invalid character in amount: {s}"
            )));
        }

        let coins: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| PrimitivesError::AmountOverflow("parse"))?
        };

        // Keep at most 7 fractional digits, then scale to satoshis.
        let frac7 = &frac_part[..frac_part.len().min(7)];
        let mut frac_sats: i64 = 0;
        if !frac7.is_empty() {
            let digits: i64 = frac7
                .parse()
                .map_err(|_| PrimitivesError::AmountOverflow("parse"))?;
            frac_sats = digits * 10i64.pow(8 - frac7.len() as u32);
        }

        let sats = coins
            .checked_mul(COIN)
            .and_then(|c| c.checked_add(frac_sats))
            .ok_or(PrimitivesError::AmountOverflow("parse"))?;
        Ok(Amount(if negative { -sats } else { sats }))
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;
    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl fmt::Display for Amount {
    /// Format as a decimal coin string with exactly 7 fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sats = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        let coins = sats / COIN as u64;
        // Display precision is 7 places; the 8th satoshi digit is
        // always zero for trunc7'd values and dropped otherwise.
        let frac = (sats % COIN as u64) / 10;
        write!(f, "{sign}{coins}.{frac:07}")
    }
}
