//! Lossless re-packing of 128- and 256-bit integers.
//!
//! Soroban carries wide integers as component parts. They stay as parts in
//! the domain model: a 128-bit value is a hi/lo pair, a 256-bit value is four
//! 64-bit limbs ordered `hi_hi, hi_lo, lo_hi, lo_lo`. Nothing here narrows a
//! value; the `to_*`/`from_*` helpers exist for callers that want native
//! integers for arithmetic and are exact inverses of each other.

use serde::{Deserialize, Serialize};
use std::fmt;
use stellar_xdr::curr::{Int128Parts, Int256Parts, UInt128Parts, UInt256Parts};

/// Signed 128-bit integer as two halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Int128 {
    pub hi: i64,
    pub lo: u64,
}

impl Int128 {
    pub fn from_i128(value: i128) -> Self {
        Self {
            hi: (value >> 64) as i64,
            lo: value as u64,
        }
    }

    pub fn to_i128(self) -> i128 {
        ((self.hi as i128) << 64) | (self.lo as i128)
    }
}

impl From<&Int128Parts> for Int128 {
    fn from(parts: &Int128Parts) -> Self {
        Self {
            hi: parts.hi,
            lo: parts.lo,
        }
    }
}

impl From<Int128> for Int128Parts {
    fn from(value: Int128) -> Self {
        Int128Parts {
            hi: value.hi,
            lo: value.lo,
        }
    }
}

impl fmt::Display for Int128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i128())
    }
}

/// Unsigned 128-bit integer as two halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UInt128 {
    pub hi: u64,
    pub lo: u64,
}

impl UInt128 {
    pub fn from_u128(value: u128) -> Self {
        Self {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }

    pub fn to_u128(self) -> u128 {
        ((self.hi as u128) << 64) | (self.lo as u128)
    }
}

impl From<&UInt128Parts> for UInt128 {
    fn from(parts: &UInt128Parts) -> Self {
        Self {
            hi: parts.hi,
            lo: parts.lo,
        }
    }
}

impl fmt::Display for UInt128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u128())
    }
}

/// Signed 256-bit integer as four 64-bit limbs, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Int256 {
    pub hi_hi: i64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl From<&Int256Parts> for Int256 {
    fn from(parts: &Int256Parts) -> Self {
        Self {
            hi_hi: parts.hi_hi,
            hi_lo: parts.hi_lo,
            lo_hi: parts.lo_hi,
            lo_lo: parts.lo_lo,
        }
    }
}

/// Unsigned 256-bit integer as four 64-bit limbs, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UInt256 {
    pub hi_hi: u64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl From<&UInt256Parts> for UInt256 {
    fn from(parts: &UInt256Parts) -> Self {
        Self {
            hi_hi: parts.hi_hi,
            hi_lo: parts.hi_lo,
            lo_hi: parts.lo_hi,
            lo_lo: parts.lo_lo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int128_negative_one_hi() {
        let parts = Int128Parts { hi: -1, lo: 0 };
        let value = Int128::from(&parts);
        assert_eq!(value.hi, -1);
        assert_eq!(value.lo, 0);
        assert_eq!(value.to_i128(), -(1i128 << 64));
        assert_eq!(Int128Parts::from(value), parts);
    }

    #[test]
    fn test_int128_native_round_trip() {
        for v in [0i128, 1, -1, 100, i128::MAX, i128::MIN, i64::MIN as i128 - 7] {
            assert_eq!(Int128::from_i128(v).to_i128(), v);
        }
        assert_eq!(Int128::from_i128(100), Int128 { hi: 0, lo: 100 });
        assert_eq!(Int128::from_i128(-1), Int128 { hi: -1, lo: u64::MAX });
    }

    #[test]
    fn test_uint128_round_trip() {
        let v = u128::MAX - 12345;
        assert_eq!(UInt128::from_u128(v).to_u128(), v);
        assert_eq!(UInt128::from_u128(v).to_string(), v.to_string());
    }

    #[test]
    fn test_int256_limbs_keep_order() {
        let parts = Int256Parts {
            hi_hi: -2,
            hi_lo: 3,
            lo_hi: 4,
            lo_lo: 5,
        };
        let value = Int256::from(&parts);
        assert_eq!((value.hi_hi, value.hi_lo, value.lo_hi, value.lo_lo), (-2, 3, 4, 5));
    }

    #[test]
    fn test_uint256_limbs_keep_order() {
        let parts = UInt256Parts {
            hi_hi: u64::MAX,
            hi_lo: 1,
            lo_hi: 0,
            lo_lo: 9,
        };
        let value = UInt256::from(&parts);
        assert_eq!(
            (value.hi_hi, value.hi_lo, value.lo_hi, value.lo_lo),
            (u64::MAX, 1, 0, 9)
        );
    }

    #[test]
    fn test_int128_json_shape() {
        let json = serde_json::to_string(&Int128 { hi: -1, lo: 0 }).unwrap();
        assert_eq!(json, r#"{"hi":-1,"lo":0}"#);
    }
}
