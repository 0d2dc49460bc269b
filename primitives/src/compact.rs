//! Compact representation of `U256`

use crate::U256;

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Compact(u32);

impl From<u32> for Compact {
	fn from(u: u32) -> Self {
		Compact(u)
	}
}

impl From<Compact> for u32 {
	fn from(c: Compact) -> Self {
		c.0
	}
}

impl From<U256> for Compact {
	fn from(u: U256) -> Self {
		Compact::from_u256(u)
	}
}

impl Compact {
	pub fn new(u: u32) -> Self {
		Compact(u)
	}

	pub fn max_value() -> Self {
		U256::max_value().into()
	}

	/// Computes the target [0, T] that a blockhash must land in to be valid.
	/// Returns `None` if the encoding is negative or overflows 256 bits.
	pub fn to_u256(&self) -> Option<U256> {
		let size = self.0 >> 24;
		let mut word = self.0 & 0x007f_ffff;

		let is_negative = word != 0 && (self.0 & 0x0080_0000) != 0;
		let is_overflow = (word != 0 && size > 34) || (word > 0xff && size > 33) || (word > 0xffff && size > 32);
		if is_negative || is_overflow {
			return None;
		}

		let result = if size <= 3 {
			word >>= 8 * (3 - size as usize);
			U256::from(word)
		} else if word == 0 {
			U256::zero()
		} else {
			U256::from(word) << (8 * (size as usize - 3))
		};

		Some(result)
	}

	pub fn from_u256(val: U256) -> Self {
		let mut size = (val.bits() + 7) / 8;
		let mut compact = if size <= 3 {
			(val.low_u64() << (8 * (3 - size))) as u32
		} else {
			let bn = val >> (8 * (size - 3));
			bn.low_u32()
		};

		if (compact & 0x0080_0000) != 0 {
			compact >>= 8;
			size += 1;
		}

		debug_assert!((compact & !0x007f_ffff) == 0);
		debug_assert!(size < 256);
		Compact(compact | (size << 24) as u32)
	}
}
