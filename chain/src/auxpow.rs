//! Auxiliary proof of work: a parent chain block committing to a block of this chain.

use crate::block_header::BlockHeader;
use crate::merkle_root::MerkleBranch;
use crate::transaction::{Transaction, TransactionInput};
use bitcrypto::{reversed, SHA256D};
use primitives::bytes::Bytes;
use ser::{Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::{fmt, io};

/// Size in bytes of the data pushed by the template coinbase script.
const TEMPLATE_PUSH_LEN: u8 = 40;

#[derive(PartialEq, Clone, Default)]
pub struct AuxPow {
	/// Coinbase transaction of the parent block.
	pub coinbase: Transaction,
	/// Hash of the parent block as carried on the wire. Not used for validation.
	pub parent_hash: SHA256D,
	/// Links the coinbase to the parent block merkle root.
	pub coinbase_branch: MerkleBranch,
	/// Links the aux block hash to the chain merkle root committed in the coinbase.
	pub chain_branch: MerkleBranch,
	pub parent_header: BlockHeader,
}

impl AuxPow {
	/// Unsolved auxpow for the block with the given hash.
	///
	/// The coinbase commits to `aux_hash` with a single chain tree of size one and nonce zero.
	/// The parent header is not mined.
	pub fn template(aux_hash: &SHA256D) -> Self {
		let mut script = Vec::with_capacity(TEMPLATE_PUSH_LEN as usize + 1);
		script.push(TEMPLATE_PUSH_LEN);
		script.extend_from_slice(&reversed(aux_hash));
		// merkle size 1, nonce 0
		script.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);

		let coinbase = Transaction {
			version: 1,
			inputs: vec![TransactionInput::coinbase(script.into())],
			outputs: Vec::new(),
			lock_time: 0,
		};

		let parent_header = BlockHeader {
			version: 1.into(),
			merkle_root_hash: coinbase.hash(),
			..Default::default()
		};

		AuxPow {
			coinbase,
			parent_hash: SHA256D::default(),
			coinbase_branch: MerkleBranch::new(Vec::new(), 0),
			chain_branch: MerkleBranch::new(Vec::new(), 0),
			parent_header,
		}
	}

	/// Script of the first coinbase input, the only place the chain merkle root is searched for.
	pub fn coinbase_script(&self) -> Option<&Bytes> {
		self.coinbase.inputs.first().map(|input| &input.script_sig)
	}
}

impl fmt::Debug for AuxPow {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("AuxPow")
			.field("coinbase", &self.coinbase)
			.field("parent_hash", &self.parent_hash)
			.field("coinbase_branch", &self.coinbase_branch)
			.field("chain_branch", &self.chain_branch)
			.field("parent_header", &self.parent_header)
			.finish()
	}
}

impl Serializable for AuxPow {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.coinbase)
			.append(&self.parent_hash)
			.append(&self.coinbase_branch)
			.append(&self.chain_branch)
			.append(&self.parent_header);
	}
}

impl Deserializable for AuxPow {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(AuxPow {
			coinbase: reader.read()?,
			parent_hash: reader.read()?,
			coinbase_branch: reader.read()?,
			chain_branch: reader.read()?,
			parent_header: reader.read()?,
		})
	}
}

/// Slot of the chain tree an aux chain with `chain_id` must occupy, for a tree of height `height`.
///
/// Pseudo random in `nonce` so that a miner cannot place two blocks of the same chain
/// in one tree. The arithmetic is wrapping 32 bit and must stay bit exact.
pub fn expected_index(nonce: u32, chain_id: i32, height: u32) -> u32 {
	let mut rand = nonce;
	rand = rand.wrapping_mul(1_103_515_245).wrapping_add(12345);
	rand = rand.wrapping_add(chain_id as u32);
	rand = rand.wrapping_mul(1_103_515_245).wrapping_add(12345);

	1u64.checked_shl(height).map_or(rand, |modulus| (u64::from(rand) % modulus) as u32)
}
