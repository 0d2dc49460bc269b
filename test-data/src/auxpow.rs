use crate::CHAIN_ID;
use bitcrypto::{dhash256, reversed, SHA256D};
use chain::constants::MERGED_MINING_HEADER;
use chain::{
	expected_index, merkle_branch, merkle_branch_root, merkle_root, AuxPow, BlockHeader, BlockVersion, MerkleBranch,
	Transaction, TransactionInput, TransactionOutput,
};
use primitives::bytes::Bytes;
use primitives::compact::Compact;

/// Builds an auxpow committing to `aux_hash`, valid apart from the parent proof of work
/// unless one of the knobs below is turned.
#[derive(Debug, Clone)]
pub struct AuxPowBuilder {
	aux_hash: SHA256D,
	chain_id: i32,
	parent_chain_id: i32,
	chain_height: u32,
	chain_index: Option<i32>,
	merkle_nonce: u32,
	merkle_size: Option<u32>,
	merged_mining_header: bool,
	size_and_nonce: bool,
	prefix: Bytes,
	gap: Bytes,
	suffix: Bytes,
	coinbase_index: i32,
	parent_transactions: usize,
	parent_merkle_root: Option<SHA256D>,
}

impl Default for AuxPowBuilder {
	fn default() -> Self {
		AuxPowBuilder {
			aux_hash: dhash256(b"aux block"),
			chain_id: CHAIN_ID,
			parent_chain_id: 0,
			chain_height: 0,
			chain_index: None,
			merkle_nonce: 0,
			merkle_size: None,
			merged_mining_header: true,
			size_and_nonce: true,
			// block height push, as found in real coinbases
			prefix: vec![0x03, 0x40, 0x0d, 0x03].into(),
			gap: Bytes::default(),
			suffix: Bytes::default(),
			coinbase_index: 0,
			parent_transactions: 0,
			parent_merkle_root: None,
		}
	}
}

impl AuxPowBuilder {
	pub fn aux_hash(mut self, aux_hash: SHA256D) -> Self {
		self.aux_hash = aux_hash;
		self
	}

	/// Chain id of the aux chain, used for the slot in the chain tree.
	pub fn chain_id(mut self, chain_id: i32) -> Self {
		self.chain_id = chain_id;
		self
	}

	pub fn parent_chain_id(mut self, chain_id: i32) -> Self {
		self.parent_chain_id = chain_id;
		self
	}

	/// Height of the chain tree, i.e. the length of the chain branch.
	pub fn chain_height(mut self, height: u32) -> Self {
		self.chain_height = height;
		self
	}

	/// Puts the aux block in this slot instead of the expected one.
	pub fn chain_index(mut self, index: i32) -> Self {
		self.chain_index = Some(index);
		self
	}

	pub fn merkle_nonce(mut self, nonce: u32) -> Self {
		self.merkle_nonce = nonce;
		self
	}

	/// Tree size written to the coinbase instead of `1 << chain_height`.
	pub fn merkle_size(mut self, size: u32) -> Self {
		self.merkle_size = Some(size);
		self
	}

	pub fn merged_mining_header(mut self, present: bool) -> Self {
		self.merged_mining_header = present;
		self
	}

	pub fn size_and_nonce(mut self, present: bool) -> Self {
		self.size_and_nonce = present;
		self
	}

	/// Script bytes in front of the merged mining header.
	pub fn prefix(mut self, prefix: Bytes) -> Self {
		self.prefix = prefix;
		self
	}

	/// Script bytes between the merged mining header and the chain merkle root.
	pub fn gap(mut self, gap: Bytes) -> Self {
		self.gap = gap;
		self
	}

	/// Script bytes after the size and nonce.
	pub fn suffix(mut self, suffix: Bytes) -> Self {
		self.suffix = suffix;
		self
	}

	pub fn coinbase_index(mut self, index: i32) -> Self {
		self.coinbase_index = index;
		self
	}

	/// Number of transactions following the coinbase in the parent block.
	pub fn parent_transactions(mut self, count: usize) -> Self {
		self.parent_transactions = count;
		self
	}

	/// Overrides the merkle root written to the parent header.
	pub fn parent_merkle_root(mut self, root: SHA256D) -> Self {
		self.parent_merkle_root = Some(root);
		self
	}

	/// Slot the aux block is placed in.
	pub fn slot(&self) -> i32 {
		self.chain_index
			.unwrap_or_else(|| expected_index(self.merkle_nonce, self.chain_id, self.chain_height) as i32)
	}

	/// Coinbase script committing to `chain_root`.
	pub fn script(&self, chain_root: &SHA256D) -> Bytes {
		let mut script = self.prefix.to_vec();
		if self.merged_mining_header {
			script.extend_from_slice(&MERGED_MINING_HEADER);
		}
		script.extend_from_slice(&self.gap);
		script.extend_from_slice(&reversed(chain_root));
		if self.size_and_nonce {
			let size = self.merkle_size.unwrap_or_else(|| 1u32.checked_shl(self.chain_height).unwrap_or(0));
			script.extend_from_slice(&size.to_le_bytes());
			script.extend_from_slice(&self.merkle_nonce.to_le_bytes());
		}
		script.extend_from_slice(&self.suffix);
		script.into()
	}

	pub fn build(self) -> AuxPow {
		let chain_index = self.slot();
		let chain_hashes: Vec<SHA256D> = (0..self.chain_height).map(|level| dhash256(&level.to_le_bytes())).collect();
		let chain_root = merkle_branch_root(&self.aux_hash, &chain_hashes, chain_index);

		let coinbase = Transaction {
			version: 1,
			inputs: vec![TransactionInput::coinbase(self.script(&chain_root))],
			outputs: vec![TransactionOutput {
				value: 10_000 * 100_000_000,
				script_pubkey: Bytes::new(),
			}],
			lock_time: 0,
		};

		let mut parent_hashes = vec![coinbase.hash()];
		parent_hashes.extend((0..self.parent_transactions).map(|i| dhash256(&(i as u64).to_le_bytes())));
		let coinbase_branch = merkle_branch(&parent_hashes, 0);

		let parent_header = BlockHeader {
			version: BlockVersion::new(2, self.parent_chain_id).unwrap_or_default(),
			previous_header_hash: dhash256(b"parent block parent"),
			merkle_root_hash: self.parent_merkle_root.unwrap_or_else(|| merkle_root(&parent_hashes)),
			time: 1_600_000_000,
			bits: Compact::new(0x1a01_aa3d),
			nonce: 0,
		};

		AuxPow {
			parent_hash: parent_header.hash(),
			coinbase,
			coinbase_branch: MerkleBranch::new(coinbase_branch, self.coinbase_index),
			chain_branch: MerkleBranch::new(chain_hashes, chain_index),
			parent_header,
		}
	}
}
