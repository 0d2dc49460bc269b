use crate::error::{AuxPowError, ErrorClass};
use bitcrypto::{reversed, SHA256D};
use chain::constants::{
	MAX_CHAIN_MERKLE_BRANCH_LENGTH, MAX_LEGACY_ROOT_OFFSET, MERGED_MINING_HEADER, MERKLE_SIZE_AND_NONCE_LEN,
};
use chain::{expected_index, AuxPow};
use network::ConsensusParams;
use ser::Reader;

/// Checks that an auxpow commits to an aux block, without looking at the parent proof of work.
pub struct AuxPowVerifier<'a> {
	auxpow: &'a AuxPow,
	aux_hash: &'a SHA256D,
	chain_id: i32,
	consensus: &'a ConsensusParams,
}

impl<'a> AuxPowVerifier<'a> {
	/// `chain_id` is the chain id of the aux block itself.
	pub fn new(auxpow: &'a AuxPow, aux_hash: &'a SHA256D, chain_id: i32, consensus: &'a ConsensusParams) -> Self {
		trace!(target: "verification", "AuxPow verification {}", aux_hash);
		AuxPowVerifier {
			auxpow,
			aux_hash,
			chain_id,
			consensus,
		}
	}

	pub fn check(&self) -> Result<(), AuxPowError> {
		self.check_commitment().map_err(|err| {
			match err.class() {
				ErrorClass::Structural => debug!(target: "verification", "AuxPow for {} rejected: {}", self.aux_hash, err),
				ErrorClass::Misbehaving => warn!(target: "verification", "AuxPow for {} rejected: {}", self.aux_hash, err),
			}
			err
		})
	}

	fn check_commitment(&self) -> Result<(), AuxPowError> {
		let auxpow = self.auxpow;

		if auxpow.coinbase_branch.index != 0 {
			return Err(AuxPowError::NotAGenerate);
		}

		if self.consensus.strict_chain_id && auxpow.parent_header.version.chain_id() == self.chain_id {
			return Err(AuxPowError::ParentHasOurChainId);
		}

		let chain_height = auxpow.chain_branch.len();
		if chain_height > MAX_CHAIN_MERKLE_BRANCH_LENGTH {
			return Err(AuxPowError::ChainBranchTooLong);
		}

		// scripts carry the root byte reversed
		let root = reversed(&auxpow.chain_branch.root(self.aux_hash));

		if auxpow.coinbase_branch.root(&auxpow.coinbase.hash()) != auxpow.parent_header.merkle_root_hash {
			return Err(AuxPowError::MerkleRootMismatch);
		}

		let script = auxpow.coinbase_script().ok_or(AuxPowError::MissingCoinbaseInput)?;
		let root_pos = script.find(&root).ok_or(AuxPowError::MissingChainMerkleRoot)?;

		match script.find(&MERGED_MINING_HEADER) {
			Some(header_pos) => {
				if script.find_from(header_pos + 1, &MERGED_MINING_HEADER).is_some() {
					return Err(AuxPowError::MultipleMergedMiningHeaders);
				}
				if header_pos + MERGED_MINING_HEADER.len() != root_pos {
					return Err(AuxPowError::MergedMiningHeaderNotAdjacent);
				}
			}
			None => {
				if root_pos > MAX_LEGACY_ROOT_OFFSET {
					return Err(AuxPowError::ChainMerkleRootTooDeep);
				}
			}
		}

		let tail = &script[root_pos + root.len()..];
		if tail.len() < MERKLE_SIZE_AND_NONCE_LEN {
			return Err(AuxPowError::MissingSizeAndNonce);
		}

		let mut reader = Reader::new(&tail[..MERKLE_SIZE_AND_NONCE_LEN]);
		let size: u32 = reader.read().map_err(|_| AuxPowError::MissingSizeAndNonce)?;
		if size != 1u32 << chain_height {
			return Err(AuxPowError::SizeMismatch);
		}

		let nonce: u32 = reader.read().map_err(|_| AuxPowError::MissingSizeAndNonce)?;
		let expected = expected_index(nonce, self.chain_id, chain_height as u32);
		if auxpow.chain_branch.index != expected as i32 {
			return Err(AuxPowError::WrongIndex);
		}

		Ok(())
	}
}
