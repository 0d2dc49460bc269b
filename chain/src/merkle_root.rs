use bitcrypto::{dhash256, SHA256D};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use ser::{Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::io;

#[inline]
fn concat(a: &SHA256D, b: &SHA256D) -> [u8; 64] {
	let mut result = [0; 64];
	result[0..32].copy_from_slice(&a[..]);
	result[32..64].copy_from_slice(&b[..]);
	result
}

/// Calculates the root of the merkle tree
/// https://en.bitcoin.it/wiki/Protocol_documentation#Merkle_Trees
pub fn merkle_root(hashes: &[SHA256D]) -> SHA256D {
	if hashes.len() == 1 {
		return hashes[0];
	}
	if hashes.is_empty() {
		return SHA256D::default();
	}
	let row = pair_row(hashes);
	let res: Vec<_>;
	// Only compute in parallel if there is enough work to benefit it
	if row.len() > 250 {
		res = row.par_iter().map(|x| merkle_node_hash(&x.0, &x.1)).collect();
	} else {
		res = row.iter().map(|x| merkle_node_hash(&x.0, &x.1)).collect();
	}
	merkle_root(&res)
}

/// Calculate merkle tree node hash
pub fn merkle_node_hash(left: &SHA256D, right: &SHA256D) -> SHA256D {
	dhash256(&concat(left, right))
}

// pairs up a tree row, duplicating the last element if len is not even
fn pair_row(hashes: &[SHA256D]) -> Vec<(SHA256D, SHA256D)> {
	hashes
		.chunks(2)
		.map(|pair| match *pair {
			[left, right] => (left, right),
			[last] => (last, last),
			_ => unreachable!("chunks(2) yields one or two elements"),
		})
		.collect()
}

/// Sibling hashes connecting the leaf at `index` to the root of the tree built over `hashes`.
///
/// Returns an empty branch if `index` is out of range.
pub fn merkle_branch(hashes: &[SHA256D], index: usize) -> Vec<SHA256D> {
	if index >= hashes.len() {
		return Vec::new();
	}

	let mut branch = Vec::new();
	let mut index = index;
	let mut row = hashes.to_vec();
	while row.len() > 1 {
		let pairs = pair_row(&row);
		let (left, right) = pairs[index / 2];
		branch.push(if index & 1 == 1 { left } else { right });
		row = pairs.iter().map(|x| merkle_node_hash(&x.0, &x.1)).collect();
		index >>= 1;
	}
	branch
}

/// Recomputes the merkle root from a leaf, its sibling hashes and its position.
///
/// Bit `n` of `index` says whether the leaf side is the right child at level `n`.
/// An index of `-1` means the position is unknown and yields the zero hash.
pub fn merkle_branch_root(leaf: &SHA256D, branch: &[SHA256D], index: i32) -> SHA256D {
	if index == -1 {
		return SHA256D::default();
	}

	let mut index = index;
	let mut hash = *leaf;
	for sibling in branch {
		hash = if index & 1 == 1 {
			merkle_node_hash(sibling, &hash)
		} else {
			merkle_node_hash(&hash, sibling)
		};
		index >>= 1;
	}
	hash
}

/// Merkle path of a single leaf as carried on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MerkleBranch {
	pub hashes: Vec<SHA256D>,
	pub index: i32,
}

impl MerkleBranch {
	pub fn new(hashes: Vec<SHA256D>, index: i32) -> Self {
		MerkleBranch { hashes, index }
	}

	/// Height of the tree this branch climbs.
	pub fn len(&self) -> usize {
		self.hashes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.hashes.is_empty()
	}

	pub fn root(&self, leaf: &SHA256D) -> SHA256D {
		merkle_branch_root(leaf, &self.hashes, self.index)
	}
}

impl Serializable for MerkleBranch {
	fn serialize(&self, stream: &mut Stream) {
		stream.append_list::<SHA256D, SHA256D>(&self.hashes).append(&self.index);
	}

	fn serialized_size(&self) -> usize {
		ser::serialized_list_size::<SHA256D, SHA256D>(&self.hashes) + 4
	}
}

impl Deserializable for MerkleBranch {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(MerkleBranch {
			hashes: reader.read_list()?,
			index: reader.read()?,
		})
	}
}
