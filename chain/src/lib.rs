extern crate primitives;
extern crate rayon;
extern crate serialization as ser;

pub mod constants;

mod auxpow;
mod block_header;
mod block_version;
mod header_provider;
mod indexed_header;
mod merkle_root;
mod transaction;

pub use primitives::{bytes, compact};

pub use auxpow::{expected_index, AuxPow};
pub use block_header::BlockHeader;
pub use block_version::{BlockVersion, VERSION_AUXPOW, VERSION_CHAIN_START};
pub use header_provider::BlockHeaderProvider;
pub use indexed_header::IndexedBlockHeader;
pub use merkle_root::{merkle_branch, merkle_branch_root, merkle_node_hash, merkle_root, MerkleBranch};
pub use transaction::{OutPoint, Transaction, TransactionInput, TransactionOutput};
