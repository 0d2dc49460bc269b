/// Marker placed right before the chain merkle root in a parent coinbase script.
pub const MERGED_MINING_HEADER: [u8; 4] = [0xfa, 0xbe, b'm', b'm'];

/// Longest accepted chain merkle branch; the virtual chain tree has at most 2^30 leaves.
pub const MAX_CHAIN_MERKLE_BRANCH_LENGTH: usize = 30;

/// Without a merged mining header the chain merkle root must start within this many bytes of the script.
pub const MAX_LEGACY_ROOT_OFFSET: usize = 20;

/// Tree size and nonce following the chain merkle root, 4 bytes each.
pub const MERKLE_SIZE_AND_NONCE_LEN: usize = 8;

/// Setting nSequence to this value for every input in a transaction disables nLockTime.
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;
