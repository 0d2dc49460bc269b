//! Merge mining header verification.
//!
//! --> A. `AuxPowVerifier`
//! ----> A.1 the auxpow is the coinbase of its parent block
//! ----> A.2 parent and aux chain ids differ
//! ----> A.3 the chain merkle root is committed in the parent coinbase, once
//! ----> A.4 the aux block sits in the slot picked by the coinbase nonce
//!
//! --> B. `HeaderAcceptor`, contextual checks of a header at a known height
//! ----> B.1 legacy versions and auxpow against the rules in force
//! ----> B.2 chain id
//! ----> B.3 target range
//! ----> B.4 auxpow presence, then A.
//! ----> B.5 with known ancestors, bits against the required difficulty
//!
//! Parent chain proof of work is not checked here.

#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate assert_matches;

extern crate bitcrypto;
extern crate chain;
extern crate network;
extern crate primitives;
extern crate serialization as ser;

mod accept_header;
mod error;
mod verify_auxpow;
mod work;

pub use accept_header::HeaderAcceptor;
pub use error::{AuxPowError, Error, ErrorClass};
pub use verify_auxpow::AuxPowVerifier;
pub use work::work_required;
