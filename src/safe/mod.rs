//! Safe SDK seam and the proposal review workflow

pub mod mock;
pub mod review;
pub mod traits;

pub use mock::MockSafe;
pub use review::ProposalReview;
pub use traits::{SafeCall, SafeClient, SafeTransaction, TxHash};
