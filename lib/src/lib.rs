#![no_std]
pub mod errors;
pub mod types;
pub mod validation;

pub use errors::*;
pub use types::*;

// Config
pub const MAX_STRING_LENGTH: u32 = 256;

// Escrow held while an asset is occupied: first-cycle rent plus an equal
// security deposit. Exact match is required on activation, so there is no
// refund path for excess payment.
pub const ESCROW_CYCLES: i128 = 2;
