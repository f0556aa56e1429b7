//! Image → theme: decode, cluster, map onto the 19 slots.

pub mod assign;
pub mod contrast;
pub mod decode;
pub mod extract;
