//! Data shaping for the payment charts: stacked layers, tooltip lookups and
//! pointer-to-period mapping. Drawing itself lives with the caller.

pub mod nearest;
pub mod stack;
