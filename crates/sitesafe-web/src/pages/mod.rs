//! Dashboard pages shown in the shell's main region

pub mod history;
pub mod live;
pub mod stats;
