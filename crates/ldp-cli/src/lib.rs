//! Library components of the `ldp` binary.

pub mod feedback;
pub mod logging;
pub mod pipeline;
pub mod types;
