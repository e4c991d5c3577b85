pub mod board;
pub mod session;

// Re-export important types
pub use board::*;
pub use session::*;
