pub mod event;
pub mod pool;
pub mod token;

// Re-export for easier access
pub use event::{EventKind, LiquidityEvent};
pub use pool::PoolSnapshot;
pub use token::Token;
