pub mod bridge;

pub use bridge::{Arg, ManagedRuntimeBridge};
