pub mod memory;

mod macros;

pub use memory::{Cache, Capacity, EvictionPolicy, MaxAge, NeverEvict};
