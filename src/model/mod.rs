//! Pure data structures: orders, tickets and the shelf taxonomy.

pub mod error;
pub mod order;
pub mod temperature;

pub use error::*;
pub use order::*;
pub use temperature::*;
