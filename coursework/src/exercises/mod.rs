//! Built-in exercise programs.

mod dynamic_array;
mod shared_swap;
mod sum;

pub use dynamic_array::{CAPACITY, DynamicArray, fill_multiples};
pub use shared_swap::{SharedSwap, swap_and_report};
pub use sum::Sum;
