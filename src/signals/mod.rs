/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

pub mod change_summary;
pub mod crossover;

pub use change_summary::*;
pub use crossover::*;
