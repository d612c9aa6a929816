//! Dependency graph analysis
//! Directed cycle detection over task prerequisite edges

pub mod cycles;

pub use cycles::detect_cycles;
