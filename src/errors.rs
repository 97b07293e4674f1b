//! Errors reported by maze and mesh generation.
//!
//! Every failure is returned before any partial result is produced. Generation is deterministic so
//! retrying with the same inputs fails identically.

// Create the Error, ErrorKind, ResultExt, and Result types
use error_chain::*;
error_chain! {

    errors {
        InvalidDimension(rows: usize, columns: usize) {
            description("invalid grid dimension")
            display("invalid grid dimension {} x {}: rows and columns must both be at least 1",
                    rows, columns)
        }
        InvalidParameter(name: &'static str, value: f64) {
            description("invalid generation parameter")
            display("invalid value {} for parameter '{}'", value, name)
        }
        ResourceExhausted(rows: usize, columns: usize) {
            description("grid too large")
            display("a {} x {} grid exceeds the supported number of cells and walls",
                    rows, columns)
        }
    }
}
