#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    missing_docs
)]

//! Quantum register simulation with a factored state.
//!
//! Rather than one amplitude vector of length `2^N`, the register keeps a partition of its qubits
//! into containers, each a dense amplitude vector over the qubits it holds. Qubits only share a
//! container once an operation has touched them together, so registers of many weakly
//! interacting qubits stay small.
//!
//! Operators are dense unitaries that can be lifted into larger spaces with
//! [`Operator::extend`](operator::Operator::extend) and sequenced with
//! [`Operator::curry_before`](operator::Operator::curry_before), so a multi-gate circuit on a few
//! qubits can be applied with a single coupling.
//!
//! # Example (Toffoli)
//! ```
//! use qreg::prelude::*;
//!
//! # fn main() -> RegisterResult<()> {
//! let mut r = QubitRegister::<f64>::seeded(4, 1)?;
//!
//! // Prepare |1> on qubits 0 and 1, leave 2 and 3 alone.
//! let one = utils::from_reals(&[0.0, 1.0]);
//! r.set_amps(&one, &[0])?.set_amps(&one, &[1])?;
//!
//! // Build the gate once out of smaller pieces, then apply it.
//! let ccnot = combos::toffoli()?;
//! r.do_op(&ccnot, &[0, 1, 2])?;
//!
//! assert!(r.measure(2)?);
//! assert!(!r.measure(3)?);
//! // Qubit 3 was never touched so it still lives alone.
//! assert_eq!(r.container_ids().len(), 2);
//! # Ok(())
//! # }
//! ```

/// Operators built by composing standard gates.
pub mod combos;
/// Dense state storage for a group of qubits.
pub mod container;
/// Register error types.
pub mod errors;
/// Standard single and two qubit gates.
pub mod gates;
pub mod index_translator;
/// Unitary operators and their composition.
pub mod operator;
/// Helpers for converting from synchronous to parallel iterators.
pub mod rayon_helper;
/// The factored qubit register.
pub mod register;
/// Reusable types.
pub mod types;
/// Utility functions for bit and index manipulation
pub mod utils;

pub use num_complex::Complex;
pub use rand;
pub use types::*;

/// Commonly used types and traits.
/// ```
/// use qreg::prelude::*;
/// ```
pub mod prelude {
    pub use super::*;
    pub use crate::container::QubitContainer;
    pub use crate::errors::*;
    pub use crate::operator::Operator;
    pub use crate::register::QubitRegister;
}
