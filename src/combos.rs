use crate::errors::RegisterResult;
use crate::gates::{cnot, cs, hadamard};
use crate::operator::Operator;
use crate::Precision;

/// Three qubit Toffoli (CCNOT): flips axis 2 when axes 0 and 1 are both set.
///
/// Built from hadamards, controlled-S and CNOTs so it can be applied to a register with a single
/// `do_op`, coupling the three qubits once.
///
/// # Example
/// ```
/// use qreg::prelude::*;
///
/// # fn main() -> RegisterResult<()> {
/// let mut r = QubitRegister::<f64>::seeded(3, 7)?;
/// r.do_op(&gates::pauli_x(), &[0])?
///     .do_op(&gates::pauli_x(), &[1])?
///     .do_op(&combos::toffoli()?, &[0, 1, 2])?;
/// assert!(r.measure(2)?);
/// # Ok(())
/// # }
/// ```
pub fn toffoli<P: Precision>() -> RegisterResult<Operator<P>> {
    let h2 = hadamard::<P>().extend(3, &[2])?;
    let cs02 = cs::<P>().extend(3, &[0, 2])?;
    let cs12 = cs::<P>().extend(3, &[1, 2])?;
    let cnot01 = cnot::<P>().extend(3, &[0, 1])?;
    // Three CS gives CS^dagger.
    h2.curry_before(&cs02)?
        .curry_before(&cnot01)?
        .curry_before(&cs12)?
        .curry_before(&cs12)?
        .curry_before(&cs12)?
        .curry_before(&cnot01)?
        .curry_before(&cs12)?
        .curry_before(&h2)
}

/// Two qubit SWAP from three alternating CNOTs.
pub fn swap<P: Precision>() -> RegisterResult<Operator<P>> {
    let forward = cnot::<P>();
    let backward = cnot::<P>().extend(2, &[1, 0])?;
    forward.curry_before(&backward)?.curry_before(&forward)
}
