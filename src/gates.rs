use crate::operator::Operator;
use crate::utils::{from_reals, from_tuples};
use crate::{Complex, Precision};
use num_traits::{One, Zero};

/// Hadamard gate.
pub fn hadamard<P: Precision>() -> Operator<P> {
    let mult = (P::one() / (P::one() + P::one())).sqrt();
    Operator::from_raw(1, from_reals(&[mult, mult, mult, -mult]))
}

/// Pauli X (NOT) gate.
pub fn pauli_x<P: Precision>() -> Operator<P> {
    let (z, o) = (P::zero(), P::one());
    Operator::from_raw(1, from_reals(&[z, o, o, z]))
}

/// Pauli Z gate.
pub fn pauli_z<P: Precision>() -> Operator<P> {
    let (z, o) = (P::zero(), P::one());
    Operator::from_raw(1, from_reals(&[o, z, z, -o]))
}

/// Controlled NOT, axis 0 is the control and axis 1 the target.
pub fn cnot<P: Precision>() -> Operator<P> {
    let (z, o) = (P::zero(), P::one());
    #[rustfmt::skip]
    let data = from_reals(&[
        o, z, z, z,
        z, o, z, z,
        z, z, z, o,
        z, z, o, z,
    ]);
    Operator::from_raw(2, data)
}

/// Applies a phase `e^{i theta}` to `|11>`. Symmetric in its two axes.
pub fn controlled_phase<P: Precision>(theta: P) -> Operator<P> {
    let mut data = vec![Complex::<P>::zero(); 16];
    data[0] = Complex::one();
    data[5] = Complex::one();
    data[10] = Complex::one();
    data[15] = Complex::from_polar(P::one(), theta);
    Operator::from_raw(2, data)
}

/// Controlled S: a phase of exactly `i` on `|11>`. Four applications give the identity.
pub fn cs<P: Precision>() -> Operator<P> {
    let (z, o) = (P::zero(), P::one());
    #[rustfmt::skip]
    let data = from_tuples(&[
        (o, z), (z, z), (z, z), (z, z),
        (z, z), (o, z), (z, z), (z, z),
        (z, z), (z, z), (o, z), (z, z),
        (z, z), (z, z), (z, z), (z, o),
    ]);
    Operator::from_raw(2, data)
}
