#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{RegisterError, RegisterResult};
use crate::index_translator::{full_to_sub, sub_to_full};
use crate::utils::{checked_alloc, checked_pow2, get_flat_index, has_duplicates};
use crate::{chunks_mut, iter_mut, Complex, Precision};
use num_traits::{One, Zero};

/// A unitary acting on `n` qubits, stored as a dense row-major `2^n` by `2^n` matrix.
///
/// Operator axis `j` is bit `n - 1 - j` of the row and column index. Which qubits the axes bind
/// to is decided when the operator is extended or applied. Combinators never mutate, they return
/// new operators.
///
/// # Example
/// ```
/// use qreg::prelude::*;
///
/// # fn main() -> RegisterResult<()> {
/// let h = gates::hadamard::<f64>();
/// let hh = h.curry_before(&h)?;
/// assert!(hh.approx_eq(&Operator::identity(1), 1e-10));
///
/// // Lift a hadamard onto the last qubit of a three qubit space.
/// let h2 = h.extend(3, &[2])?;
/// assert_eq!(h2.n(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Operator<P: Precision> {
    n: usize,
    mat: Vec<Complex<P>>,
}

impl<P: Precision> Operator<P> {
    /// Make an operator on `n` qubits from row-major matrix `data` with `4^n` entries.
    pub fn new(n: usize, data: Vec<Complex<P>>) -> RegisterResult<Self> {
        if n == 0 {
            return Err(RegisterError::invalid("operator must act on at least one qubit"));
        }
        let expected_mat_size = matrix_len(n)?;
        if data.len() != expected_mat_size {
            let message = format!(
                "Matrix data has {:?} entries versus expected 2^2*{:?}",
                data.len(),
                n
            );
            Err(RegisterError::invalid(message))
        } else {
            Ok(Self { n, mat: data })
        }
    }

    /// Construct without validation, for matrices whose size is fixed by the caller.
    pub(crate) fn from_raw(n: usize, mat: Vec<Complex<P>>) -> Self {
        debug_assert_eq!(mat.len(), 1 << (2 * n));
        Self { n, mat }
    }

    /// The identity on `n` qubits.
    pub fn identity(n: usize) -> Self {
        let side = 1 << n;
        let mat = (0..side * side)
            .map(|i| {
                if i / side == i % side {
                    Complex::one()
                } else {
                    Complex::zero()
                }
            })
            .collect();
        Self { n, mat }
    }

    /// Number of qubits acted on.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Row-major matrix entries.
    pub fn matrix(&self) -> &[Complex<P>] {
        &self.mat
    }

    /// Matrix entry at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> Complex<P> {
        self.mat[get_flat_index(self.n, row, col)]
    }

    /// Lift this operator into a `total` qubit space, acting on `targets` (axis `j` on
    /// `targets[j]`) and as the identity on every other position.
    pub fn extend(&self, total: usize, targets: &[usize]) -> RegisterResult<Self> {
        if targets.len() != self.n {
            let message = format!(
                "Operator on {} qubits cannot be extended onto {} positions",
                self.n,
                targets.len()
            );
            return Err(RegisterError::invalid(message));
        }
        if let Some(p) = targets.iter().find(|p| **p >= total) {
            let message = format!("Position {} is outside a space of {} qubits", p, total);
            return Err(RegisterError::invalid(message));
        }
        if has_duplicates(targets) {
            return Err(RegisterError::invalid(format!(
                "Repeated extension positions: {:?}",
                targets
            )));
        }

        let side = checked_pow2(total)?;
        let mut mat = vec![Complex::zero(); checked_alloc::<P>(matrix_len(total)?)?];
        chunks_mut!(mat, side)
            .enumerate()
            .for_each(|(row, row_data)| {
                let subrow = full_to_sub(total, targets, row);
                // Only columns agreeing with `row` off the targets are nonzero.
                (0..1 << self.n).for_each(|subcol| {
                    let col = sub_to_full(total, targets, subcol, row);
                    row_data[col] = self.get(subrow, subcol);
                })
            });
        Ok(Self { n: total, mat })
    }

    /// An operator equivalent to applying `self` and then `other`, that is `other * self`.
    pub fn curry_before(&self, other: &Self) -> RegisterResult<Self> {
        if self.n != other.n {
            let message = format!(
                "Cannot compose an operator on {} qubits with one on {} qubits",
                self.n, other.n
            );
            return Err(RegisterError::invalid(message));
        }
        let n = self.n;
        let side = 1 << n;
        let mut mat = vec![Complex::zero(); side * side];
        iter_mut!(mat).enumerate().for_each(|(indx, entry)| {
            let (row, col) = (indx / side, indx % side);
            *entry = (0..side)
                .map(|k| other.get(row, k) * self.get(k, col))
                .sum();
        });
        Ok(Self { n, mat })
    }

    /// Conjugate transpose. For a unitary this is its inverse.
    pub fn dagger(&self) -> Self {
        let side = 1 << self.n;
        let mat = (0..side * side)
            .map(|indx| self.get(indx % side, indx / side).conj())
            .collect();
        Self { n: self.n, mat }
    }

    /// Matrix-vector product with a vector of length `2^n`.
    pub fn apply(&self, input: &[Complex<P>]) -> Vec<Complex<P>> {
        debug_assert_eq!(input.len(), 1 << self.n);
        self.mat
            .chunks(input.len())
            .map(|row| row.iter().zip(input.iter()).map(|(m, v)| m * v).sum())
            .collect()
    }

    /// Entrywise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: P) -> bool {
        self.n == other.n
            && self
                .mat
                .iter()
                .zip(other.mat.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Check `U^dagger U = I` within `tol`.
    pub fn is_unitary(&self, tol: P) -> bool {
        self.curry_before(&self.dagger())
            .map(|u| u.approx_eq(&Self::identity(self.n), tol))
            .unwrap_or(false)
    }
}

/// Entries in a square matrix on `n` qubits.
fn matrix_len(n: usize) -> RegisterResult<usize> {
    let side = checked_pow2(n)?;
    side.checked_mul(side).ok_or_else(|| {
        RegisterError::invalid(format!("A matrix on {} qubits does not fit in memory", n))
    })
}

#[cfg(test)]
mod operator_tests {
    use super::*;
    use crate::gates;
    use crate::utils::from_reals;

    fn x() -> Operator<f64> {
        Operator::new(1, from_reals(&[0.0, 1.0, 1.0, 0.0])).unwrap()
    }

    #[test]
    fn test_new_checks_size() {
        assert!(Operator::<f64>::new(1, from_reals(&[1.0, 0.0, 0.0])).is_err());
        assert!(Operator::<f64>::new(0, from_reals(&[1.0])).is_err());
        assert!(Operator::<f64>::new(2, from_reals(&[0.0; 16])).is_ok());
    }

    #[test]
    fn test_oversized_matrices_rejected() {
        assert!(matches!(
            Operator::<f64>::new(40, vec![]),
            Err(RegisterError::InvalidArgument(_))
        ));
        assert!(matches!(
            Operator::<f64>::new(usize::BITS as usize, vec![]),
            Err(RegisterError::InvalidArgument(_))
        ));
        assert!(matches!(
            x().extend(40, &[0]),
            Err(RegisterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_extend_first_of_two() {
        // X on position 0 of |ab> flips the most significant bit.
        let op = x().extend(2, &[0]).unwrap();
        let out = op.apply(&from_reals(&[1.0, 0.0, 0.0, 0.0]));
        assert_eq!(out, from_reals(&[0.0, 0.0, 1.0, 0.0]));

        let op = x().extend(2, &[1]).unwrap();
        let out = op.apply(&from_reals(&[1.0, 0.0, 0.0, 0.0]));
        assert_eq!(out, from_reals(&[0.0, 1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_extend_reversed_cnot() {
        // Control on position 1, target position 0.
        let op = gates::cnot::<f64>().extend(2, &[1, 0]).unwrap();
        // |01> -> |11>
        let out = op.apply(&from_reals(&[0.0, 1.0, 0.0, 0.0]));
        assert_eq!(out, from_reals(&[0.0, 0.0, 0.0, 1.0]));
        // |10> unchanged
        let out = op.apply(&from_reals(&[0.0, 0.0, 1.0, 0.0]));
        assert_eq!(out, from_reals(&[0.0, 0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_extend_identity_elsewhere() {
        let op = Operator::<f64>::identity(1).extend(3, &[1]).unwrap();
        assert_eq!(op, Operator::identity(3));
    }

    #[test]
    fn test_extend_bad_targets() {
        assert!(x().extend(2, &[2]).is_err());
        assert!(x().extend(2, &[0, 1]).is_err());
        assert!(gates::cnot::<f64>().extend(3, &[1, 1]).is_err());
    }

    #[test]
    fn test_curry_order() {
        // Z then X is X*Z = [[0, -1], [1, 0]].
        let z = gates::pauli_z::<f64>();
        let xz = z.curry_before(&x()).unwrap();
        assert_eq!(xz.matrix(), from_reals(&[0.0, -1.0, 1.0, 0.0]).as_slice());
        let zx = x().curry_before(&z).unwrap();
        assert_eq!(zx.matrix(), from_reals(&[0.0, 1.0, -1.0, 0.0]).as_slice());
    }

    #[test]
    fn test_curry_mismatched() {
        assert_eq!(
            x().curry_before(&gates::cnot()).unwrap_err(),
            RegisterError::invalid("Cannot compose an operator on 1 qubits with one on 2 qubits")
        );
    }

    #[test]
    fn test_curry_associative() {
        let h = gates::hadamard::<f64>().extend(2, &[0]).unwrap();
        let cs = gates::cs::<f64>();
        let cx = gates::cnot::<f64>().extend(2, &[1, 0]).unwrap();
        let left = h.curry_before(&cs).unwrap().curry_before(&cx).unwrap();
        let right = h.curry_before(&cs.curry_before(&cx).unwrap()).unwrap();
        assert!(left.approx_eq(&right, 1e-12));
    }

    #[test]
    fn test_dagger_inverts() {
        let op = gates::controlled_phase::<f64>(0.3)
            .curry_before(&gates::hadamard::<f64>().extend(2, &[1]).unwrap())
            .unwrap();
        assert!(op.is_unitary(1e-10));
        let round = op.curry_before(&op.dagger()).unwrap();
        assert!(round.approx_eq(&Operator::identity(2), 1e-10));
    }

    #[test]
    fn test_not_unitary() {
        let op = Operator::<f64>::new(1, from_reals(&[1.0, 1.0, 0.0, 1.0])).unwrap();
        assert!(!op.is_unitary(1e-10));
    }
}
