use crate::errors::{RegisterError, RegisterResult};
use crate::{Complex, Precision};
use num_traits::Zero;

/// Set the `bit_index` bit in `num` to `value`.
///
/// # Example
/// ```
/// use qreg::utils::set_bit;
/// assert_eq!(set_bit(0, 1, true), 2);
/// assert_eq!(set_bit(1, 1, true), 3);
/// assert_eq!(set_bit(1, 0, false), 0);
/// ```
#[inline]
pub fn set_bit(num: usize, bit_index: usize, value: bool) -> usize {
    let v = 1 << bit_index;
    if value {
        num | v
    } else {
        num & !v
    }
}

/// Get the `bit_index` bit value from `num`.
///
/// # Example
/// ```
/// use qreg::utils::get_bit;
/// assert!(get_bit(2, 1));
/// assert!(!get_bit(2, 0));
/// ```
#[inline]
pub fn get_bit(num: usize, bit_index: usize) -> bool {
    ((num >> bit_index) & 1) != 0
}

/// Mask selecting the index bit of local `position` in an `n` qubit space.
#[inline]
pub fn position_mask(n: usize, position: usize) -> usize {
    1 << (n - 1 - position)
}

/// Get the index into a flat row-major matrix acting on `nindices` qubits.
#[inline]
pub fn get_flat_index(nindices: usize, i: usize, j: usize) -> usize {
    let mat_side = 1 << nindices;
    (i * mat_side) + j
}

/// Returns true if `positions` contains a repeated entry.
pub fn has_duplicates(positions: &[usize]) -> bool {
    positions
        .iter()
        .enumerate()
        .any(|(i, p)| positions[..i].contains(p))
}

/// Make a vector of complex numbers whose reals are given by `data`
///
/// # Example
/// ```
/// use qreg::utils::from_reals;
/// let v = from_reals(&[0.0, 1.0]);
/// assert_eq!(v[1].re, 1.0);
/// assert_eq!(v[1].im, 0.0);
/// ```
pub fn from_reals<P: Precision>(data: &[P]) -> Vec<Complex<P>> {
    data.iter().map(|x| Complex::new(*x, P::zero())).collect()
}

/// Make a vector of complex numbers whose reals are given by the first tuple entry in `data` and
/// whose imaginaries are from the second.
pub fn from_tuples<P: Precision>(data: &[(P, P)]) -> Vec<Complex<P>> {
    data.iter().map(|(r, i)| Complex::new(*r, *i)).collect()
}

/// Vector of `2^n` zero amplitudes.
pub(crate) fn zeros<P: Precision>(n: usize) -> Vec<Complex<P>> {
    vec![Complex::zero(); 1 << n]
}

/// `2^n`, or an error if it does not fit in a `usize`.
pub(crate) fn checked_pow2(n: usize) -> RegisterResult<usize> {
    u32::try_from(n)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .ok_or_else(|| RegisterError::invalid(format!("2^{} does not fit in a usize", n)))
}

/// Checks that `len` amplitudes of precision `P` fit in a single allocation.
pub(crate) fn checked_alloc<P: Precision>(len: usize) -> RegisterResult<usize> {
    len.checked_mul(size_of::<Complex<P>>())
        .filter(|bytes| *bytes <= isize::MAX as usize)
        .map(|_| len)
        .ok_or_else(|| RegisterError::invalid(format!("{} amplitudes cannot be allocated", len)))
}
