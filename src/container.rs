#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::errors::{RegisterError, RegisterResult};
use crate::index_translator::{index_gather, index_set, translate_indices};
use crate::operator::Operator;
use crate::utils::{has_duplicates, position_mask, zeros};
use crate::{into_iter, iter, iter_mut, Complex, Precision};
use log::trace;
use num_traits::{One, Zero};
use rand::Rng;

/// Dense joint state of a group of qubits.
///
/// Holds `2^n` amplitudes where local position `p` is index bit `n - 1 - p`, so a container of
/// `[a, b]` stores `a ⊗ b`.
#[derive(Clone, Debug, PartialEq)]
pub struct QubitContainer<P: Precision> {
    n: usize,
    amps: Vec<Complex<P>>,
}

impl<P: Precision> QubitContainer<P> {
    /// A container of `n` qubits in `|0...0>`.
    pub fn new(n: usize) -> Self {
        let mut amps = zeros(n);
        amps[0] = Complex::one();
        Self { n, amps }
    }

    /// A container of `n` qubits with every amplitude zero.
    pub fn zeroed(n: usize) -> Self {
        Self { n, amps: zeros(n) }
    }

    /// Wrap an existing amplitude vector, whose length must be a nonzero power of two.
    pub fn from_amps(amps: Vec<Complex<P>>) -> RegisterResult<Self> {
        if amps.len() < 2 || !amps.len().is_power_of_two() {
            let message = format!(
                "Amplitude vector of length {} does not describe any qubits",
                amps.len()
            );
            return Err(RegisterError::invalid(message));
        }
        let n = amps.len().trailing_zeros() as usize;
        Ok(Self { n, amps })
    }

    /// Number of qubits held.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The amplitudes.
    pub fn amps(&self) -> &[Complex<P>] {
        &self.amps
    }

    /// Replace the amplitudes. Only the length is checked.
    pub fn set_amps(&mut self, amps: Vec<Complex<P>>) -> RegisterResult<()> {
        if amps.len() != self.amps.len() {
            let message = format!(
                "Container of {} qubits needs {} amplitudes, got {}",
                self.n,
                self.amps.len(),
                amps.len()
            );
            return Err(RegisterError::invalid(message));
        }
        self.amps = amps;
        Ok(())
    }

    /// Total squared magnitude of the state.
    pub fn norm_sqr(&self) -> P {
        iter!(self.amps).map(Complex::<P>::norm_sqr).sum()
    }

    fn check_positions(&self, positions: &[usize]) -> RegisterResult<()> {
        if let Some(p) = positions.iter().find(|p| **p >= self.n) {
            let message = format!("Position {} is outside a container of {} qubits", p, self.n);
            Err(RegisterError::invalid(message))
        } else if has_duplicates(positions) {
            let message = format!("Repeated positions: {:?}", positions);
            Err(RegisterError::invalid(message))
        } else {
            Ok(())
        }
    }

    /// Apply `op` with its axis `j` on local position `positions[j]`, identity elsewhere.
    pub fn do_op(&mut self, op: &Operator<P>, positions: &[usize]) -> RegisterResult<()> {
        if op.n() != positions.len() {
            let message = format!(
                "Operator on {} qubits applied to {} positions",
                op.n(),
                positions.len()
            );
            return Err(RegisterError::invalid(message));
        }
        self.check_positions(positions)?;
        trace!("applying {} qubit op at {:?} of {}", op.n(), positions, self.n);

        // Each setting of the untouched bits is an independent sub-vector.
        let groups = translate_indices(self.n, positions);
        let amps = &self.amps;
        let results: Vec<(Vec<usize>, Vec<Complex<P>>)> = into_iter!(groups)
            .map(|indices| {
                let sub = op.apply(&index_gather(amps, &indices));
                (indices, sub)
            })
            .collect();
        results
            .into_iter()
            .for_each(|(indices, sub)| index_set(&mut self.amps, &indices, &sub));
        Ok(())
    }

    /// Probability that measuring `position` gives `|1>`, relative to the total norm.
    pub fn prob_one(&self, position: usize) -> RegisterResult<P> {
        self.check_positions(&[position])?;
        let (p0, p1) = self.branch_weights(position);
        let total = p0 + p1;
        if total.is_zero() {
            Err(RegisterError::non_physical("container has zero norm"))
        } else {
            Ok(p1 / total)
        }
    }

    /// Squared magnitudes with the bit at `position` clear and set.
    fn branch_weights(&self, position: usize) -> (P, P) {
        let mask = position_mask(self.n, position);
        let p1: P = iter!(self.amps)
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum();
        let p0: P = iter!(self.amps)
            .enumerate()
            .filter(|(i, _)| i & mask == 0)
            .map(|(_, c)| c.norm_sqr())
            .sum();
        (p0, p1)
    }

    /// Project `position` onto `outcome` and renormalize. Returns the probability the outcome had.
    pub fn collapse(&mut self, position: usize, outcome: bool) -> RegisterResult<P> {
        self.check_positions(&[position])?;
        let (p0, p1) = self.branch_weights(position);
        let weight = if outcome { p1 } else { p0 };
        if weight.is_zero() {
            let message = format!(
                "outcome {} at position {} has zero probability",
                outcome as u8, position
            );
            return Err(RegisterError::non_physical(message));
        }
        self.project(position, outcome, weight);
        Ok(weight / (p0 + p1))
    }

    fn project(&mut self, position: usize, outcome: bool, weight: P) {
        let mask = position_mask(self.n, position);
        let p_mult = P::one() / weight.sqrt();
        iter_mut!(self.amps).enumerate().for_each(|(i, c)| {
            if (i & mask != 0) == outcome {
                *c = *c * p_mult;
            } else {
                *c = Complex::zero();
            }
        });
    }

    /// Measure `position`, collapsing the state. Returns true for `|1>`.
    pub fn measure<R: Rng + ?Sized>(
        &mut self,
        position: usize,
        rng: &mut R,
    ) -> RegisterResult<bool> {
        self.check_positions(&[position])?;
        let (p0, p1) = self.branch_weights(position);
        let total = p0 + p1;
        let draw = P::from(rng.gen::<f64>())
            .ok_or_else(|| RegisterError::invariant("random draw not representable"))?;
        let outcome = draw * total < p1;
        let weight = if outcome { p1 } else { p0 };
        if weight.is_zero() {
            let message = format!(
                "outcome {} at position {} has zero probability",
                outcome as u8, position
            );
            return Err(RegisterError::non_physical(message));
        }
        self.project(position, outcome, weight);
        trace!("measured position {} of {}: {}", position, self.n, outcome);
        Ok(outcome)
    }
}
