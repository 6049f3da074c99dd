use crate::container::QubitContainer;
use crate::errors::{RegisterError, RegisterResult};
use crate::index_translator::{index_gather, index_multiply_in, index_set, translate_indices};
use crate::operator::Operator;
use crate::types::{ContainerId, QubitLocation};
use crate::utils::{checked_alloc, checked_pow2, has_duplicates, zeros};
use crate::{Complex, Precision};
use log::{debug, trace};
use num_traits::One;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// A container together with the global qubits it represents, in local order.
#[derive(Debug)]
struct ContainerEntry<P: Precision> {
    container: QubitContainer<P>,
    qubits: Vec<usize>,
}

/// A register of qubits whose state is kept factored into independent dense containers.
///
/// Every qubit starts alone in its own container. Operations spanning several containers merge
/// them first (see [`QubitRegister::couple`]); containers are never split again.
///
/// # Example
/// ```
/// use qreg::prelude::*;
///
/// # fn main() -> RegisterResult<()> {
/// let mut r = QubitRegister::<f64>::seeded(2, 42)?;
/// r.do_op(&gates::hadamard(), &[0])?.do_op(&gates::cnot(), &[0, 1])?;
///
/// // The two qubits now share a container and always agree.
/// let a = r.measure(0)?;
/// assert_eq!(r.measure(1)?, a);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QubitRegister<P: Precision> {
    locations: Vec<QubitLocation>,
    containers: BTreeMap<ContainerId, ContainerEntry<P>>,
    next_id: usize,
    rng: StdRng,
}

impl<P: Precision> QubitRegister<P> {
    /// A register of `numbits` qubits, each in `|0>`, measured with an entropy-seeded rng.
    pub fn new(numbits: usize) -> RegisterResult<Self> {
        Self::with_rng(numbits, StdRng::from_entropy())
    }

    /// A register whose measurements are reproducible from `seed`.
    pub fn seeded(numbits: usize, seed: u64) -> RegisterResult<Self> {
        Self::with_rng(numbits, StdRng::seed_from_u64(seed))
    }

    /// A register drawing measurement outcomes from `rng`.
    pub fn with_rng(numbits: usize, rng: StdRng) -> RegisterResult<Self> {
        if numbits == 0 {
            return Err(RegisterError::invalid("register needs at least one qubit"));
        }
        let mut containers = BTreeMap::new();
        let locations = (0..numbits)
            .map(|q| {
                let id = ContainerId(q);
                let entry = ContainerEntry {
                    container: QubitContainer::new(1),
                    qubits: vec![q],
                };
                containers.insert(id, entry);
                QubitLocation {
                    container: id,
                    position: 0,
                }
            })
            .collect();
        Ok(Self {
            locations,
            containers,
            next_id: numbits,
            rng,
        })
    }

    /// Number of qubits in the register.
    pub fn num_qubits(&self) -> usize {
        self.locations.len()
    }

    fn check_qubits(&self, qubits: &[usize]) -> RegisterResult<()> {
        if qubits.is_empty() {
            return Err(RegisterError::invalid("no qubits given"));
        }
        if let Some(q) = qubits.iter().find(|q| **q >= self.num_qubits()) {
            return Err(RegisterError::invalid(format!("bad qubit: {}", q)));
        }
        Ok(())
    }

    fn check_distinct(qubits: &[usize]) -> RegisterResult<()> {
        if has_duplicates(qubits) {
            Err(RegisterError::invalid(format!("repeated qubits: {:?}", qubits)))
        } else {
            Ok(())
        }
    }

    /// Where `qubit` currently lives.
    pub fn location(&self, qubit: usize) -> RegisterResult<QubitLocation> {
        self.check_qubits(&[qubit])?;
        Ok(self.locations[qubit])
    }

    /// The distinct containers holding `qubits`, in order of first appearance.
    pub fn containers_holding(&self, qubits: &[usize]) -> RegisterResult<Vec<ContainerId>> {
        self.check_qubits(qubits)?;
        let mut ids: Vec<ContainerId> = Vec::with_capacity(qubits.len());
        qubits.iter().for_each(|q| {
            let id = self.locations[*q].container;
            if !ids.contains(&id) {
                ids.push(id);
            }
        });
        Ok(ids)
    }

    /// Live containers in ascending handle order.
    pub fn container_ids(&self) -> Vec<ContainerId> {
        self.containers.keys().copied().collect()
    }

    /// The container behind `id`, if it is still live.
    pub fn container(&self, id: ContainerId) -> Option<&QubitContainer<P>> {
        self.containers.get(&id).map(|entry| &entry.container)
    }

    /// The global qubits held by `id`, indexed by local position.
    pub fn qubits_in(&self, id: ContainerId) -> Option<&[usize]> {
        self.containers.get(&id).map(|entry| entry.qubits.as_slice())
    }

    fn entry(&self, id: ContainerId) -> RegisterResult<&ContainerEntry<P>> {
        self.containers
            .get(&id)
            .ok_or_else(|| RegisterError::invariant(format!("container {} is not live", id)))
    }

    fn entry_mut(&mut self, id: ContainerId) -> RegisterResult<&mut ContainerEntry<P>> {
        self.containers
            .get_mut(&id)
            .ok_or_else(|| RegisterError::invariant(format!("container {} is not live", id)))
    }

    /// Put all of `qubits` in one container, merging whole containers as needed. Any other qubit
    /// sharing a container with one of `qubits` is pulled in too. Returns the container.
    ///
    /// The merged local order concatenates each source container's order, containers taken in
    /// order of first appearance in `qubits`, and the amplitudes are the Kronecker product of the
    /// sources in that same order.
    pub fn couple(&mut self, qubits: &[usize]) -> RegisterResult<ContainerId> {
        let ids = self.containers_holding(qubits)?;
        if let [id] = ids.as_slice() {
            return Ok(*id);
        }

        let sources = ids
            .iter()
            .map(|id| self.entry(*id))
            .collect::<RegisterResult<Vec<_>>>()?;
        let n: usize = sources.iter().map(|entry| entry.qubits.len()).sum();

        let len = checked_alloc::<P>(checked_pow2(n)?)?;
        let mut amps = vec![Complex::<P>::one(); len];
        let mut merged_qubits = Vec::with_capacity(n);
        sources.iter().for_each(|entry| {
            let offset = merged_qubits.len();
            let targets: Vec<usize> = (offset..offset + entry.qubits.len()).collect();
            translate_indices(n, &targets)
                .iter()
                .for_each(|indices| {
                    index_multiply_in(&mut amps, indices, entry.container.amps())
                });
            merged_qubits.extend_from_slice(&entry.qubits);
        });
        debug!(
            "coupling {} containers into {} qubits {:?}",
            ids.len(),
            n,
            merged_qubits
        );

        let container = QubitContainer::from_amps(amps)?;
        let new_id = ContainerId(self.next_id);
        self.next_id += 1;
        ids.iter().for_each(|id| {
            self.containers.remove(id);
        });
        merged_qubits
            .iter()
            .enumerate()
            .for_each(|(position, q)| {
                self.locations[*q] = QubitLocation {
                    container: new_id,
                    position,
                }
            });
        self.containers.insert(
            new_id,
            ContainerEntry {
                container,
                qubits: merged_qubits,
            },
        );
        debug_assert!(self.check_invariants().is_ok());
        Ok(new_id)
    }

    /// Local positions of `qubits`, which must all live in container `id`.
    fn positions_in(&self, id: ContainerId, qubits: &[usize]) -> RegisterResult<Vec<usize>> {
        qubits
            .iter()
            .map(|q| {
                let loc = self.locations[*q];
                if loc.container == id {
                    Ok(loc.position)
                } else {
                    Err(RegisterError::invariant(format!(
                        "qubit {} is in {} rather than {}",
                        q, loc.container, id
                    )))
                }
            })
            .collect()
    }

    /// Finds the single container covering exactly `qubits`, or explains why there is none.
    fn whole_container(&self, qubits: &[usize]) -> RegisterResult<ContainerId> {
        let ids = self.containers_holding(qubits)?;
        Self::check_distinct(qubits)?;
        match ids.as_slice() {
            [id] => {
                let size = self.entry(*id)?.qubits.len();
                if size == qubits.len() {
                    Ok(*id)
                } else {
                    Err(RegisterError::invalid(format!(
                        "provided {} qubits but they are in a container of size {}",
                        qubits.len(),
                        size
                    )))
                }
            }
            _ => Err(RegisterError::unsupported(format!(
                "qubits {:?} span {} containers",
                qubits,
                ids.len()
            ))),
        }
    }

    /// Overwrite the joint state of `qubits` with `amps`, indexed with `qubits[0]` as the most
    /// significant bit. The qubits must make up exactly one container; spanning several
    /// containers is unsupported.
    pub fn set_amps(&mut self, amps: &[Complex<P>], qubits: &[usize]) -> RegisterResult<&mut Self> {
        self.check_qubits(qubits)?;
        Self::check_distinct(qubits)?;
        if amps.len() != checked_pow2(qubits.len())? {
            return Err(RegisterError::invalid(format!(
                "{} amplitudes given for {} qubits",
                amps.len(),
                qubits.len()
            )));
        }
        let id = self.whole_container(qubits)?;
        let positions = self.positions_in(id, qubits)?;

        let mut reordered = zeros(qubits.len());
        translate_indices(qubits.len(), &positions)
            .iter()
            .for_each(|indices| index_set(&mut reordered, indices, amps));
        self.entry_mut(id)?.container.set_amps(reordered)?;
        Ok(self)
    }

    /// The joint state of `qubits`, indexed with `qubits[0]` as the most significant bit. Same
    /// preconditions as [`QubitRegister::set_amps`].
    pub fn amplitudes(&self, qubits: &[usize]) -> RegisterResult<Vec<Complex<P>>> {
        let id = self.whole_container(qubits)?;
        let positions = self.positions_in(id, qubits)?;
        let container = &self.entry(id)?.container;
        let groups = translate_indices(qubits.len(), &positions);
        match groups.as_slice() {
            [indices] => Ok(index_gather(container.amps(), indices)),
            _ => Err(RegisterError::invariant("qubits do not cover their container")),
        }
    }

    /// Probability that measuring `qubit` gives `|1>`. Does not collapse.
    pub fn probability(&self, qubit: usize) -> RegisterResult<P> {
        let loc = self.location(qubit)?;
        self.entry(loc.container)?.container.prob_one(loc.position)
    }

    /// Measure `qubit`, collapsing its container. Returns true for `|1>`.
    pub fn measure(&mut self, qubit: usize) -> RegisterResult<bool> {
        let loc = self.location(qubit)?;
        let entry = self
            .containers
            .get_mut(&loc.container)
            .ok_or_else(|| RegisterError::invariant(format!("qubit {} has no container", qubit)))?;
        let outcome = entry.container.measure(loc.position, &mut self.rng)?;
        trace!("qubit {} measured {}", qubit, outcome);
        Ok(outcome)
    }

    /// Project `qubit` onto `outcome`, returning the probability that outcome had.
    pub fn collapse(&mut self, qubit: usize, outcome: bool) -> RegisterResult<P> {
        let loc = self.location(qubit)?;
        self.entry_mut(loc.container)?
            .container
            .collapse(loc.position, outcome)
    }

    /// Apply `op` to `qubits`, operator axis `j` acting on `qubits[j]`. The qubits are coupled
    /// first, which may produce a container larger than `op`.
    pub fn do_op(&mut self, op: &Operator<P>, qubits: &[usize]) -> RegisterResult<&mut Self> {
        self.check_qubits(qubits)?;
        Self::check_distinct(qubits)?;
        if op.n() != qubits.len() {
            return Err(RegisterError::invalid(format!(
                "operator on {} qubits applied to {} qubits",
                op.n(),
                qubits.len()
            )));
        }
        let id = self.couple(qubits)?;
        let positions = self.positions_in(id, qubits)?;
        self.entry_mut(id)?.container.do_op(op, &positions)?;
        Ok(self)
    }

    /// Verify the qubit to container mapping in both directions.
    pub fn check_invariants(&self) -> RegisterResult<()> {
        let mut covered = vec![false; self.num_qubits()];
        for (id, entry) in &self.containers {
            if entry.container.n() != entry.qubits.len() {
                return Err(RegisterError::invariant(format!(
                    "container {} holds {} qubits but has {} amplitudes",
                    id,
                    entry.qubits.len(),
                    entry.container.amps().len()
                )));
            }
            for (position, q) in entry.qubits.iter().enumerate() {
                let expected = QubitLocation {
                    container: *id,
                    position,
                };
                let consistent = self.locations.get(*q) == Some(&expected)
                    && covered.get(*q) == Some(&false);
                if !consistent {
                    return Err(RegisterError::invariant(format!(
                        "qubit {} at {} position {} is inconsistent",
                        q, id, position
                    )));
                }
                covered[*q] = true;
            }
        }
        match covered.iter().position(|c| !c) {
            Some(q) => Err(RegisterError::invariant(format!(
                "qubit {} belongs to no container",
                q
            ))),
            None => Ok(()),
        }
    }
}
