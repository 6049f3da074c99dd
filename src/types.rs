use num_traits::{Float, NumAssign};
use std::fmt::{Debug, Display, Formatter};
use std::iter::{Product, Sum};

/// The float precision of the register.
pub trait Precision:
    Default + NumAssign + Float + Sum + Send + Sync + Display + Product + Debug
{
}

impl Precision for f64 {}

impl Precision for f32 {}

/// Opaque handle to a container owned by a register. Handles are never reused, so two
/// containers holding identical amplitudes are still distinct.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContainerId(pub(crate) usize);

impl Display for ContainerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a qubit currently lives: which container, and at which local position.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct QubitLocation {
    /// Container holding the qubit.
    pub container: ContainerId,
    /// Local position within the container, 0 being the most significant index bit.
    pub position: usize,
}
