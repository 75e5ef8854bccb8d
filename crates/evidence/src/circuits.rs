//! Mapping from a circuit degree to the index of the circuit the on-chain
//! verifier should use.

use std::collections::BTreeMap;

/// Looks up the circuit index registered for a degree. Implementations must
/// be pure: the same degree always maps to the same index.
pub trait CircuitIndexLookup: Send + Sync {
    /// Returns the circuit index for `degree`, or `None` if no circuit is registered.
    fn circuit_index(&self, degree: u64) -> Option<u16>;
}

impl<F> CircuitIndexLookup for F
where
    F: Fn(u64) -> Option<u16> + Send + Sync,
{
    fn circuit_index(&self, degree: u64) -> Option<u16> {
        self(degree)
    }
}

/// Circuits registered in the PSE zkEVM verifier, keyed by degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZkevmCircuits {
    indices: BTreeMap<u64, u16>,
}

impl ZkevmCircuits {
    /// Registers `index` for `degree`, replacing any previous registration.
    pub fn with_circuit(mut self, degree: u64, index: u16) -> Self {
        self.indices.insert(degree, index);
        self
    }

    /// Returns the registered degrees in ascending order.
    pub fn degrees(&self) -> impl Iterator<Item = u64> + '_ {
        self.indices.keys().copied()
    }
}

impl Default for ZkevmCircuits {
    fn default() -> Self {
        [(19, 0), (20, 1)].into_iter().collect()
    }
}

impl FromIterator<(u64, u16)> for ZkevmCircuits {
    fn from_iter<T: IntoIterator<Item = (u64, u16)>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl CircuitIndexLookup for ZkevmCircuits {
    fn circuit_index(&self, degree: u64) -> Option<u16> {
        self.indices.get(&degree).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_circuits() {
        let circuits = ZkevmCircuits::default();
        assert_eq!(circuits.circuit_index(19), Some(0));
        assert_eq!(circuits.circuit_index(20), Some(1));
        assert_eq!(circuits.circuit_index(18), None);
        assert_eq!(circuits.degrees().collect::<Vec<_>>(), vec![19, 20]);
    }

    #[test]
    fn test_custom_registration() {
        let circuits = ZkevmCircuits::default().with_circuit(18, 3).with_circuit(19, 5);
        assert_eq!(circuits.circuit_index(18), Some(3));
        assert_eq!(circuits.circuit_index(19), Some(5));
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |degree: u64| (degree == 21).then_some(2u16);
        assert_eq!(lookup.circuit_index(21), Some(2));
        assert_eq!(lookup.circuit_index(22), None);
    }
}
