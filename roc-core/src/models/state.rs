/// Lifecycle state of a native handle.
///
/// ```text
/// open → closed
/// ```
///
/// There is no unopened state: a handle value only exists once its native
/// open call has succeeded. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleState {
    Open,
    Closed,
}

impl HandleState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(HandleState::Open.is_open());
        assert!(!HandleState::Open.is_closed());
        assert!(HandleState::Closed.is_closed());
    }
}
