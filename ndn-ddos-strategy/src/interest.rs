use crate::name::Name;

/// An Interest packet, reduced to what the strategy reads: its name.
///
/// Selectors and other parameters are opaque to this strategy and are carried through `Command`
/// values unexamined by cloning the whole value — we model that by keeping the type a plain,
/// cheaply-cloned struct rather than trying to represent the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    pub name: Name,
}

impl Interest {
    pub fn new(name: Name) -> Self {
        Self { name }
    }
}
