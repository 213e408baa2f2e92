use std::fmt;

/// An NDN name: an ordered sequence of opaque components.
///
/// The strategy never inspects component bytes, only prefix relationships between names, so this
/// is deliberately the simplest representation that supports that — a `Vec` of owned components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    components: Vec<Box<str>>,
}

impl Name {
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the prefix made of the first `len` components.
    ///
    /// A `len` exceeding this name's own length is truncated to the full name, per the NACK
    /// Handler's failure semantics for an over-long `prefix_len`.
    pub fn prefix(&self, len: usize) -> Name {
        let len = len.min(self.components.len());

        Name {
            components: self.components[..len].to_vec(),
        }
    }

    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.components.len() <= other.components.len()
            && self.components == other.components[..self.components.len()]
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            write!(f, "/{component}")?;
        }

        if self.components.is_empty() {
            write!(f, "/")?;
        }

        Ok(())
    }
}

impl<const N: usize> From<[&str; N]> for Name {
    fn from(components: [&str; N]) -> Self {
        Name::from_components(components)
    }
}
