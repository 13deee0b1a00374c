use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner shared by every identifier kind.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern a string, or return the existing handle if already interned.
            pub fn intern(s: &str) -> Self {
                $name(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice. The interner is never cleared,
            /// so the slice lives for the whole program.
            pub fn as_str(&self) -> &'static str {
                INTERNER.resolve(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::intern(&s))
            }
        }
    };
}

interned_id! {
    /// Identifier of a node in the graph store (`node-<n>`).
    /// Internally a 4-byte `Spur` index.
    NodeId
}

interned_id! {
    /// Identifier of an edge in the graph store (`edge-<n>`).
    EdgeId
}

interned_id! {
    /// Node-type key into the [`NodeTypeRegistry`](crate::registry::NodeTypeRegistry),
    /// e.g. `default`, `input`.
    NodeKind
}

impl NodeId {
    /// The id the store allocates for its `n`-th node.
    pub fn numbered(n: u64) -> Self {
        Self::intern(&format!("node-{n}"))
    }
}

impl EdgeId {
    /// The id the store allocates for its `n`-th edge.
    pub fn numbered(n: u64) -> Self {
        Self::intern(&format!("edge-{n}"))
    }
}
