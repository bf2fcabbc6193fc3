//! Key-argument specifications: which arguments name a storage slot.

use normcache_types::{canonical, FieldArguments};
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Selects which field arguments participate in storage-key derivation.
///
/// Arguments excluded here are still passed through to merge and read
/// functions; they just don't differentiate storage slots. The config-file
/// form mirrors the conventional boolean-or-list shape: `true` ignores all
/// arguments, `false` uses all of them, and a list names the participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyArgs {
    /// Ignore all arguments: every access shares a single slot.
    None,
    /// Every supplied argument differentiates: one slot per combination.
    All,
    /// Only the named arguments participate; the rest are ignored.
    Only(Vec<String>),
}

impl KeyArgs {
    /// Convenience constructor for an explicit argument-name list.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// The subset of `args` that participates in key derivation.
    ///
    /// For [`KeyArgs::Only`], names with no supplied value are simply
    /// skipped — an unset argument never contributes to a key.
    #[must_use]
    pub fn filter(&self, args: &FieldArguments) -> FieldArguments {
        match self {
            Self::None => FieldArguments::new(),
            Self::All => args.clone(),
            Self::Only(names) => names
                .iter()
                .filter_map(|name| args.get(name).map(|value| (name.clone(), value.clone())))
                .collect(),
        }
    }

    /// Derives the canonical key suffix for the given arguments.
    ///
    /// Empty when no argument is selected; otherwise the selected arguments
    /// as a canonical JSON object wrapped in parentheses, so deeply-equal
    /// argument sets always yield the same suffix regardless of how they
    /// were constructed.
    ///
    /// # Errors
    ///
    /// Fails only when an argument value cannot be canonically serialized.
    pub fn key_suffix(&self, args: &FieldArguments) -> Result<String, normcache_types::Error> {
        let selected = self.filter(args);
        if selected.is_empty() {
            if let Self::Only(names) = self {
                if !names.is_empty() && !args.is_empty() {
                    // Configuration smell, not an error: none of the
                    // configured names occur among the supplied arguments.
                    tracing::debug!(?names, "key args selected none of the supplied arguments");
                }
            }
            return Ok(String::new());
        }
        Ok(format!("({})", canonical::to_string(&selected)?))
    }
}

impl Serialize for KeyArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_bool(true),
            Self::All => serializer.serialize_bool(false),
            Self::Only(names) => names.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for KeyArgs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyArgsVisitor;

        impl<'de> Visitor<'de> for KeyArgsVisitor {
            type Value = KeyArgs;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a boolean or a list of argument names")
            }

            fn visit_bool<E: serde::de::Error>(self, ignore_args: bool) -> Result<KeyArgs, E> {
                Ok(if ignore_args { KeyArgs::None } else { KeyArgs::All })
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<KeyArgs, A::Error> {
                let mut names = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(name) = seq.next_element::<String>()? {
                    names.push(name);
                }
                Ok(KeyArgs::Only(names))
            }
        }

        deserializer.deserialize_any(KeyArgsVisitor)
    }
}
