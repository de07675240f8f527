//! Enumerated option sets offered by the custom-order builder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EstimateError;

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => ($key:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Number of variants.
            pub const COUNT: usize = Self::ALL.len();

            /// Stable lowercase key used in config files and form values.
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Position in [`Self::ALL`].
            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $name {
            type Err = EstimateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key() == s)
                    .ok_or_else(|| {
                        EstimateError::InvalidSelection(format!("unknown {} '{}'", $what, s))
                    })
            }
        }
    };
}

option_enum! {
    /// Kind of piece being ordered.
    Category, "category" {
        Wreath => ("wreath", "Wreath"),
        Centerpiece => ("centerpiece", "Centerpiece"),
        Memorial => ("memorial", "Memorial"),
    }
}

option_enum! {
    /// Piece size.
    Size, "size" {
        Small => ("small", "Small"),
        Medium => ("medium", "Medium"),
        Large => ("large", "Large"),
    }
}

option_enum! {
    /// Floral material.
    Material, "material" {
        Faux => ("faux", "Faux/Silk"),
        Dried => ("dried", "Dried"),
        Fresh => ("fresh", "Fresh"),
    }
}

option_enum! {
    /// Optional flat-priced enhancement, charged per unit.
    AddOn, "add-on" {
        Lights => ("lights", "LED Micro-lights"),
        Ribbon => ("ribbon", "Premium ribbon"),
        Personalization => ("personalization", "Personalization tag"),
    }
}

/// Set of add-on flags, each independently on or off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AddOnSet {
    flags: [bool; AddOn::COUNT],
}

impl AddOnSet {
    /// A set with every flag off.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, add_on: AddOn) {
        self.flags[add_on.index()] = true;
    }

    pub fn remove(&mut self, add_on: AddOn) {
        self.flags[add_on.index()] = false;
    }

    /// Turn a flag on or off, as a checkbox does.
    pub fn set(&mut self, add_on: AddOn, on: bool) {
        self.flags[add_on.index()] = on;
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, add_on: AddOn) -> Self {
        self.insert(add_on);
        self
    }

    pub fn contains(&self, add_on: AddOn) -> bool {
        self.flags[add_on.index()]
    }

    /// Enabled add-ons in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = AddOn> + '_ {
        AddOn::ALL.iter().copied().filter(|a| self.contains(*a))
    }

    pub fn len(&self) -> usize {
        self.flags.iter().filter(|on| **on).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<AddOn> for AddOnSet {
    fn from_iter<I: IntoIterator<Item = AddOn>>(iter: I) -> Self {
        let mut set = Self::empty();
        for add_on in iter {
            set.insert(add_on);
        }
        set
    }
}

impl Serialize for AddOnSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AddOnSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let add_ons = Vec::<AddOn>::deserialize(deserializer)?;
        Ok(add_ons.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_keys() {
        assert_eq!("wreath".parse::<Category>().unwrap(), Category::Wreath);
        assert_eq!(" large ".parse::<Size>().unwrap(), Size::Large);
        assert_eq!("dried".parse::<Material>().unwrap(), Material::Dried);
        assert_eq!(
            "personalization".parse::<AddOn>().unwrap(),
            AddOn::Personalization
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = "holiday".parse::<Category>().unwrap_err();
        assert_eq!(
            err,
            EstimateError::InvalidSelection("unknown category 'holiday'".to_string())
        );

        assert!("Wreath".parse::<Category>().is_err());
        assert!("".parse::<Material>().is_err());
    }

    #[test]
    fn indexes_follow_declaration_order() {
        for (i, size) in Size::ALL.iter().enumerate() {
            assert_eq!(size.index(), i);
        }
        assert_eq!(Material::COUNT, 3);
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(Material::Faux.label(), "Faux/Silk");
        assert_eq!(AddOn::Lights.label(), "LED Micro-lights");
        assert_eq!(Category::Memorial.to_string(), "memorial");
    }

    #[test]
    fn add_on_set_toggles_flags() {
        let mut set = AddOnSet::empty();
        assert!(set.is_empty());

        set.set(AddOn::Ribbon, true);
        set.insert(AddOn::Lights);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![AddOn::Lights, AddOn::Ribbon]);

        set.set(AddOn::Ribbon, false);
        assert!(!set.contains(AddOn::Ribbon));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn add_on_set_serializes_as_key_list() {
        let set = AddOnSet::empty().with(AddOn::Personalization).with(AddOn::Lights);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["lights","personalization"]"#);

        let back: AddOnSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
