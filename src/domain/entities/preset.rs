//! Named preset URLs with stable display order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named, reusable redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub url: String,
}

/// Ordered collection of presets, persisted as a JSON object.
///
/// Names are case-sensitive unique keys. Insertion order is preserved for
/// display purposes: updating a preset keeps its position, inserting a new
/// one appends. JSON serialization round-trips the order because the
/// collection serializes as a map in entry order and rebuilds from the map
/// in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetCollection {
    entries: Vec<Preset>,
}

impl PresetCollection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|p| p.name == name)
    }

    /// Looks up a preset URL by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.url.as_str())
    }

    /// Creates or overwrites a preset.
    ///
    /// Returns `true` when a new entry was appended, `false` when an
    /// existing entry was updated in place (keeping its position).
    pub fn upsert(&mut self, name: impl Into<String>, url: impl Into<String>) -> bool {
        let name = name.into();
        let url = url.into();

        match self.entries.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.url = url;
                false
            }
            None => {
                self.entries.push(Preset { name, url });
                true
            }
        }
    }

    /// Removes a preset by name. Returns `false` when the name is unknown.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|p| p.name != name);
        self.entries.len() != before
    }

    /// Renames a preset in place, keeping its display position.
    ///
    /// Returns `false` when `old` does not exist. The caller is responsible
    /// for rejecting a `new` name that already belongs to another preset.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|p| p.name == old) {
            Some(preset) => {
                preset.name = new.into();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.entries.iter()
    }
}

impl Serialize for PresetCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for preset in &self.entries {
            map.serialize_entry(&preset.name, &preset.url)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PresetCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = PresetCollection;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of preset names to URLs")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = PresetCollection::default();
                while let Some((name, url)) = access.next_entry::<String, String>()? {
                    // Duplicate keys in the document: last value wins,
                    // first position is kept.
                    collection.upsert(name, url);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}
