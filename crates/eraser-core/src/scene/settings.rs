//! Per-node mesh settings

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::MeshAttribute;

/// Boolean mesh settings of a node, tracking which ones the user changed
///
/// Values set through [`MeshSettings::set_default`] are not user overrides and
/// do not show up in [`MeshSettings::user_overrides`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSettings {
    values: BTreeMap<MeshAttribute, bool>,
    user_modified: BTreeSet<MeshAttribute>,
}

impl MeshSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value (`false` when unset)
    pub fn get(&self, attribute: MeshAttribute) -> bool {
        self.values.get(&attribute).copied().unwrap_or(false)
    }

    /// Set a value as a user edit
    pub fn set(&mut self, attribute: MeshAttribute, value: bool) {
        self.values.insert(attribute, value);
        self.user_modified.insert(attribute);
    }

    /// Set a value without recording it as a user edit
    pub fn set_default(&mut self, attribute: MeshAttribute, value: bool) {
        self.values.insert(attribute, value);
        self.user_modified.remove(&attribute);
    }

    /// Attributes the user has explicitly overridden
    pub fn user_overrides(&self) -> impl Iterator<Item = MeshAttribute> + '_ {
        self.user_modified.iter().copied()
    }

    /// Whether the node is a blocker
    pub fn is_blocker(&self) -> bool {
        self.get(MeshAttribute::AntiOverhangMesh)
    }

    /// Whether the node is a support, infill or cutting mesh
    pub fn is_special(&self) -> bool {
        MeshAttribute::SPECIAL.iter().any(|a| self.get(*a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value_is_not_an_override() {
        let mut settings = MeshSettings::new();
        settings.set_default(MeshAttribute::AntiOverhangMesh, true);
        assert!(settings.is_blocker());
        assert!(!settings.is_special());
        assert_eq!(settings.user_overrides().count(), 0);
    }

    #[test]
    fn test_user_value_is_an_override() {
        let mut settings = MeshSettings::new();
        settings.set(MeshAttribute::SupportMesh, true);
        assert!(settings.is_special());
        assert!(!settings.is_blocker());
        assert_eq!(
            settings.user_overrides().collect::<Vec<_>>(),
            vec![MeshAttribute::SupportMesh]
        );

        settings.set_default(MeshAttribute::SupportMesh, false);
        assert!(!settings.is_special());
        assert_eq!(settings.user_overrides().count(), 0);
    }
}
