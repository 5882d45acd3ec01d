use std::collections::HashMap;

/// Provisioner name → volume type.
///
/// Filled once when the watcher is built and only read afterwards, so it is
/// shared between tasks behind a plain `Arc` without any lock.
#[derive(Debug, Clone, Default)]
pub struct VolumeTypeRegistry {
    types: HashMap<String, String>,
}

impl VolumeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(provisioner: impl Into<String>, volume_type: impl Into<String>) -> Self {
        let mut registry = Self::new();
        registry.register(provisioner, volume_type);
        registry
    }

    pub fn register(&mut self, provisioner: impl Into<String>, volume_type: impl Into<String>) {
        self.types.insert(provisioner.into(), volume_type.into());
    }

    /// Unknown provisioners resolve to an empty type.
    pub fn volume_type_for(&self, provisioner: Option<&str>) -> &str {
        provisioner
            .and_then(|p| self.types.get(p))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separate_registries_do_not_share_entries() {
        let first = VolumeTypeRegistry::with_entry("block.csi", "vpc-block");
        let second = VolumeTypeRegistry::with_entry("file.csi", "vpc-file");

        assert_eq!(first.volume_type_for(Some("block.csi")), "vpc-block");
        assert_eq!(first.volume_type_for(Some("file.csi")), "");
        assert_eq!(second.volume_type_for(Some("block.csi")), "");
        assert_eq!(second.volume_type_for(None), "");
    }
}
