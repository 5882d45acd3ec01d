/// Maps kube-rs / k8s-openapi types → internal domain models
use crate::core::client::kube_resources::{PersistentVolume, Quantity};
use crate::domain::volume::snapshot::{ClaimRef, ResourceSnapshot, VolumePhase};

/// Converts a k8s-openapi PersistentVolume into a ResourceSnapshot
pub fn map_pv_to_snapshot(pv: &PersistentVolume) -> ResourceSnapshot {
    let metadata = &pv.metadata;
    let spec = pv.spec.as_ref();
    let csi = spec.and_then(|s| s.csi.as_ref());

    let capacity_bytes = spec
        .and_then(|s| s.capacity.as_ref())
        .and_then(|c| c.get("storage"))
        .and_then(quantity_to_bytes);

    let claim_ref = spec.and_then(|s| s.claim_ref.as_ref()).map(|r| ClaimRef {
        namespace: r.namespace.clone().unwrap_or_default(),
        name: r.name.clone().unwrap_or_default(),
    });

    ResourceSnapshot {
        name: metadata.name.clone().unwrap_or_default(),
        uid: metadata.uid.clone(),
        resource_version: metadata.resource_version.clone(),
        phase: VolumePhase::parse(pv.status.as_ref().and_then(|s| s.phase.as_deref())),
        capacity_bytes,
        attributes: csi
            .and_then(|c| c.volume_attributes.clone())
            .unwrap_or_default(),
        reclaim_policy: spec
            .and_then(|s| s.persistent_volume_reclaim_policy.clone())
            .unwrap_or_default(),
        storage_class: spec
            .and_then(|s| s.storage_class_name.clone())
            .unwrap_or_default(),
        claim_ref,
        driver: csi.map(|c| c.driver.clone()),
        volume_handle: csi.map(|c| c.volume_handle.clone()).unwrap_or_default(),
    }
}

/// Parses a Kubernetes quantity ("10Gi", "500M", "1.5e3", "100m") into
/// whole units, rounding fractions up like the API server does.
pub fn quantity_to_bytes(quantity: &Quantity) -> Option<i64> {
    parse_quantity(&quantity.0)
}

/// Parses a Kubernetes quantity into whole units using exact integer
/// arithmetic. Fractional results round up, as `Quantity.Value()` does.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    let s = raw.trim();

    // Number part: optional sign, digits and at most one dot
    let number_end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '+' || c == '-'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(number_end);

    let (negative, digits) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number.strip_prefix('+').unwrap_or(number)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut mantissa: i128 = 0;
    for c in whole.chars().chain(fraction.chars()) {
        let digit = c.to_digit(10)?;
        mantissa = mantissa.checked_mul(10)?.checked_add(i128::from(digit))?;
    }
    if negative {
        mantissa = -mantissa;
    }

    // (power of two, power of ten)
    let (binary_power, decimal_exponent): (u32, i32) = match suffix {
        "" => (0, 0),
        "Ki" => (10, 0),
        "Mi" => (20, 0),
        "Gi" => (30, 0),
        "Ti" => (40, 0),
        "Pi" => (50, 0),
        "Ei" => (60, 0),
        "n" => (0, -9),
        "u" => (0, -6),
        "m" => (0, -3),
        "k" => (0, 3),
        "M" => (0, 6),
        "G" => (0, 9),
        "T" => (0, 12),
        "P" => (0, 15),
        "E" => (0, 18),
        exp if exp.starts_with(['e', 'E']) => (0, exp[1..].parse().ok()?),
        _ => return None,
    };

    let scale = i32::try_from(fraction.len()).ok()?;
    let exponent = decimal_exponent.checked_sub(scale)?;

    let value = mantissa.checked_mul(1i128.checked_shl(binary_power)?)?;
    let value = if exponent >= 0 {
        value.checked_mul(10i128.checked_pow(exponent.unsigned_abs())?)?
    } else {
        // Round up only on a real remainder
        let divisor = 10i128.checked_pow(exponent.unsigned_abs())?;
        value / divisor + i128::from(value % divisor > 0)
    };

    i64::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::kube_resources::{
        CSIPersistentVolumeSource, ObjectMeta, ObjectReference, PersistentVolumeSpec,
        PersistentVolumeStatus,
    };
    use crate::domain::volume::volume_mapper::bytes_to_gib;
    use std::collections::BTreeMap;

    #[test]
    fn parses_binary_and_decimal_suffixes() {
        assert_eq!(parse_quantity("10Gi"), Some(10 * 1024 * 1024 * 1024));
        assert_eq!(parse_quantity("512Mi"), Some(512 * 1024 * 1024));
        assert_eq!(parse_quantity("5G"), Some(5_000_000_000));
        assert_eq!(parse_quantity("1500"), Some(1500));
        assert_eq!(parse_quantity("1e3"), Some(1000));
        assert_eq!(parse_quantity("1.5Gi"), Some(1_610_612_736));
    }

    #[test]
    fn fractional_values_round_up() {
        assert_eq!(parse_quantity("100m"), Some(1));
        assert_eq!(parse_quantity("0.5"), Some(1));
    }

    #[test]
    fn decimal_values_just_below_a_gib_boundary_stay_exact() {
        // 16 GiB - 1 byte written with a decimal suffix
        let bytes = parse_quantity("17.179869183G");
        assert_eq!(bytes, Some(17_179_869_183));
        assert_eq!(bytes.map(bytes_to_gib), Some(15));
        assert_eq!(parse_quantity("17179869184"), Some(16 * 1024 * 1024 * 1024));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("Gi"), None);
        assert_eq!(parse_quantity("10Xi"), None);
        assert_eq!(parse_quantity("1.2.3"), None);
        assert_eq!(parse_quantity("."), None);
    }

    #[test]
    fn maps_csi_persistent_volume() {
        let mut attributes = BTreeMap::new();
        attributes.insert("iops".to_string(), "3000".to_string());
        attributes.insert("clusterID".to_string(), "c1".to_string());

        let mut capacity = BTreeMap::new();
        capacity.insert("storage".to_string(), Quantity("10Gi".to_string()));

        let pv = PersistentVolume {
            metadata: ObjectMeta {
                name: Some("pvc-abc".to_string()),
                uid: Some("uid-1".to_string()),
                ..Default::default()
            },
            spec: Some(PersistentVolumeSpec {
                capacity: Some(capacity),
                csi: Some(CSIPersistentVolumeSource {
                    driver: "vpc.block.csi.ibm.io".to_string(),
                    volume_handle: "r006-1234".to_string(),
                    volume_attributes: Some(attributes),
                    ..Default::default()
                }),
                claim_ref: Some(ObjectReference {
                    namespace: Some("apps".to_string()),
                    name: Some("data".to_string()),
                    ..Default::default()
                }),
                persistent_volume_reclaim_policy: Some("Delete".to_string()),
                storage_class_name: Some("gold".to_string()),
                ..Default::default()
            }),
            status: Some(PersistentVolumeStatus {
                phase: Some("Bound".to_string()),
                ..Default::default()
            }),
        };

        let snapshot = map_pv_to_snapshot(&pv);
        assert_eq!(snapshot.name, "pvc-abc");
        assert_eq!(snapshot.phase, VolumePhase::Bound);
        assert_eq!(snapshot.capacity_bytes, Some(10 * 1024 * 1024 * 1024));
        assert_eq!(snapshot.iops(), Some("3000"));
        assert_eq!(snapshot.driver.as_deref(), Some("vpc.block.csi.ibm.io"));
        assert_eq!(snapshot.volume_handle, "r006-1234");
        assert_eq!(
            snapshot.claim_ref,
            Some(ClaimRef {
                namespace: "apps".to_string(),
                name: "data".to_string()
            })
        );
    }

    #[test]
    fn non_csi_volume_has_no_driver() {
        let pv = PersistentVolume {
            metadata: ObjectMeta {
                name: Some("nfs-1".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let snapshot = map_pv_to_snapshot(&pv);
        assert!(snapshot.driver.is_none());
        assert_eq!(snapshot.phase, VolumePhase::Unknown);
        assert!(snapshot.capacity_bytes.is_none());
    }
}
