/// Re-export the Kubernetes resource types the watcher works with

pub use k8s_openapi::api::core::v1::{
    CSIPersistentVolumeSource,
    ObjectReference,
    PersistentVolume,
    PersistentVolumeSpec,
    PersistentVolumeStatus,
};

pub use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
