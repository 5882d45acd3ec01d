// Kube-rs based Kubernetes client
pub mod kube_client;
pub mod kube_resources;
pub mod watchers;
pub mod mappers;
pub mod events;
