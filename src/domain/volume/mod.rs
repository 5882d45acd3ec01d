pub mod change_detector;
pub mod descriptor;
pub mod resource_filter;
pub mod snapshot;
pub mod tag_builder;
pub mod volume_mapper;
pub mod volume_type_registry;
