pub mod resource_api;
