pub mod appointments;
pub mod contacts;
pub mod enrollment;
pub mod manifest;
pub mod messages;
pub mod opportunities;
pub mod payload_generator;
