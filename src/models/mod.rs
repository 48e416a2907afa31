pub mod appointment;
pub mod contact;
pub mod core;
pub mod enrollment;
pub mod message;
pub mod opportunity;
