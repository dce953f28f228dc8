pub mod doctor;
pub mod exec;
pub mod install;
pub mod validate;
