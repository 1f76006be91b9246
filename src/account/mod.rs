pub mod bootstrap;
pub mod capture;
