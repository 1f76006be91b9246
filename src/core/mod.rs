pub mod decision;
pub mod geo;
pub mod profile;
pub mod proximity;
pub mod window;
