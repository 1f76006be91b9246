pub mod dispatcher;
pub mod smtp;
