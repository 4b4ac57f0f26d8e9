pub mod serve;
pub mod token;
