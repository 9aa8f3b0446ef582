pub mod consts;
pub mod error;
pub mod sdk;
