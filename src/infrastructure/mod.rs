//! Infrastructure layer: persistence behind the domain repository traits

pub mod database;
