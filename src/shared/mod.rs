pub mod retry;
pub mod shutdown;
