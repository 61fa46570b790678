pub mod gateway;
pub mod posts;

pub use gateway::Gateway;
