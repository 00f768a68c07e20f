//! Duskhold - Real-time combat and actor lifecycle engine

pub mod actor;
pub mod affect;
pub mod combat;
pub mod core;
pub mod equip;
pub mod world;
