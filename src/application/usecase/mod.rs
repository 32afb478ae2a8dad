// src/application/usecase/mod.rs
pub mod admin_usecase;
pub mod checkout_usecase;
pub mod inventory_usecase;

// Re-export public API
pub use admin_usecase::{AdminManager, AdminUseCase};
pub use checkout_usecase::{CheckoutManager, CheckoutUseCase};
pub use inventory_usecase::{InventoryManager, InventoryUseCase};
