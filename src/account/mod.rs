//! Account capability and registry
//!
//! The pipeline never manipulates balances directly; it calls through the
//! [`AccountService`] capability, whose every call can fail with a
//! communication error. This module provides:
//! - `service` - the capability trait
//! - `servant` - the in-process [`BankAccount`] implementation
//! - `registry` - the explicitly constructed account lookup table

pub mod registry;
pub mod servant;
pub mod service;

pub use registry::AccountRegistry;
pub use servant::BankAccount;
pub use service::AccountService;
