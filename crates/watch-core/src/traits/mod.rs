//! Repository traits (ports) - define the interface for data access

mod repositories;

pub use repositories::{
    AccountPatch, DomainRepository, DueDomain, LedgerRepository, RepoResult, SettleOutcome,
    UserRepository,
};
