pub mod backend;
pub mod coordinator;
pub mod http;
pub mod normalize;

pub use backend::BackendClient;
pub use coordinator::{AuditBundle, AuditSession, GroupState, RequestGroup};
