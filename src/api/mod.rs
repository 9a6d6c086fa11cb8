pub mod error;
pub mod handlers;
pub mod server;

use std::sync::Arc;

use crate::proxy::BlockchairProxy;

/// Router state: one proxy shared read-only by every request
pub type SharedProxy = Arc<BlockchairProxy>;
