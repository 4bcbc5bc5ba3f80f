//! Hierarchical key-value backends.
//!
//! - `EtcdClient` - etcd v2 keys API over HTTP
//! - `MemoryStore` - in-process store with the same semantics, for tests and local use

pub mod error;
mod etcd;
mod memory;

pub use error::StoreError;
pub use etcd::EtcdClient;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::Deserialize;

pub type Result<T> = std::result::Result<T, StoreError>;

/// A node of the key tree. Leaves carry a value, directories carry children.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub dir: bool,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Node {
    /// Neither a value nor children.
    pub fn is_empty(&self) -> bool {
        self.value.as_deref().is_none_or(str::is_empty) && self.nodes.is_empty()
    }

    /// Direct children that hold a value.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| !n.dir)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// `Some(false)` makes the write fail with `NodeExist` if the key is present.
    pub prev_exist: Option<bool>,
}

impl SetOptions {
    pub fn create_only() -> Self {
        SetOptions {
            prev_exist: Some(false),
        }
    }
}

/// Keys passed to a store are absolute paths (`/skydns/com/example`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fails with `StoreError::KeyNotFound` when nothing exists at `key`.
    async fn get(&self, key: &str, recursive: bool) -> Result<Node>;
    async fn set(&self, key: &str, value: &str, options: SetOptions) -> Result<Node>;
    async fn delete(&self, key: &str, recursive: bool) -> Result<()>;
}
