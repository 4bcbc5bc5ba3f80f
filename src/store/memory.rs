//! In-memory key-value backend
//!
//! Mirrors the etcd v2 key model: directories exist implicitly while a key
//! below them holds a value.

use super::error::{NODE_EXIST, NOT_A_DIR, NOT_A_FILE};
use super::{KeyValueStore, Node, Result, SetOptions, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of leaves currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(key: &str) -> String {
    let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

fn dir_prefix(key: &str) -> String {
    if key == "/" {
        key.to_string()
    } else {
        format!("{key}/")
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Unavailable(format!("lock poisoned: {e}"))
}

fn children(entries: &BTreeMap<String, String>, key: &str, recursive: bool) -> Vec<Node> {
    let base = dir_prefix(key);
    let mut seen_dirs = BTreeSet::new();
    let mut nodes = Vec::new();

    for (k, v) in entries
        .range(base.clone()..)
        .take_while(|(k, _)| k.starts_with(&base))
    {
        match k[base.len()..].split_once('/') {
            None => nodes.push(Node {
                key: k.clone(),
                value: Some(v.clone()),
                ..Node::default()
            }),
            Some((child, _)) => {
                let child_key = format!("{base}{child}");
                if seen_dirs.insert(child_key.clone()) {
                    let grandchildren = if recursive {
                        children(entries, &child_key, true)
                    } else {
                        Vec::new()
                    };
                    nodes.push(Node {
                        key: child_key,
                        dir: true,
                        nodes: grandchildren,
                        value: None,
                    });
                }
            }
        }
    }

    nodes
}

fn has_children(entries: &BTreeMap<String, String>, key: &str) -> bool {
    let base = dir_prefix(key);
    entries
        .range(base.clone()..)
        .next()
        .is_some_and(|(k, _)| k.starts_with(&base))
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str, recursive: bool) -> Result<Node> {
        let key = normalize(key);
        let entries = self.entries.read().map_err(poisoned)?;

        if let Some(value) = entries.get(&key) {
            return Ok(Node {
                key,
                value: Some(value.clone()),
                ..Node::default()
            });
        }

        let nodes = children(&entries, &key, recursive);
        if nodes.is_empty() && key != "/" {
            return Err(StoreError::KeyNotFound(key));
        }
        Ok(Node {
            key,
            dir: true,
            nodes,
            value: None,
        })
    }

    async fn set(&self, key: &str, value: &str, options: SetOptions) -> Result<Node> {
        let key = normalize(key);
        let mut entries = self.entries.write().map_err(poisoned)?;

        if key == "/" || has_children(&entries, &key) {
            return Err(StoreError::from_code(
                NOT_A_FILE,
                "Not a file".to_string(),
                key,
            ));
        }

        let mut ancestor = key.as_str();
        while let Some((parent, _)) = ancestor.rsplit_once('/') {
            if parent.is_empty() {
                break;
            }
            if entries.contains_key(parent) {
                return Err(StoreError::from_code(
                    NOT_A_DIR,
                    "Not a directory".to_string(),
                    parent.to_string(),
                ));
            }
            ancestor = parent;
        }

        let exists = entries.contains_key(&key);
        match options.prev_exist {
            Some(false) if exists => {
                return Err(StoreError::from_code(
                    NODE_EXIST,
                    "Key already exists".to_string(),
                    key,
                ));
            }
            Some(true) if !exists => return Err(StoreError::KeyNotFound(key)),
            _ => {}
        }

        entries.insert(key.clone(), value.to_string());
        Ok(Node {
            key,
            value: Some(value.to_string()),
            ..Node::default()
        })
    }

    async fn delete(&self, key: &str, recursive: bool) -> Result<()> {
        let key = normalize(key);
        let mut entries = self.entries.write().map_err(poisoned)?;

        if entries.remove(&key).is_some() {
            return Ok(());
        }
        if !has_children(&entries, &key) {
            return Err(StoreError::KeyNotFound(key));
        }
        if !recursive {
            return Err(StoreError::from_code(
                NOT_A_FILE,
                "Not a file".to_string(),
                key,
            ));
        }

        let base = dir_prefix(&key);
        entries.retain(|k, _| !k.starts_with(&base));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tokio_test::block_on;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        block_on(async {
            for (key, value) in [
                ("/skydns/com/example/www/a1", "one"),
                ("/skydns/com/example/www/b2", "two"),
                ("/skydns/com/example/api/c3", "three"),
                ("/skydns/com/example/api/v1/d4", "four"),
            ] {
                store.set(key, value, SetOptions::default()).await.unwrap();
            }
        });
        store
    }

    #[test]
    fn test_get_leaf_and_missing() {
        let store = seeded();
        let node = block_on(store.get("/skydns/com/example/www/a1", false)).unwrap();
        assert_eq!(node.value.as_deref(), Some("one"));
        assert!(!node.dir);

        let err = block_on(store.get("/skydns/com/example/mail", true)).unwrap_err();
        assert_matches!(err, StoreError::KeyNotFound(ref key) if key == "/skydns/com/example/mail");
    }

    #[test]
    fn test_get_directory() {
        let store = seeded();

        let shallow = block_on(store.get("/skydns/com/example", false)).unwrap();
        assert!(shallow.dir);
        let keys: Vec<&str> = shallow.nodes.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["/skydns/com/example/api", "/skydns/com/example/www"]);
        assert!(shallow.nodes.iter().all(|n| n.dir && n.nodes.is_empty()));

        let deep = block_on(store.get("/skydns/com/example/api/", true)).unwrap();
        assert_eq!(deep.key, "/skydns/com/example/api");
        assert_eq!(deep.leaves().count(), 1);
        let nested = deep.nodes.iter().find(|n| n.dir).unwrap();
        assert_eq!(nested.nodes[0].value.as_deref(), Some("four"));
    }

    #[test]
    fn test_set_create_only() {
        let store = seeded();
        let err = block_on(store.set(
            "/skydns/com/example/www/a1",
            "again",
            SetOptions::create_only(),
        ))
        .unwrap_err();
        assert_matches!(err, StoreError::NodeExist(_));

        block_on(store.set("/skydns/com/example/www/a1", "again", SetOptions::default())).unwrap();
        let node = block_on(store.get("/skydns/com/example/www/a1", false)).unwrap();
        assert_eq!(node.value.as_deref(), Some("again"));
    }

    #[test]
    fn test_set_rejects_files_and_dirs() {
        let store = seeded();
        let err =
            block_on(store.set("/skydns/com/example", "x", SetOptions::default())).unwrap_err();
        assert_matches!(err, StoreError::Api { code: 102, .. });

        let err = block_on(store.set(
            "/skydns/com/example/www/a1/nested",
            "x",
            SetOptions::default(),
        ))
        .unwrap_err();
        assert_matches!(err, StoreError::Api { code: 104, .. });
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = seeded();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.entries.write().unwrap();
            panic!("writer panicked");
        }));
        assert!(result.is_err());

        assert_matches!(store.len(), Err(StoreError::Unavailable(_)));
        assert_matches!(store.is_empty(), Err(StoreError::Unavailable(_)));
        assert_matches!(
            block_on(store.get("/skydns/com/example/www/a1", false)),
            Err(StoreError::Unavailable(_))
        );
    }

    #[test]
    fn test_delete() {
        let store = seeded();
        let err = block_on(store.delete("/skydns/com/example/api", false)).unwrap_err();
        assert_matches!(err, StoreError::Api { code: 102, .. });

        block_on(store.delete("/skydns/com/example/api", true)).unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert_matches!(
            block_on(store.get("/skydns/com/example/api", true)),
            Err(StoreError::KeyNotFound(_))
        );

        block_on(store.delete("/skydns/com/example/www/a1", false)).unwrap();
        assert_matches!(
            block_on(store.delete("/skydns/com/example/www/a1", false)),
            Err(StoreError::KeyNotFound(_))
        );
    }
}
