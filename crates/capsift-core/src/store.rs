use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::Result;

/// Persistence collaborator holding finished listings, keyed by a stable
/// video identifier. A populated entry short-circuits the whole pipeline.
pub trait ListingStore {
    fn get(&self, video_id: &str) -> Result<Option<String>>;
    fn put(&self, video_id: &str, listing: &str) -> Result<()>;
}

/// One text file per video id under a cache directory.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> DirStore {
        DirStore { dir: dir.into() }
    }

    fn entry_path(&self, video_id: &str) -> PathBuf {
        self.dir.join(format!("{}.md", sanitize_id(video_id)))
    }
}

impl ListingStore for DirStore {
    fn get(&self, video_id: &str) -> Result<Option<String>> {
        let path = self.entry_path(video_id);
        if !path.exists() {
            debug!(video_id, "listing cache miss");
            return Ok(None);
        }
        let listing = std::fs::read_to_string(&path)?;
        info!(video_id, path = ?path, "listing cache hit");
        Ok(Some(listing))
    }

    fn put(&self, video_id: &str, listing: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(video_id);
        std::fs::write(&path, listing)?;
        info!(video_id, path = ?path, bytes = listing.len(), "listing cached");
        Ok(())
    }
}

/// Video ids come from external services; keep only characters that are
/// safe in a file name.
fn sanitize_id(video_id: &str) -> String {
    video_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());

        assert!(store.get("abc123").unwrap().is_none());
        store.put("abc123", "listing body").unwrap();
        assert_eq!(store.get("abc123").unwrap().as_deref(), Some("listing body"));
    }

    #[test]
    fn hostile_ids_map_to_safe_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());

        store.put("../../etc/passwd", "x").unwrap();
        assert_eq!(store.get("../../etc/passwd").unwrap().as_deref(), Some("x"));
        assert!(dir.path().join("______etc_passwd.md").exists());
    }

    #[test]
    fn distinct_ids_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path());

        store.put("video-a", "A").unwrap();
        store.put("video-b", "B").unwrap();
        assert_eq!(store.get("video-a").unwrap().as_deref(), Some("A"));
        assert_eq!(store.get("video-b").unwrap().as_deref(), Some("B"));
    }
}
