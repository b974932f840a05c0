//! Sprite manifest and preload tracking
//!
//! The host loads every image up front and may only start a run once all of
//! them are available. Decoding and drawing belong to the host.

use std::fmt;

/// What a sprite is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Background,
    Rocket,
    Projectile,
    Explosion,
    CountdownBanner,
    /// Plain asteroid sprite, by variant
    Asteroid(u8),
    /// Cluster sprite, by variant
    Cluster(u8),
}

/// Load status of one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub kind: AssetKind,
    pub path: String,
}

/// Error raised while preloading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The host could not load this file
    Missing { path: String },
    /// A load callback named a file that is not in the manifest
    Unknown { path: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "failed to load asset '{}'", path),
            Self::Unknown { path } => write!(f, "'{}' is not a known asset", path),
        }
    }
}

impl std::error::Error for AssetError {}

/// Every sprite the game draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    pub entries: Vec<AssetEntry>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let entries = [
            (AssetKind::Background, "assets/gbg.png"),
            (AssetKind::Rocket, "assets/rocket.png"),
            (AssetKind::Projectile, "assets/projectile.png"),
            (AssetKind::Explosion, "assets/exploded.png"),
            (AssetKind::CountdownBanner, "assets/bo.png"),
            (AssetKind::Asteroid(0), "assets/ast1.png"),
            (AssetKind::Asteroid(1), "assets/ast2.png"),
            (AssetKind::Cluster(0), "assets/c1.png"),
            (AssetKind::Cluster(1), "assets/c2.png"),
        ]
        .into_iter()
        .map(|(kind, path)| AssetEntry {
            kind,
            path: path.to_string(),
        })
        .collect();
        Self { entries }
    }
}

impl AssetManifest {
    pub fn path_of(&self, kind: AssetKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.path.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}

/// Tracks load callbacks for a manifest
#[derive(Debug, Clone)]
pub struct Preloader {
    manifest: AssetManifest,
    status: Vec<LoadStatus>,
}

impl Preloader {
    pub fn new(manifest: AssetManifest) -> Self {
        let status = vec![LoadStatus::Pending; manifest.entries.len()];
        Self { manifest, status }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    fn index_of(&self, path: &str) -> Result<usize, AssetError> {
        self.manifest
            .entries
            .iter()
            .position(|e| e.path == path)
            .ok_or_else(|| AssetError::Unknown {
                path: path.to_string(),
            })
    }

    pub fn mark_loaded(&mut self, path: &str) -> Result<(), AssetError> {
        let i = self.index_of(path)?;
        self.status[i] = LoadStatus::Loaded;
        log::debug!("Loaded {}", path);
        Ok(())
    }

    pub fn mark_failed(&mut self, path: &str) -> Result<(), AssetError> {
        let i = self.index_of(path)?;
        self.status[i] = LoadStatus::Failed;
        log::warn!("Failed to load {}", path);
        Ok(())
    }

    pub fn status(&self, path: &str) -> Option<LoadStatus> {
        self.index_of(path).ok().map(|i| self.status[i])
    }

    /// Fraction of assets loaded, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.status.is_empty() {
            return 1.0;
        }
        let loaded = self
            .status
            .iter()
            .filter(|s| **s == LoadStatus::Loaded)
            .count();
        loaded as f32 / self.status.len() as f32
    }

    /// `Ok(true)` once everything loaded, `Ok(false)` while waiting, or the
    /// first failure in manifest order
    pub fn ready(&self) -> Result<bool, AssetError> {
        if let Some(i) = self.status.iter().position(|s| *s == LoadStatus::Failed) {
            return Err(AssetError::Missing {
                path: self.manifest.entries[i].path.clone(),
            });
        }
        Ok(self.status.iter().all(|s| *s == LoadStatus::Loaded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HAZARD_VARIANTS;

    #[test]
    fn test_manifest_covers_all_variants() {
        let manifest = AssetManifest::default();
        for v in 0..HAZARD_VARIANTS {
            assert!(manifest.path_of(AssetKind::Asteroid(v)).is_some());
            assert!(manifest.path_of(AssetKind::Cluster(v)).is_some());
        }
        assert_eq!(manifest.path_of(AssetKind::Rocket), Some("assets/rocket.png"));
    }

    #[test]
    fn test_ready_after_all_loaded() {
        let mut preloader = Preloader::new(AssetManifest::default());
        assert_eq!(preloader.ready(), Ok(false));
        assert_eq!(preloader.progress(), 0.0);

        let paths: Vec<String> = preloader.manifest().paths().map(String::from).collect();
        for path in &paths {
            preloader.mark_loaded(path).unwrap();
        }
        assert_eq!(preloader.ready(), Ok(true));
        assert_eq!(preloader.progress(), 1.0);
    }

    #[test]
    fn test_failure_blocks_start() {
        let mut preloader = Preloader::new(AssetManifest::default());
        preloader.mark_loaded("assets/gbg.png").unwrap();
        preloader.mark_failed("assets/c2.png").unwrap();

        let err = preloader.ready().unwrap_err();
        assert_eq!(
            err,
            AssetError::Missing {
                path: "assets/c2.png".to_string()
            }
        );
        assert_eq!(err.to_string(), "failed to load asset 'assets/c2.png'");
        assert_eq!(preloader.status("assets/c2.png"), Some(LoadStatus::Failed));
    }

    #[test]
    fn test_unknown_path() {
        let mut preloader = Preloader::new(AssetManifest::default());
        assert!(matches!(
            preloader.mark_loaded("assets/nope.png"),
            Err(AssetError::Unknown { .. })
        ));
    }
}
