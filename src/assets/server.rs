use std::path::{Path, PathBuf};
use std::sync::Arc;

use slotmap::new_key_type;
use uuid::Uuid;

use crate::animation::clip::AnimationClip;
use crate::assets::codec::{decode_clip, decode_mesh, encode_clip, encode_mesh};
use crate::assets::io::{read_file, write_file};
use crate::assets::storage::AssetStorage;
use crate::errors::{Error, Result};
use crate::resources::mesh::MeshData;
use crate::settings::AnimationSettings;

// Strongly-typed handles
new_key_type! {
    pub struct ClipHandle;
    pub struct MeshDataHandle;
}

/// Process-lifetime registry for clips and mesh geometry, plus their
/// persisted files.
#[derive(Clone)]
pub struct AssetServer {
    pub clips: Arc<AssetStorage<ClipHandle, AnimationClip>>,
    pub meshes: Arc<AssetStorage<MeshDataHandle, MeshData>>,
    clip_extension: String,
    mesh_extension: String,
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}

/// `<dir>/<uuid>.<extension>`
fn asset_path(dir: &Path, uuid: Uuid, extension: &str) -> PathBuf {
    dir.join(format!("{uuid}.{extension}"))
}

/// Recovers the id a file was saved under, or mints a new one.
fn uuid_from_path(path: &Path) -> Uuid {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(&AnimationSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: &AnimationSettings) -> Self {
        Self {
            clips: Arc::new(AssetStorage::new()),
            meshes: Arc::new(AssetStorage::new()),
            clip_extension: settings.clip_extension.clone(),
            mesh_extension: settings.mesh_extension.clone(),
        }
    }

    // ========================================================================
    // Clips
    // ========================================================================

    /// Publishes a fully built clip.
    pub fn add_clip(&self, clip: AnimationClip) -> ClipHandle {
        self.clips.add(clip)
    }

    #[must_use]
    pub fn clip(&self, handle: ClipHandle) -> Option<Arc<AnimationClip>> {
        self.clips.get(handle)
    }

    /// Writes a registered clip to `<dir>/<uuid>.<clip extension>` and
    /// records the path.
    pub fn save_clip(&self, handle: ClipHandle, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let clip = self
            .clips
            .get(handle)
            .ok_or_else(|| Error::AssetNotFound(format!("clip {handle:?}")))?;
        let uuid = self
            .clips
            .uuid_of(handle)
            .ok_or_else(|| Error::AssetNotFound(format!("clip id {handle:?}")))?;

        let path = asset_path(dir.as_ref(), uuid, &self.clip_extension);
        write_file(&path, &encode_clip(&clip))?;
        self.clips.set_path(handle, &path);

        log::info!("Saved animation '{}' to [{}]", clip.name, path.display());
        Ok(path)
    }

    /// Encodes and writes `clip` under a fresh id, then registers it.
    /// Nothing is registered if the write fails.
    pub fn persist_clip(&self, clip: AnimationClip, dir: impl AsRef<Path>) -> Result<ClipHandle> {
        let uuid = Uuid::new_v4();
        let path = asset_path(dir.as_ref(), uuid, &self.clip_extension);

        if let Err(e) = write_file(&path, &encode_clip(&clip)) {
            log::error!("Error saving animation '{}' in path: [{}]", clip.name, path.display());
            return Err(e);
        }
        log::info!("Saved animation '{}' correctly in path: [{}]", clip.name, path.display());

        let handle = self.clips.add_with_uuid(uuid, clip);
        self.clips.set_path(handle, path);
        Ok(handle)
    }

    /// Reads and decodes a clip file. Loading a file that is already
    /// registered returns the existing handle.
    pub fn load_clip(&self, path: impl AsRef<Path>) -> Result<ClipHandle> {
        let path = path.as_ref();
        if let Some(handle) = self.clips.find_by_path(path) {
            return Ok(handle);
        }

        let bytes = read_file(path).inspect_err(|e| log::error!("Unable to open clip file: {e}"))?;
        let clip = decode_clip(&bytes).inspect_err(|e| log::error!("Corrupt clip file [{}]: {e}", path.display()))?;

        let handle = self.clips.add_with_uuid(uuid_from_path(path), clip);
        self.clips.set_path(handle, path);
        Ok(handle)
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    pub fn add_mesh(&self, mesh: MeshData) -> MeshDataHandle {
        self.meshes.add(mesh)
    }

    #[must_use]
    pub fn mesh(&self, handle: MeshDataHandle) -> Option<Arc<MeshData>> {
        self.meshes.get(handle)
    }

    /// Writes registered geometry to `<dir>/<uuid>.<mesh extension>`.
    pub fn save_mesh(&self, handle: MeshDataHandle, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let mesh = self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::AssetNotFound(format!("mesh {handle:?}")))?;
        let uuid = self
            .meshes
            .uuid_of(handle)
            .ok_or_else(|| Error::AssetNotFound(format!("mesh id {handle:?}")))?;

        let path = asset_path(dir.as_ref(), uuid, &self.mesh_extension);
        write_file(&path, &encode_mesh(&mesh))?;
        self.meshes.set_path(handle, &path);
        Ok(path)
    }

    pub fn load_mesh(&self, path: impl AsRef<Path>) -> Result<MeshDataHandle> {
        let path = path.as_ref();
        if let Some(handle) = self.meshes.find_by_path(path) {
            return Ok(handle);
        }

        let bytes = read_file(path).inspect_err(|e| log::error!("Unable to open mesh file: {e}"))?;
        let mesh = decode_mesh(&bytes)?;

        let handle = self.meshes.add_with_uuid(uuid_from_path(path), mesh);
        self.meshes.set_path(handle, path);
        Ok(handle)
    }
}
