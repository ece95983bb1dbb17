use std::path::{Path, PathBuf};

use glam::Affine3A;

use crate::animation::player::AnimationPlayer;
use crate::assets::loaders::animation::{build_clip, import_animation};
use crate::assets::loaders::session::{BoneSource, ImportSession};
use crate::assets::loaders::source::{ExternalMesh, ExternalScene};
use crate::assets::server::{AssetServer, ClipHandle, MeshDataHandle};
use crate::errors::{Error, Result};
use crate::resources::bone::Bone;
use crate::resources::mesh::{Mesh, MeshData};
use crate::scene::node::Node;
use crate::scene::{NodeHandle, Scene};
use crate::settings::AnimationSettings;

/// What one import produced.
#[derive(Debug, Clone)]
pub struct ImportedScene {
    pub root: NodeHandle,
    pub clips: Vec<ClipHandle>,
    pub meshes: Vec<MeshDataHandle>,
    /// Nodes that received a [`Bone`] component.
    pub bone_nodes: Vec<NodeHandle>,
}

fn flatten_mesh(source: &ExternalMesh) -> MeshData {
    MeshData {
        indices: source.faces.iter().flatten().copied().collect(),
        vertices: source.vertices.iter().flat_map(|v| v.to_array()).collect(),
        uvs: source.uvs.iter().flat_map(|uv| uv.to_array()).collect(),
        normals: source.normals.iter().flat_map(|n| n.to_array()).collect(),
    }
}

/// Turns an [`ExternalScene`] into scene nodes, registered meshes, bone
/// components and player clips.
pub struct SceneImporter<'a> {
    assets: &'a AssetServer,
    scene: &'a mut Scene,
    settings: AnimationSettings,
    output_dir: Option<PathBuf>,
    session: ImportSession,
}

impl<'a> SceneImporter<'a> {
    /// Entry point.
    ///
    /// The imported tree hangs under `parent`, or becomes a new root when
    /// `parent` is `None`. With an `output_dir`, clips and meshes are also
    /// written there. Animations that fail to import are logged and skipped.
    /// Clips are appended to `player`; see [`SceneImporter::reimport`] to
    /// replace an earlier import.
    pub fn import(
        source: &ExternalScene,
        assets: &'a AssetServer,
        scene: &'a mut Scene,
        player: &mut AnimationPlayer,
        parent: Option<NodeHandle>,
        output_dir: Option<&Path>,
    ) -> Result<ImportedScene> {
        if source.nodes.is_empty() {
            return Err(Error::ImportEmpty {
                name: "scene".to_string(),
            });
        }

        let mut importer = SceneImporter {
            assets,
            scene,
            settings: player.settings().clone(),
            output_dir: output_dir.map(Path::to_path_buf),
            session: ImportSession::new(),
        };

        log::info!(
            "Start importing scene: {} nodes, {} meshes, {} animations",
            source.nodes.len(),
            source.meshes.len(),
            source.animations.len()
        );

        let root = importer.import_nodes(source, parent)?;
        let bone_nodes = importer.attach_bones(source);
        importer.import_animations(source, player, root);

        let mut meshes: Vec<MeshDataHandle> = importer.session.meshes.values().copied().collect();
        meshes.sort_unstable();

        Ok(ImportedScene {
            root,
            clips: std::mem::take(&mut importer.session.clips),
            meshes,
            bone_nodes,
        })
    }

    /// Replaces an earlier import of the same source.
    ///
    /// Removes the subtree rooted at `previous.root` and releases every clip
    /// on `player`, then imports again under the old root's parent.
    pub fn reimport(
        source: &ExternalScene,
        assets: &'a AssetServer,
        scene: &'a mut Scene,
        player: &mut AnimationPlayer,
        previous: &ImportedScene,
        output_dir: Option<&Path>,
    ) -> Result<ImportedScene> {
        let parent = scene.get_node(previous.root).and_then(Node::parent);
        scene.remove_node(previous.root);
        player.clear();
        log::debug!("Released previous import, re-importing");

        Self::import(source, assets, scene, player, parent, output_dir)
    }

    /// Creates one scene node per external node, parents first.
    fn import_nodes(&mut self, source: &ExternalScene, parent: Option<NodeHandle>) -> Result<NodeHandle> {
        let mut root = None;
        let mut stack: Vec<(usize, Option<NodeHandle>)> = vec![(0, parent)];

        while let Some((index, parent)) = stack.pop() {
            let Some(ext) = source.nodes.get(index) else {
                log::warn!("Node index {index} out of range, skipped");
                continue;
            };
            if self.session.nodes.contains_key(&index) {
                log::warn!("Node '{}' referenced twice, skipped", ext.name);
                continue;
            }

            let name = if ext.name.is_empty() { "Unnamed" } else { ext.name.as_str() };
            let mut node = Node::new(name);
            node.transform.apply_local_matrix(Affine3A::from_mat4(ext.transform));

            let handle = match parent {
                Some(p) => self.scene.add_to_parent(node, p),
                None => self.scene.add_node(node),
            };
            self.session.nodes.insert(index, handle);
            root.get_or_insert(handle);

            if let Some(&mesh_index) = ext.meshes.first() {
                self.import_mesh(source, mesh_index, handle)?;
            }

            // Reverse so children are visited in declaration order.
            for &child in ext.children.iter().rev() {
                stack.push((child, Some(handle)));
            }
        }

        root.ok_or_else(|| Error::ImportEmpty {
            name: "scene".to_string(),
        })
    }

    /// Attaches the first mesh of a node, registering its geometry once.
    fn import_mesh(&mut self, source: &ExternalScene, mesh_index: usize, node: NodeHandle) -> Result<()> {
        let Some(ext) = source.meshes.get(mesh_index) else {
            log::warn!("Mesh index {mesh_index} out of range, skipped");
            return Ok(());
        };
        if !ext.is_triangulated() {
            log::warn!("Mesh '{}' has faces with != 3 indices, skipped", ext.name);
            return Ok(());
        }

        let handle = match self.session.meshes.get(&mesh_index) {
            Some(&handle) => handle,
            None => {
                let handle = self.assets.add_mesh(flatten_mesh(ext));
                if let Some(dir) = &self.output_dir {
                    self.assets.save_mesh(handle, dir)?;
                }
                self.session.meshes.insert(mesh_index, handle);
                handle
            }
        };
        let data = self
            .assets
            .mesh(handle)
            .ok_or_else(|| Error::AssetNotFound(format!("mesh {handle:?}")))?;

        self.scene.set_mesh(node, Mesh::new(&ext.name, data).with_handle(handle));

        // The first instance of a mesh owns its bones.
        for (bone_index, bone) in ext.bones.iter().enumerate() {
            self.session
                .bones
                .entry(bone.name.clone())
                .or_insert(BoneSource {
                    mesh_index,
                    bone_index,
                    mesh_node: node,
                });
        }
        Ok(())
    }

    /// Gives every node named after a pipeline bone its [`Bone`] component.
    fn attach_bones(&mut self, source: &ExternalScene) -> Vec<NodeHandle> {
        let mut bone_nodes = Vec::new();

        for (index, ext) in source.nodes.iter().enumerate() {
            let Some(bone_source) = self.session.bones.get(&ext.name) else {
                continue;
            };
            let Some(&node) = self.session.nodes.get(&index) else {
                continue;
            };
            let Some(ext_bone) = source
                .meshes
                .get(bone_source.mesh_index)
                .and_then(|m| m.bones.get(bone_source.bone_index))
            else {
                continue;
            };

            let bone = Bone::new(
                &ext_bone.name,
                Affine3A::from_mat4(ext_bone.offset_matrix),
                ext_bone.weights.clone(),
            )
            .attached_to(bone_source.mesh_node);

            if self.scene.set_bone(node, bone).is_some() && !bone_nodes.contains(&node) {
                bone_nodes.push(node);
            }
        }

        log::debug!("Attached {} bones", bone_nodes.len());
        bone_nodes
    }

    fn import_animations(&mut self, source: &ExternalScene, player: &mut AnimationPlayer, root: NodeHandle) {
        for anim in &source.animations {
            let imported = match &self.output_dir {
                Some(dir) => import_animation(self.assets, anim, &mut self.session, &self.settings, dir),
                None => build_clip(anim, &mut self.session, &self.settings).map(|clip| {
                    let handle = self.assets.add_clip(clip);
                    self.session.clips.push(handle);
                    handle
                }),
            };

            match imported {
                Ok(handle) => {
                    if let Some(clip) = self.assets.clip(handle) {
                        player.add_clip(clip, self.scene, root);
                    }
                }
                Err(e) => log::error!("Skipping animation '{}': {e}", anim.name),
            }
        }
    }
}
