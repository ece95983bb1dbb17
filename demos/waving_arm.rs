use glam::{Mat4, Quat, Vec2, Vec3};

use tabula::assets::loaders::{
    ExternalAnimation, ExternalBone, ExternalChannel, ExternalMesh, ExternalNode, ExternalScene,
    QuatKey, VectorKey,
};
use tabula::resources::bone::VertexWeight;
use tabula::{AnimationPlayer, AnimationSettings, AnimationSystem, AssetServer, Scene, SceneImporter};

/// A quad skinned to a single "Arm" bone, with a wave and a lift take.
fn character() -> ExternalScene {
    let mut root = ExternalNode::new("Root");
    root.children = vec![1, 2];
    let mut body = ExternalNode::new("Body");
    body.meshes = vec![0];
    let arm = ExternalNode::new("Arm");

    let quad = ExternalMesh {
        name: "Quad".to_string(),
        vertices: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        normals: vec![Vec3::Z; 4],
        uvs: vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y],
        faces: vec![vec![0, 1, 2], vec![0, 2, 3]],
        bones: vec![ExternalBone {
            name: "Arm".to_string(),
            offset_matrix: Mat4::IDENTITY,
            weights: (0..4).map(|v| VertexWeight::new(v, 1.0)).collect(),
        }],
    };

    let wave = ExternalAnimation {
        name: "Wave".to_string(),
        duration_ticks: 24.0,
        ticks_per_second: 24.0,
        channels: vec![ExternalChannel {
            node_name: "Arm".to_string(),
            rotation_keys: vec![
                QuatKey::new(0.0, Quat::IDENTITY),
                QuatKey::new(0.5, Quat::from_rotation_z(0.8)),
                QuatKey::new(1.0, Quat::IDENTITY),
            ],
            ..ExternalChannel::default()
        }],
    };
    let lift = ExternalAnimation {
        name: String::new(),
        duration_ticks: 48.0,
        ticks_per_second: 24.0,
        channels: vec![ExternalChannel {
            node_name: "Arm".to_string(),
            position_keys: vec![
                VectorKey::new(0.0, Vec3::ZERO),
                VectorKey::new(2.0, Vec3::new(0.0, 0.5, 0.0)),
            ],
            ..ExternalChannel::default()
        }],
    };

    ExternalScene {
        nodes: vec![root, body, arm],
        meshes: vec![quad],
        animations: vec![wave, lift],
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = AnimationSettings {
        blend_duration: 0.5,
        ..AnimationSettings::default()
    };
    let assets = AssetServer::with_settings(&settings);
    let mut scene = Scene::new();
    let mut player = AnimationPlayer::new(settings);

    let out_dir = std::env::temp_dir().join("tabula-waving-arm");
    let imported = SceneImporter::import(
        &character(),
        &assets,
        &mut scene,
        &mut player,
        None,
        Some(out_dir.as_path()),
    )?;

    println!(
        "Imported {} clips and {} meshes into {}",
        imported.clips.len(),
        imported.meshes.len(),
        out_dir.display()
    );
    for index in 0..player.clip_count() {
        println!("  clip {index}: {}", player.clip_name(index).unwrap_or("?"));
    }

    let body = scene
        .find_node_by_name(imported.root, "Body")
        .ok_or_else(|| anyhow::anyhow!("Body node missing"))?;

    let dt = 1.0 / 30.0;
    for frame in 0..90 {
        if frame == 30 {
            player.switch_clip(1, &mut scene)?;
        }
        AnimationSystem::update(&mut player, &mut scene, dt);

        if frame % 10 == 0
            && let Some(mesh) = scene.mesh_of(body)
        {
            println!(
                "frame {frame:3} {:?} corner {:?}",
                player.state(),
                mesh.skin.vertex(2).unwrap_or_default()
            );
        }
    }

    Ok(())
}
