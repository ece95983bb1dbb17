pub mod codec;
pub mod io;
pub mod loaders;
pub mod server;
pub mod storage;

// Re-export AssetServer and related types
pub use server::{AssetServer, ClipHandle, MeshDataHandle};
pub use storage::AssetStorage;
pub use loaders::{ImportSession, ImportedScene, SceneImporter};
