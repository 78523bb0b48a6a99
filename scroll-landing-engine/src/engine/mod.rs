pub mod animation;
pub mod assets;
pub mod core;
pub mod loading;
pub mod mesh;
pub mod navigation;
pub mod particles;
pub mod scene;
pub mod shaders;
pub mod systems;
