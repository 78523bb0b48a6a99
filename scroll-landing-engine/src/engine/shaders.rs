/// Star point material: camera-facing quads with a soft round falloff.
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
};
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};

use crate::constants::render_settings::STAR_SHADER_PATH;

#[derive(Debug, Clone, Copy, ShaderType)]
pub struct StarUniform {
    /// Linear RGB with the layer opacity in alpha.
    pub colour: Vec4,
    /// Quad edge length in world units.
    pub size: f32,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct StarMaterial {
    #[uniform(0)]
    pub star: StarUniform,
}

impl StarMaterial {
    pub fn new(size: f32, opacity: f32) -> Self {
        Self {
            star: StarUniform {
                colour: Vec4::new(1.0, 1.0, 1.0, opacity.clamp(0.0, 1.0)),
                size,
            },
        }
    }
}

impl Material for StarMaterial {
    fn vertex_shader() -> ShaderRef {
        STAR_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        STAR_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Quads face the camera in view space, winding is irrelevant.
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
