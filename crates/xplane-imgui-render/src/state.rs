//! Exact capture and restore of the GL state the rasterizer touches.
//!
//! The sim is mid-frame when the overlay draws; anything we change and fail
//! to put back shows up as corrupted scenery. The backup covers precisely
//! the state [`GlowRenderer`](crate::GlowRenderer) sets, nothing more.

use std::num::NonZeroU32;

use glow::HasContext;

/// Snapshot of the GL state mutated while rendering ImGui draw data.
#[derive(Debug, Clone)]
pub struct GlStateBackup {
    active_texture: i32,
    program: i32,
    texture_2d: i32,
    array_buffer: i32,
    vertex_array: i32,
    viewport: [i32; 4],
    scissor_box: [i32; 4],
    blend_src_rgb: i32,
    blend_dst_rgb: i32,
    blend_src_alpha: i32,
    blend_dst_alpha: i32,
    blend_eq_rgb: i32,
    blend_eq_alpha: i32,
    blend: bool,
    cull_face: bool,
    depth_test: bool,
    stencil_test: bool,
    scissor_test: bool,
}

impl GlStateBackup {
    /// Captures the current state.
    #[must_use]
    pub fn capture(gl: &glow::Context) -> Self {
        unsafe {
            let mut viewport = [0i32; 4];
            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
            let mut scissor_box = [0i32; 4];
            gl.get_parameter_i32_slice(glow::SCISSOR_BOX, &mut scissor_box);

            Self {
                active_texture: gl.get_parameter_i32(glow::ACTIVE_TEXTURE),
                program: gl.get_parameter_i32(glow::CURRENT_PROGRAM),
                texture_2d: gl.get_parameter_i32(glow::TEXTURE_BINDING_2D),
                array_buffer: gl.get_parameter_i32(glow::ARRAY_BUFFER_BINDING),
                vertex_array: gl.get_parameter_i32(glow::VERTEX_ARRAY_BINDING),
                viewport,
                scissor_box,
                blend_src_rgb: gl.get_parameter_i32(glow::BLEND_SRC_RGB),
                blend_dst_rgb: gl.get_parameter_i32(glow::BLEND_DST_RGB),
                blend_src_alpha: gl.get_parameter_i32(glow::BLEND_SRC_ALPHA),
                blend_dst_alpha: gl.get_parameter_i32(glow::BLEND_DST_ALPHA),
                blend_eq_rgb: gl.get_parameter_i32(glow::BLEND_EQUATION_RGB),
                blend_eq_alpha: gl.get_parameter_i32(glow::BLEND_EQUATION_ALPHA),
                blend: gl.is_enabled(glow::BLEND),
                cull_face: gl.is_enabled(glow::CULL_FACE),
                depth_test: gl.is_enabled(glow::DEPTH_TEST),
                stencil_test: gl.is_enabled(glow::STENCIL_TEST),
                scissor_test: gl.is_enabled(glow::SCISSOR_TEST),
            }
        }
    }

    /// Restores the captured state.
    pub fn restore(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(NonZeroU32::new(self.program as u32).map(glow::NativeProgram));
            gl.bind_texture(
                glow::TEXTURE_2D,
                NonZeroU32::new(self.texture_2d as u32).map(glow::NativeTexture),
            );
            gl.active_texture(self.active_texture as u32);
            gl.bind_buffer(
                glow::ARRAY_BUFFER,
                NonZeroU32::new(self.array_buffer as u32).map(glow::NativeBuffer),
            );
            gl.bind_vertex_array(
                NonZeroU32::new(self.vertex_array as u32).map(glow::NativeVertexArray),
            );

            gl.blend_equation_separate(self.blend_eq_rgb as u32, self.blend_eq_alpha as u32);
            gl.blend_func_separate(
                self.blend_src_rgb as u32,
                self.blend_dst_rgb as u32,
                self.blend_src_alpha as u32,
                self.blend_dst_alpha as u32,
            );

            set_enabled(gl, glow::BLEND, self.blend);
            set_enabled(gl, glow::CULL_FACE, self.cull_face);
            set_enabled(gl, glow::DEPTH_TEST, self.depth_test);
            set_enabled(gl, glow::STENCIL_TEST, self.stencil_test);
            set_enabled(gl, glow::SCISSOR_TEST, self.scissor_test);

            gl.viewport(
                self.viewport[0],
                self.viewport[1],
                self.viewport[2],
                self.viewport[3],
            );
            gl.scissor(
                self.scissor_box[0],
                self.scissor_box[1],
                self.scissor_box[2],
                self.scissor_box[3],
            );
        }
    }
}

fn set_enabled(gl: &glow::Context, cap: u32, enabled: bool) {
    unsafe {
        if enabled {
            gl.enable(cap);
        } else {
            gl.disable(cap);
        }
    }
}
