//! The draw-data rasterizer.
//!
//! A deliberately small GL3 pipeline: one shader program, one vertex array,
//! streamed vertex/index buffers. Draw lists arrive already clipped and
//! sorted by the UI library; this code only has to execute them with the
//! right blend state and scissor rectangles, bracketed by an exact state
//! capture/restore so the sim never notices we were here.

use std::num::NonZeroU32;

use glow::HasContext;
use imgui::internal::RawWrapper;
use imgui::{DrawCmd, DrawData, DrawIdx, DrawVert};
use xplane_imgui_core::{OverlayError, Result};

use crate::fonts::upload_atlas;
use crate::state::GlStateBackup;
use crate::texture::TextureHost;

const VERTEX_SHADER: &str = r"#version 150
uniform mat4 u_proj;
in vec2 a_pos;
in vec2 a_uv;
in vec4 a_color;
out vec2 v_uv;
out vec4 v_color;
void main() {
    v_uv = a_uv;
    v_color = a_color;
    gl_Position = u_proj * vec4(a_pos, 0.0, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"#version 150
uniform sampler2D u_tex;
in vec2 v_uv;
in vec4 v_color;
out vec4 o_color;
void main() {
    o_color = v_color * texture(u_tex, v_uv);
}
";

// DrawVert is #[repr(C)] { pos: [f32; 2], uv: [f32; 2], col: [u8; 4] }.
const VERT_POS_OFFSET: i32 = 0;
const VERT_UV_OFFSET: i32 = 8;
const VERT_COL_OFFSET: i32 = 16;

/// Converts one UI clip rectangle into GL scissor space.
///
/// UI clip rectangles are top-left-origin `[x1, y1, x2, y2]`; GL scissors
/// are bottom-left-origin `[x, y, w, h]`. Rectangles are clamped to the
/// framebuffer; fully clipped or degenerate ones yield `None` and the
/// command is skipped.
#[must_use]
pub fn scissor_rect(
    clip: [f32; 4],
    display_pos: [f32; 2],
    fb_scale: [f32; 2],
    fb_size: [i32; 2],
) -> Option<[i32; 4]> {
    let x0 = ((clip[0] - display_pos[0]) * fb_scale[0]).max(0.0);
    let y0 = ((clip[1] - display_pos[1]) * fb_scale[1]).max(0.0);
    let x1 = ((clip[2] - display_pos[0]) * fb_scale[0]).min(fb_size[0] as f32);
    let y1 = ((clip[3] - display_pos[1]) * fb_scale[1]).min(fb_size[1] as f32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some([
        x0 as i32,
        fb_size[1] - y1 as i32,
        (x1 - x0) as i32,
        (y1 - y0) as i32,
    ])
}

/// GL resources for rendering ImGui draw data inside the host's context.
pub struct GlowRenderer {
    program: glow::NativeProgram,
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    ebo: glow::NativeBuffer,
    loc_proj: glow::UniformLocation,
    loc_tex: glow::UniformLocation,
    attrib_pos: u32,
    attrib_uv: u32,
    attrib_color: u32,
    font_texture: u32,
}

impl GlowRenderer {
    /// Compiles the pipeline and uploads the already-configured font atlas.
    ///
    /// Must run with the host's GL context current. GL state is captured and
    /// restored around the setup, so this is safe to call mid-frame.
    pub fn new(
        gl: &glow::Context,
        ctx: &mut imgui::Context,
        host: &mut dyn TextureHost,
    ) -> Result<Self> {
        let backup = GlStateBackup::capture(gl);
        let result = Self::build(gl, ctx, host);
        backup.restore(gl);
        result
    }

    fn build(
        gl: &glow::Context,
        ctx: &mut imgui::Context,
        host: &mut dyn TextureHost,
    ) -> Result<Self> {
        let vertex = compile_shader(gl, glow::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(gl, glow::FRAGMENT_SHADER, FRAGMENT_SHADER)?;

        let program = unsafe {
            let program = gl
                .create_program()
                .map_err(OverlayError::RenderResource)?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(OverlayError::ProgramLink(log));
            }
            program
        };

        let loc_proj = uniform(gl, program, "u_proj")?;
        let loc_tex = uniform(gl, program, "u_tex")?;
        let attrib_pos = attrib(gl, program, "a_pos")?;
        let attrib_uv = attrib(gl, program, "a_uv")?;
        let attrib_color = attrib(gl, program, "a_color")?;

        let (vao, vbo, ebo) = unsafe {
            (
                gl.create_vertex_array()
                    .map_err(OverlayError::RenderResource)?,
                gl.create_buffer().map_err(OverlayError::RenderResource)?,
                gl.create_buffer().map_err(OverlayError::RenderResource)?,
            )
        };

        let font_texture = upload_atlas(gl, ctx, host)?;
        ctx.set_renderer_name(Some(format!(
            "xplane-imgui-render {}",
            env!("CARGO_PKG_VERSION")
        )));

        Ok(Self {
            program,
            vao,
            vbo,
            ebo,
            loc_proj,
            loc_tex,
            attrib_pos,
            attrib_uv,
            attrib_color,
            font_texture,
        })
    }

    /// Submits one frame of finalized draw data.
    pub fn render(
        &mut self,
        gl: &glow::Context,
        draw_data: &DrawData,
        host: &dyn TextureHost,
    ) -> Result<()> {
        let fb_width = (draw_data.display_size[0] * draw_data.framebuffer_scale[0]) as i32;
        let fb_height = (draw_data.display_size[1] * draw_data.framebuffer_scale[1]) as i32;
        if fb_width <= 0 || fb_height <= 0 {
            return Ok(());
        }

        let backup = GlStateBackup::capture(gl);
        self.setup_render_state(gl, draw_data, fb_width, fb_height);

        for draw_list in draw_data.draw_lists() {
            unsafe {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    vertex_bytes(draw_list.vtx_buffer()),
                    glow::STREAM_DRAW,
                );
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    index_bytes(draw_list.idx_buffer()),
                    glow::STREAM_DRAW,
                );
            }

            for command in draw_list.commands() {
                match command {
                    DrawCmd::Elements { count, cmd_params } => {
                        let Some(scissor) = scissor_rect(
                            cmd_params.clip_rect,
                            draw_data.display_pos,
                            draw_data.framebuffer_scale,
                            [fb_width, fb_height],
                        ) else {
                            continue;
                        };
                        unsafe {
                            gl.scissor(scissor[0], scissor[1], scissor[2], scissor[3]);
                        }
                        host.bind(gl, cmd_params.texture_id.id() as u32);
                        unsafe {
                            // Vertex offsets are never produced: the backend
                            // does not advertise vtx-offset support, so the
                            // UI splits large lists instead.
                            gl.draw_elements(
                                glow::TRIANGLES,
                                count as i32,
                                glow::UNSIGNED_SHORT,
                                (cmd_params.idx_offset * std::mem::size_of::<DrawIdx>()) as i32,
                            );
                        }
                    }
                    DrawCmd::ResetRenderState => {
                        self.setup_render_state(gl, draw_data, fb_width, fb_height);
                    }
                    DrawCmd::RawCallback { callback, raw_cmd } => unsafe {
                        callback(draw_list.raw(), raw_cmd);
                    },
                }
            }
        }

        backup.restore(gl);
        Ok(())
    }

    fn setup_render_state(
        &self,
        gl: &glow::Context,
        draw_data: &DrawData,
        fb_width: i32,
        fb_height: i32,
    ) {
        let [l, t] = draw_data.display_pos;
        let r = l + draw_data.display_size[0];
        let b = t + draw_data.display_size[1];
        #[rustfmt::skip]
        let projection = [
            2.0 / (r - l), 0.0, 0.0, 0.0,
            0.0, 2.0 / (t - b), 0.0, 0.0,
            0.0, 0.0, -1.0, 0.0,
            (r + l) / (l - r), (t + b) / (b - t), 0.0, 1.0,
        ];

        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_equation(glow::FUNC_ADD);
            gl.blend_func_separate(
                glow::SRC_ALPHA,
                glow::ONE_MINUS_SRC_ALPHA,
                glow::ONE,
                glow::ONE_MINUS_SRC_ALPHA,
            );
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::STENCIL_TEST);
            gl.enable(glow::SCISSOR_TEST);

            gl.viewport(0, 0, fb_width, fb_height);
            gl.use_program(Some(self.program));
            gl.uniform_1_i32(Some(&self.loc_tex), 0);
            gl.uniform_matrix_4_f32_slice(Some(&self.loc_proj), false, &projection);
            gl.active_texture(glow::TEXTURE0);

            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
            gl.enable_vertex_attrib_array(self.attrib_pos);
            gl.enable_vertex_attrib_array(self.attrib_uv);
            gl.enable_vertex_attrib_array(self.attrib_color);
            let stride = std::mem::size_of::<DrawVert>() as i32;
            gl.vertex_attrib_pointer_f32(
                self.attrib_pos,
                2,
                glow::FLOAT,
                false,
                stride,
                VERT_POS_OFFSET,
            );
            gl.vertex_attrib_pointer_f32(
                self.attrib_uv,
                2,
                glow::FLOAT,
                false,
                stride,
                VERT_UV_OFFSET,
            );
            gl.vertex_attrib_pointer_f32(
                self.attrib_color,
                4,
                glow::UNSIGNED_BYTE,
                true,
                stride,
                VERT_COL_OFFSET,
            );
        }
    }

    /// The texture name holding the font atlas.
    #[must_use]
    pub fn font_texture(&self) -> u32 {
        self.font_texture
    }

    /// Frees the GL resources. Requires the context to be current; GL has no
    /// way to free them afterwards, so this runs at plugin disable, not Drop.
    pub fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
            if let Some(texture) = NonZeroU32::new(self.font_texture) {
                gl.delete_texture(glow::NativeTexture(texture));
            }
        }
    }
}

fn compile_shader(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::NativeShader> {
    unsafe {
        let shader = gl.create_shader(stage).map_err(OverlayError::RenderResource)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(OverlayError::ShaderCompile(log));
        }
        Ok(shader)
    }
}

fn uniform(
    gl: &glow::Context,
    program: glow::NativeProgram,
    name: &str,
) -> Result<glow::UniformLocation> {
    unsafe { gl.get_uniform_location(program, name) }
        .ok_or_else(|| OverlayError::ProgramLink(format!("missing uniform {name}")))
}

fn attrib(gl: &glow::Context, program: glow::NativeProgram, name: &str) -> Result<u32> {
    unsafe { gl.get_attrib_location(program, name) }
        .ok_or_else(|| OverlayError::ProgramLink(format!("missing attribute {name}")))
}

fn vertex_bytes(vertices: &[DrawVert]) -> &[u8] {
    // DrawVert is plain old data; reinterpreting as bytes is how every GL
    // imgui backend streams it.
    unsafe {
        std::slice::from_raw_parts(vertices.as_ptr().cast(), std::mem::size_of_val(vertices))
    }
}

fn index_bytes(indices: &[DrawIdx]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(indices.as_ptr().cast(), std::mem::size_of_val(indices)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scissor_flips_to_bottom_left_origin() {
        // 100x50 rect at (10, 20) on a 800x600 framebuffer.
        let rect = scissor_rect([10.0, 20.0, 110.0, 70.0], [0.0, 0.0], [1.0, 1.0], [800, 600]);
        assert_eq!(rect, Some([10, 530, 100, 50]));
    }

    #[test]
    fn test_scissor_applies_display_offset_and_scale() {
        let rect = scissor_rect(
            [110.0, 120.0, 210.0, 170.0],
            [100.0, 100.0],
            [2.0, 2.0],
            [1600, 1200],
        );
        assert_eq!(rect, Some([20, 1060, 200, 100]));
    }

    #[test]
    fn test_scissor_clamps_to_framebuffer() {
        let rect = scissor_rect([-50.0, -50.0, 900.0, 700.0], [0.0, 0.0], [1.0, 1.0], [800, 600]);
        assert_eq!(rect, Some([0, 0, 800, 600]));
    }

    #[test]
    fn test_degenerate_and_offscreen_rects_are_skipped() {
        let zero = scissor_rect([10.0, 10.0, 10.0, 40.0], [0.0, 0.0], [1.0, 1.0], [800, 600]);
        assert_eq!(zero, None);

        let inverted = scissor_rect([50.0, 50.0, 20.0, 20.0], [0.0, 0.0], [1.0, 1.0], [800, 600]);
        assert_eq!(inverted, None);

        let offscreen =
            scissor_rect([900.0, 10.0, 950.0, 40.0], [0.0, 0.0], [1.0, 1.0], [800, 600]);
        assert_eq!(offscreen, None);
    }

    #[test]
    fn test_vertex_byte_view_matches_layout() {
        assert_eq!(std::mem::size_of::<DrawVert>(), 20);
        let indices: [DrawIdx; 3] = [0, 1, 2];
        assert_eq!(index_bytes(&indices).len(), 6);
    }
}
