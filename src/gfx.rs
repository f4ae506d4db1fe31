use std::fs;
use std::mem;

use anyhow::{anyhow, Result};
use glam::Mat4;
use glow::HasContext as _;
use tracing::error;

use crate::camera::CameraState;
use crate::constants::{instance_offset, CLEAR_COLOR, PYRAMID_COUNT};
use crate::vertex::{Vertex, PYRAMID_INDICES, PYRAMID_VERTICES};

/// GPU objects created once at startup and shared by every frame.
pub struct GlState {
    pub program: glow::NativeProgram,
    pub vao: glow::NativeVertexArray,
    pub vbo: glow::NativeBuffer,
    pub ebo: glow::NativeBuffer,
}

/// Read a whole file into a string. A missing or unreadable file is not fatal
/// here: a diagnostic is logged and the empty string flows into shader
/// compilation, which then fails with its own diagnostic.
pub fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            error!("could not read file {path}: {err}");
            String::new()
        }
    }
}

/// Compile one shader stage. Returns `None` on compile failure after logging
/// the driver's info log prefixed with the stage name.
pub unsafe fn compile_shader(
    gl: &glow::Context,
    stage: u32,
    source: &str,
) -> Option<glow::NativeShader> {
    let stage_name = if stage == glow::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };

    let shader = match gl.create_shader(stage) {
        Ok(shader) => shader,
        Err(err) => {
            error!("failed to create {stage_name} shader object: {err}");
            return None;
        }
    };

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        error!("failed to compile {stage_name} shader:\n{log}");
        gl.delete_shader(shader);
        return None;
    }

    Some(shader)
}

/// Compile both stages and link them into one program. Stages that failed to
/// compile are skipped; the link status itself is never checked, so a broken
/// program is returned as-is and every draw through it renders nothing. The
/// shader objects are deleted regardless of the link outcome.
pub unsafe fn create_shader_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::NativeProgram> {
    let program = gl
        .create_program()
        .map_err(|err| anyhow!("failed to create shader program: {err}"))?;

    let vertex_shader = compile_shader(gl, glow::VERTEX_SHADER, vertex_src);
    let fragment_shader = compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src);

    if let Some(shader) = vertex_shader {
        gl.attach_shader(program, shader);
    }
    if let Some(shader) = fragment_shader {
        gl.attach_shader(program, shader);
    }

    gl.link_program(program);
    gl.validate_program(program);

    if let Some(shader) = vertex_shader {
        gl.delete_shader(shader);
    }
    if let Some(shader) = fragment_shader {
        gl.delete_shader(shader);
    }

    Ok(program)
}

/// Upload the pyramid mesh once: one VAO describing the interleaved
/// position/color layout, one vertex buffer, one index buffer.
unsafe fn upload_geometry(
    gl: &glow::Context,
) -> Result<(glow::NativeVertexArray, glow::NativeBuffer, glow::NativeBuffer)> {
    let vao = gl
        .create_vertex_array()
        .map_err(|err| anyhow!("failed to create vertex array: {err}"))?;
    let vbo = gl
        .create_buffer()
        .map_err(|err| anyhow!("failed to create vertex buffer: {err}"))?;
    let ebo = gl
        .create_buffer()
        .map_err(|err| anyhow!("failed to create index buffer: {err}"))?;

    gl.bind_vertex_array(Some(vao));

    gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
    gl.buffer_data_u8_slice(
        glow::ARRAY_BUFFER,
        bytemuck::cast_slice(&PYRAMID_VERTICES),
        glow::STATIC_DRAW,
    );

    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
    gl.buffer_data_u8_slice(
        glow::ELEMENT_ARRAY_BUFFER,
        bytemuck::cast_slice(&PYRAMID_INDICES),
        glow::STATIC_DRAW,
    );

    let stride = mem::size_of::<Vertex>() as i32;
    gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * mem::size_of::<f32>() as i32);
    gl.enable_vertex_attrib_array(1);

    Ok((vao, vbo, ebo))
}

impl GlState {
    pub fn new(gl: &glow::Context, vertex_src: &str, fragment_src: &str) -> Result<GlState> {
        let program = unsafe { create_shader_program(gl, vertex_src, fragment_src)? };
        let (vao, vbo, ebo) = unsafe { upload_geometry(gl)? };

        Ok(GlState {
            program,
            vao,
            vbo,
            ebo,
        })
    }

    /// Render one frame: clear, then draw the shared mesh three times with a
    /// per-instance model matrix. No depth buffer is enabled; triangles land
    /// in submission order.
    pub unsafe fn draw(&self, gl: &glow::Context, camera: &CameraState) {
        let [r, g, b, a] = CLEAR_COLOR;
        gl.clear_color(r, g, b, a);
        gl.clear(glow::COLOR_BUFFER_BIT);

        gl.use_program(Some(self.program));

        let view = camera.view_matrix();
        let view_location = gl.get_uniform_location(self.program, "view");
        gl.uniform_matrix_4_f32_slice(view_location.as_ref(), false, &view.to_cols_array());

        let projection = camera.projection_matrix();
        let projection_location = gl.get_uniform_location(self.program, "projection");
        gl.uniform_matrix_4_f32_slice(
            projection_location.as_ref(),
            false,
            &projection.to_cols_array(),
        );

        for index in 0..PYRAMID_COUNT {
            let model = Mat4::from_translation(instance_offset(index));
            let model_location = gl.get_uniform_location(self.program, "model");
            gl.uniform_matrix_4_f32_slice(model_location.as_ref(), false, &model.to_cols_array());

            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(
                glow::TRIANGLES,
                PYRAMID_INDICES.len() as i32,
                glow::UNSIGNED_INT,
                0,
            );
        }
    }

    /// Release the four GPU handles. Called exactly once, after the event
    /// loop has finished.
    pub unsafe fn cleanup(self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
        gl.delete_program(self.program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_file_returns_empty_string_for_missing_path() {
        let content = read_file("no_such_shader.glsl");
        assert_eq!(content, "");
    }

    #[test]
    fn read_file_returns_exact_contents() {
        let path = std::env::temp_dir().join("gl_pyramid_read_file_test.glsl");
        fs::write(&path, "void main() {}\n").unwrap();
        let content = read_file(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();
        assert_eq!(content, "void main() {}\n");
    }

    #[test]
    fn shipped_shader_sources_declare_the_expected_interface() {
        let vertex_src = include_str!("../vertex_shader.glsl");
        let fragment_src = include_str!("../fragment_shader.glsl");

        for uniform in ["model", "view", "projection"] {
            assert!(
                vertex_src.contains(&format!("uniform mat4 {uniform}")),
                "vertex shader is missing uniform {uniform}"
            );
        }
        assert!(vertex_src.contains("aPos"));
        assert!(vertex_src.contains("aColor"));
        assert!(fragment_src.contains("FragColor"));
    }
}
