use crate::error::BackendError;
use crate::glutils::*;
use crate::math::{Color, Mat4x4, Rect};
use crate::shaders::Shaders;
use gl::*;

const QUAD_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 corner;

uniform mat4 projection;
uniform vec4 rect;

out vec2 uv;

void main() {
    uv = corner;
    gl_Position = projection * vec4(rect.xy + corner * rect.zw, 0.0, 1.0);
}
"#;

const QUAD_FRAGMENT_SHADER: &str = r#"#version 330 core
in vec2 uv;
out vec4 frag_color;

uniform sampler2D image;
uniform vec4 tint;
uniform bool textured;

void main() {
    frag_color = textured ? texture(image, uv) * tint : tint;
}
"#;

// unit quad as a triangle strip; corners double as texture coordinates
const UNIT_QUAD: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];

/// Fixed-size 2D display surface backed by the window's default framebuffer.
///
/// Coordinates are window pixels with the origin at the top-left corner.
/// Every primitive is alpha blended over what is already there, so later
/// draws cover earlier ones.
pub struct Surface {
    width: u32,
    height: u32,
    vao: u32,
    vbo: u32,
    program: Shaders,
}

impl Surface {
    /// Needs a current GL context with loaded function pointers.
    pub fn new(width: u32, height: u32) -> Result<Surface, BackendError> {
        let program = Shaders::from_str(QUAD_VERTEX_SHADER, QUAD_FRAGMENT_SHADER)?;

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::BindVertexArray(vao);
            gl::BindBuffer(ARRAY_BUFFER, vbo);
        }
        gl_buffer_data_arr_stat(&UNIT_QUAD[..]);
        gl_vertex_attrib_ptr_enab(0, 2, 2, 0);
        unsafe { gl::BindVertexArray(0) };

        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
            gl::Enable(BLEND);
            gl::BlendFunc(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);
        }

        program.use_program();
        program.set_mat4fv("projection", &Mat4x4::ortho_top_left(width, height));
        program.set_i32("image", 0);
        check_gl_err();

        Ok(Surface {
            width,
            height,
            vao,
            vbo,
            program,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn clear(&mut self, color: Color) {
        let c = color.to_vec4();
        unsafe {
            gl::ClearColor(c.x, c.y, c.z, c.w);
            gl::Clear(COLOR_BUFFER_BIT);
        }
    }

    /// Copy `texture` at its natural size with its top-left corner at (x, y).
    pub fn blit(&mut self, texture: &Texture, x: i32, y: i32) {
        let dest = Rect::new(x, y, texture.width(), texture.height());
        self.blit_scaled(texture, dest);
    }

    pub fn blit_scaled(&mut self, texture: &Texture, dest: Rect) {
        texture.bind(0);
        self.draw_quad(dest, Color::WHITE, true);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_quad(rect, color, false);
    }

    fn draw_quad(&self, rect: Rect, tint: Color, textured: bool) {
        self.program.use_program();
        self.program.set_vec4("rect", rect.to_vec4());
        self.program.set_vec4("tint", tint.to_vec4());
        self.program.set_bool("textured", textured);
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(TRIANGLE_STRIP, 0, 4);
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
        self.program.delete();
    }
}
