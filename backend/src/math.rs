use std::mem;
use std::ops::{Index, IndexMut};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 4] {
        let ary: &[f32; 4] = unsafe { mem::transmute(self) };
        ary
    }
    #[inline(always)]
    pub fn as_array_mut(&mut self) -> &mut [f32; 4] {
        let ary: &mut [f32; 4] = unsafe { mem::transmute(self) };
        ary
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    #[inline(always)]
    fn index(&self, i: usize) -> &f32 {
        self.as_array().index(i)
    }
}

impl IndexMut<usize> for Vec4 {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        self.as_array_mut().index_mut(i)
    }
}

/// Column-major 4x4 matrix, laid out the way `glUniformMatrix4fv` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4x4 {
    pub c0: Vec4,
    pub c1: Vec4,
    pub c2: Vec4,
    pub c3: Vec4,
}

impl Mat4x4 {
    /// Orthographic projection from window pixels (origin top-left, y down)
    /// to normalized device coordinates.
    pub fn ortho_top_left(width: u32, height: u32) -> Self {
        let w = width as f32;
        let h = height as f32;
        Self {
            c0: Vec4::new(2.0 / w, 0.0, 0.0, 0.0),
            c1: Vec4::new(0.0, -2.0 / h, 0.0, 0.0),
            c2: Vec4::new(0.0, 0.0, -1.0, 0.0),
            c3: Vec4::new(-1.0, 1.0, 0.0, 1.0),
        }
    }

    pub fn transform(&self, v: Vec4) -> Vec4 {
        let mut out = Vec4::new(0.0, 0.0, 0.0, 0.0);
        for row in 0..4 {
            out[row] = self.c0[row] * v.x
                + self.c1[row] * v.y
                + self.c2[row] * v.z
                + self.c3[row] * v.w;
        }
        out
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut arr = [0.0; 16];
        for (i, col) in [self.c0, self.c1, self.c2, self.c3].iter().enumerate() {
            arr[i * 4..i * 4 + 4].copy_from_slice(col.as_array());
        }
        arr
    }
}

/// RGBA color, 8 bits per channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        )
    }
}

/// Axis-aligned rectangle in window pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// `(x, y, w, h)` as floats, the layout of the quad shader's `rect` uniform.
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}
