use crate::error::BackendError;
use gl::{types::*, *};
use log::debug;
use std::path::Path;

pub fn check_gl_err() {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return;
    }
    panic!("error: {:?}", err);
}

pub fn log_opengl_info() {
    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_IMAGE_UNITS, &mut mtu) };
    debug!("MAX_TEXTURE_IMAGE_UNITS = {}", mtu);

    let mut size: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_SIZE, &mut size) };
    debug!("MAX_TEXTURE_SIZE = {}", size);
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}

/// GL pixel format for an 8-bit image with `depth` channels.
pub fn pixel_format(depth: usize) -> Option<GLenum> {
    match depth {
        1 => Some(RED),
        3 => Some(RGB),
        4 => Some(RGBA),
        _ => None,
    }
}

pub fn max_texture_size() -> u32 {
    let mut size: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_SIZE, &mut size) };
    size.max(0) as u32
}

/// Reject images the driver cannot hold as a single texture.
pub fn check_texture_size(width: usize, height: usize, max: u32) -> Result<(), String> {
    let max = max as usize;
    if width == 0 || height == 0 {
        return Err(format!("empty image {}x{}", width, height));
    }
    if width > max || height > max {
        return Err(format!(
            "image {}x{} exceeds MAX_TEXTURE_SIZE {}",
            width, height, max
        ));
    }
    Ok(())
}

/// 2D texture uploaded to the current GL context. Deleted on drop.
#[derive(Debug)]
pub struct Texture {
    id: u32,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bind(&self, unit: u32) {
        unsafe { gl::ActiveTexture(TEXTURE0 + unit) };
        unsafe { gl::BindTexture(TEXTURE_2D, self.id) };
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

/// Load an image file into a 2D texture, first row at the top, clamped and
/// linearly filtered for 2D blitting.
pub fn load_texture(path: &Path) -> Result<Texture, BackendError> {
    let params = [
        (TEXTURE_2D, TEXTURE_WRAP_S, CLAMP_TO_EDGE),
        (TEXTURE_2D, TEXTURE_WRAP_T, CLAMP_TO_EDGE),
        (TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR),
        (TEXTURE_2D, TEXTURE_MAG_FILTER, LINEAR),
    ];
    load_texture_params(path, &params)
}

pub fn load_texture_params(
    path: &Path,
    params: &[(GLenum, GLenum, GLenum)],
) -> Result<Texture, BackendError> {
    let image_error = |reason: String| BackendError::Image {
        path: path.to_path_buf(),
        reason,
    };

    // decode before touching GL so a bad file leaves no texture behind
    unsafe {
        stb_image::stb_image::stbi_set_flip_vertically_on_load(0);
    }
    let img = match stb_image::image::load(path) {
        stb_image::image::LoadResult::ImageF32(_) => {
            return Err(image_error("32-bit images not supported here".to_string()));
        }
        stb_image::image::LoadResult::ImageU8(img) => img,
        stb_image::image::LoadResult::Error(e) => return Err(image_error(e)),
    };

    let format = pixel_format(img.depth)
        .ok_or_else(|| image_error(format!("unsupported channel count {}", img.depth)))?;
    check_texture_size(img.width, img.height, max_texture_size()).map_err(image_error)?;

    let mut texture = 0;
    unsafe { gl::GenTextures(1, &mut texture) };
    unsafe { gl::BindTexture(TEXTURE_2D, texture) };

    for (t, n, p) in params {
        unsafe { gl::TexParameteri(*t, *n, *p as i32) };
    }
    if format == RED {
        // grayscale: replicate the single channel instead of sampling red
        unsafe { gl::TexParameteri(TEXTURE_2D, TEXTURE_SWIZZLE_G, RED as i32) };
        unsafe { gl::TexParameteri(TEXTURE_2D, TEXTURE_SWIZZLE_B, RED as i32) };
    }

    unsafe {
        // rows of 1- and 3-channel images are not 4-byte aligned
        gl::PixelStorei(UNPACK_ALIGNMENT, 1);
        gl::TexImage2D(
            TEXTURE_2D,
            0,
            RGBA as i32,
            img.width as i32,
            img.height as i32,
            0,
            format,
            UNSIGNED_BYTE,
            img.data.as_ptr().cast(),
        )
    };
    let err = unsafe { gl::GetError() };
    if err != gl::NO_ERROR {
        unsafe { gl::DeleteTextures(1, &texture) };
        return Err(image_error(format!("GL error {err:#x} uploading texture")));
    }

    debug!(
        "loaded {} as texture {} ({}x{}, {} channels)",
        path.display(),
        texture,
        img.width,
        img.height,
        img.depth
    );

    Ok(Texture {
        id: texture,
        width: img.width as u32,
        height: img.height as u32,
    })
}
