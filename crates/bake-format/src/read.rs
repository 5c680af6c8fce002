//! Container reading.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::warn;

use bake_types::{BakedMaterial, BakedMesh, BakedModel, BakedTexture, Point3, Vector2, Vector3, Vector4};

use crate::error::{FormatError, FormatResult};
use crate::{FILE_MAGIC, FILE_VARIANT, MAX_STRING_LENGTH};

/// Reads a baked model from a byte stream.
///
/// The stream is consumed exactly up to the end of the last mesh; anything
/// after that is left unread. Texture paths come back exactly as stored,
/// without resolving them against any directory.
///
/// # Errors
///
/// Fails on an unknown magic or variant, on strings that are oversized or
/// not UTF-8, and on a stream that ends inside a field. No partial model is
/// ever returned.
pub fn read_baked_model<R: Read>(reader: &mut R) -> FormatResult<BakedModel> {
    let mut magic = [0u8; 16];
    read_exact_field(reader, &mut magic, "file magic")?;
    if magic != FILE_MAGIC {
        return Err(FormatError::BadMagic);
    }

    let mut variant = [0u8; 16];
    read_exact_field(reader, &mut variant, "layout variant")?;
    if variant != FILE_VARIANT {
        return Err(FormatError::BadVariant {
            found: printable(&variant),
            expected: printable(&FILE_VARIANT),
        });
    }

    let texture_count = read_u32(reader, "texture count")?;
    let mut textures = Vec::with_capacity(to_usize(texture_count));
    for _ in 0..texture_count {
        let path = read_string(reader)?;
        let channels = read_u8(reader, "texture channels")?;
        textures.push(BakedTexture { path, channels });
    }

    let material_count = read_u32(reader, "material count")?;
    let mut materials = Vec::with_capacity(to_usize(material_count));
    for _ in 0..material_count {
        materials.push(BakedMaterial {
            base_color_texture: read_u32(reader, "base color texture id")?,
            roughness_texture: read_u32(reader, "roughness texture id")?,
            metalness_texture: read_u32(reader, "metalness texture id")?,
            alpha_mask_texture: read_u32(reader, "alpha mask texture id")?,
            normal_map_texture: read_u32(reader, "normal map texture id")?,
        });
    }

    let mesh_count = read_u32(reader, "mesh count")?;
    let mut meshes = Vec::with_capacity(to_usize(mesh_count));
    for _ in 0..mesh_count {
        let material = read_u32(reader, "mesh material id")?;
        let vertices = to_usize(read_u32(reader, "mesh vertex count")?);
        let indices = to_usize(read_u32(reader, "mesh index count")?);

        meshes.push(BakedMesh {
            material,
            positions: read_point3s(reader, vertices, "vertex positions")?,
            normals: read_vector3s(reader, vertices, "vertex normals")?,
            texcoords: read_vector2s(reader, vertices, "vertex texcoords")?,
            tangents: read_vector4s(reader, vertices, "vertex tangents")?,
            indices: read_indices(reader, indices)?,
        });
    }

    Ok(BakedModel {
        textures,
        materials,
        meshes,
    })
}

/// Loads a baked model from a file.
///
/// Texture paths stored in the container are resolved against the directory
/// the file lives in, so relative paths keep working wherever the model is
/// loaded from. Trailing bytes after the last mesh are tolerated with a
/// warning.
///
/// # Errors
///
/// Fails when the file cannot be opened or its content does not parse; see
/// [`read_baked_model`].
pub fn load_baked_model<P: AsRef<Path>>(path: P) -> FormatResult<BakedModel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => FormatError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => FormatError::Io(source),
    })?;
    let mut reader = BufReader::new(file);
    let mut model = read_baked_model(&mut reader)?;

    let mut probe = [0u8; 1];
    if matches!(reader.read(&mut probe), Ok(n) if n > 0) {
        warn!("'{}' has trailing bytes after the last mesh", path.display());
    }

    // Texture paths are stored relative to the container.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            for texture in &mut model.textures {
                texture.path = parent.join(&texture.path).to_string_lossy().into_owned();
            }
        }
    }

    Ok(model)
}

fn read_exact_field<R: Read>(
    reader: &mut R,
    buffer: &mut [u8],
    what: &'static str,
) -> FormatResult<()> {
    reader.read_exact(buffer).map_err(|source| {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            FormatError::UnexpectedEof { what }
        } else {
            FormatError::Io(source)
        }
    })
}

fn read_u8<R: Read>(reader: &mut R, what: &'static str) -> FormatResult<u8> {
    let mut buffer = [0u8; 1];
    read_exact_field(reader, &mut buffer, what)?;
    Ok(buffer[0])
}

fn read_u32<R: Read>(reader: &mut R, what: &'static str) -> FormatResult<u32> {
    let mut buffer = [0u8; 4];
    read_exact_field(reader, &mut buffer, what)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Reads a length-prefixed NUL-terminated string, stripping the terminator.
fn read_string<R: Read>(reader: &mut R) -> FormatResult<String> {
    let length = read_u32(reader, "string length")?;
    if length >= MAX_STRING_LENGTH {
        return Err(FormatError::StringTooLong {
            length,
            limit: MAX_STRING_LENGTH,
        });
    }

    let mut bytes = vec![0u8; to_usize(length)];
    read_exact_field(reader, &mut bytes, "string bytes")?;
    // The length prefix counts the terminator.
    if bytes.last() == Some(&0) {
        bytes.pop();
    }
    Ok(String::from_utf8(bytes)?)
}

fn read_point3s<R: Read>(
    reader: &mut R,
    count: usize,
    what: &'static str,
) -> FormatResult<Vec<Point3<f32>>> {
    let mut out = Vec::with_capacity(count);
    let mut buffer = [0u8; 12];
    for _ in 0..count {
        read_exact_field(reader, &mut buffer, what)?;
        out.push(Point3::new(
            le_f32(&buffer, 0),
            le_f32(&buffer, 4),
            le_f32(&buffer, 8),
        ));
    }
    Ok(out)
}

fn read_vector3s<R: Read>(
    reader: &mut R,
    count: usize,
    what: &'static str,
) -> FormatResult<Vec<Vector3<f32>>> {
    let mut out = Vec::with_capacity(count);
    let mut buffer = [0u8; 12];
    for _ in 0..count {
        read_exact_field(reader, &mut buffer, what)?;
        out.push(Vector3::new(
            le_f32(&buffer, 0),
            le_f32(&buffer, 4),
            le_f32(&buffer, 8),
        ));
    }
    Ok(out)
}

fn read_vector2s<R: Read>(
    reader: &mut R,
    count: usize,
    what: &'static str,
) -> FormatResult<Vec<Vector2<f32>>> {
    let mut out = Vec::with_capacity(count);
    let mut buffer = [0u8; 8];
    for _ in 0..count {
        read_exact_field(reader, &mut buffer, what)?;
        out.push(Vector2::new(le_f32(&buffer, 0), le_f32(&buffer, 4)));
    }
    Ok(out)
}

fn read_vector4s<R: Read>(
    reader: &mut R,
    count: usize,
    what: &'static str,
) -> FormatResult<Vec<Vector4<f32>>> {
    let mut out = Vec::with_capacity(count);
    let mut buffer = [0u8; 16];
    for _ in 0..count {
        read_exact_field(reader, &mut buffer, what)?;
        out.push(Vector4::new(
            le_f32(&buffer, 0),
            le_f32(&buffer, 4),
            le_f32(&buffer, 8),
            le_f32(&buffer, 12),
        ));
    }
    Ok(out)
}

fn read_indices<R: Read>(reader: &mut R, count: usize) -> FormatResult<Vec<u32>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_u32(reader, "mesh indices")?);
    }
    Ok(out)
}

fn le_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[allow(clippy::cast_possible_truncation)] // u32 always fits usize on supported targets
fn to_usize(value: u32) -> usize {
    value as usize
}

/// Renders header bytes for error messages, dots for anything non-printable.
fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&byte| byte != 0)
        .map(|&byte| {
            if byte.is_ascii_graphic() {
                byte as char
            } else {
                '.'
            }
        })
        .collect()
}
