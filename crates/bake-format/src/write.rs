//! Container writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bake_types::{BakedMesh, BakedModel};

use crate::error::{FormatError, FormatResult};
use crate::{FILE_MAGIC, FILE_VARIANT, MAX_STRING_LENGTH};

/// Writes a baked model to a byte stream.
///
/// The output is the exact layout [`read_baked_model`] consumes; writing and
/// reading back reproduces the model bit for bit.
///
/// # Errors
///
/// Fails when a table or mesh is too large for its 32-bit count field, when
/// a texture path exceeds the string limit, when a mesh's attribute arrays
/// disagree on the vertex count, or on an I/O error. Output written before
/// the failure is left behind.
///
/// [`read_baked_model`]: crate::read_baked_model
pub fn write_baked_model<W: Write>(writer: &mut W, model: &BakedModel) -> FormatResult<()> {
    writer.write_all(&FILE_MAGIC)?;
    writer.write_all(&FILE_VARIANT)?;

    write_u32(writer, table_len(model.textures.len(), "texture")?)?;
    for texture in &model.textures {
        write_string(writer, &texture.path)?;
        writer.write_all(&[texture.channels])?;
    }

    write_u32(writer, table_len(model.materials.len(), "material")?)?;
    for material in &model.materials {
        for id in material.texture_ids() {
            write_u32(writer, id)?;
        }
    }

    write_u32(writer, table_len(model.meshes.len(), "mesh")?)?;
    for (index, mesh) in model.meshes.iter().enumerate() {
        write_mesh(writer, index, mesh)?;
    }

    Ok(())
}

/// Saves a baked model to a file, replacing any existing file.
///
/// # Errors
///
/// Fails when the file cannot be created or on any [`write_baked_model`]
/// error; a partially written file may be left behind.
pub fn save_baked_model<P: AsRef<Path>>(path: P, model: &BakedModel) -> FormatResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_baked_model(&mut writer, model)?;
    writer.flush()?;
    Ok(())
}

fn write_mesh<W: Write>(writer: &mut W, index: usize, mesh: &BakedMesh) -> FormatResult<()> {
    if !mesh.is_consistent() {
        return Err(FormatError::InconsistentMesh { index });
    }

    write_u32(writer, mesh.material)?;
    write_u32(writer, table_len(mesh.positions.len(), "vertex")?)?;
    write_u32(writer, table_len(mesh.indices.len(), "index")?)?;

    for position in &mesh.positions {
        for component in position.iter() {
            writer.write_all(&component.to_le_bytes())?;
        }
    }
    for normal in &mesh.normals {
        for component in normal.iter() {
            writer.write_all(&component.to_le_bytes())?;
        }
    }
    for texcoord in &mesh.texcoords {
        for component in texcoord.iter() {
            writer.write_all(&component.to_le_bytes())?;
        }
    }
    for tangent in &mesh.tangents {
        for component in tangent.iter() {
            writer.write_all(&component.to_le_bytes())?;
        }
    }
    for &index in &mesh.indices {
        write_u32(writer, index)?;
    }
    Ok(())
}

fn write_u32<W: Write>(writer: &mut W, value: u32) -> FormatResult<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Writes a string as a u32 length prefix counting a trailing NUL, the
/// bytes, then the NUL.
fn write_string<W: Write>(writer: &mut W, value: &str) -> FormatResult<()> {
    let length = u32::try_from(value.len() + 1).map_err(|_| FormatError::StringTooLong {
        length: u32::MAX,
        limit: MAX_STRING_LENGTH,
    })?;
    if length >= MAX_STRING_LENGTH {
        return Err(FormatError::StringTooLong {
            length,
            limit: MAX_STRING_LENGTH,
        });
    }

    write_u32(writer, length)?;
    writer.write_all(value.as_bytes())?;
    writer.write_all(&[0])?;
    Ok(())
}

fn table_len(len: usize, what: &'static str) -> FormatResult<u32> {
    u32::try_from(len).map_err(|_| FormatError::TooManyEntries { what, count: len })
}
