//! Texture table planning.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use tracing::warn;

use bake_types::{BakedMaterial, BakedTexture, SourceMaterial, NO_TEXTURE};

/// One file copy needed to materialize the texture table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureCopy {
    /// Path of the source image, as resolved by the scene loader.
    pub from: PathBuf,
    /// File name of the copy inside the texture directory.
    pub file_name: String,
}

/// The deduplicated texture table and the material rows built over it.
#[derive(Debug, Clone, Default)]
pub struct TexturePlan {
    /// Texture table in first-use order, with paths relative to the
    /// container's directory.
    pub textures: Vec<BakedTexture>,
    /// One baked row per source material, slots indexing `textures`.
    pub materials: Vec<BakedMaterial>,
    /// Source files to copy into the texture directory.
    pub copies: Vec<TextureCopy>,
}

/// Builds the texture and material tables for a set of source materials.
///
/// Textures are deduplicated by source path and numbered in first-use order,
/// walking materials front to back and slots in table order within each
/// material. Table paths point into `texture_dir_name` and keep each source
/// file's name. Distinct source files that share a file name collide on one
/// destination; the first keeps its copy and later ones reuse it under a
/// warning.
#[must_use]
pub fn plan_textures(materials: &[SourceMaterial], texture_dir_name: &str) -> TexturePlan {
    let mut plan = TexturePlan::default();
    let mut ids: HashMap<&str, u32> = HashMap::new();

    for material in materials {
        let mut slots = [NO_TEXTURE; 5];
        for (slot, (path, channels)) in material.texture_slots().into_iter().enumerate() {
            let Some(path) = path else { continue };
            slots[slot] = *ids
                .entry(path)
                .or_insert_with(|| intern_texture(&mut plan, path, channels, texture_dir_name));
        }
        plan.materials.push(BakedMaterial {
            base_color_texture: slots[0],
            roughness_texture: slots[1],
            metalness_texture: slots[2],
            alpha_mask_texture: slots[3],
            normal_map_texture: slots[4],
        });
    }
    plan
}

fn intern_texture(
    plan: &mut TexturePlan,
    path: &str,
    channels: u8,
    texture_dir_name: &str,
) -> u32 {
    let file_name = Path::new(path).file_name().map_or_else(
        || path.to_owned(),
        |name| name.to_string_lossy().into_owned(),
    );
    let relative = format!("{texture_dir_name}/{file_name}");

    if plan.textures.iter().any(|texture| texture.path == relative) {
        warn!("texture file name collision on '{file_name}', reusing the first copy");
    } else {
        plan.copies.push(TextureCopy {
            from: PathBuf::from(path),
            file_name,
        });
    }

    // The container writer rejects tables past u32 long before this wraps.
    #[allow(clippy::cast_possible_truncation)]
    let id = plan.textures.len() as u32;
    plan.textures.push(BakedTexture {
        path: relative,
        channels,
    });
    id
}
