//! Bake orchestration, from loaded scene to container on disk.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use bake_format::save_baked_model;
use bake_tangent::{compute_vertex_normals, generate_tangents};
use bake_types::{
    BakedMaterial, BakedMesh, BakedModel, BakedTexture, IndexedMesh, SourceModel, TriangleSoup,
    Vector2,
};
use bake_weld::{WeldParams, index_soup};

use crate::error::{BakeError, BakeResult};
use crate::report::BakeReport;
use crate::textures::{plan_textures, TextureCopy, TexturePlan};

/// Parameters controlling a bake.
#[derive(Debug, Clone)]
pub struct BakeParams {
    /// Welding parameters applied to every mesh.
    pub weld: WeldParams,
    /// Bake meshes across worker threads.
    pub parallel: bool,
    /// Suffix appended to the output file stem to name the texture
    /// directory.
    pub texture_dir_suffix: String,
}

impl BakeParams {
    /// Creates the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy using the given weld parameters.
    #[must_use]
    pub fn with_weld(mut self, weld: WeldParams) -> Self {
        self.weld = weld;
        self
    }

    /// Returns a copy that bakes meshes one at a time.
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BakeParams {
    fn default() -> Self {
        Self {
            weld: WeldParams::default(),
            parallel: true,
            texture_dir_suffix: "-tex".to_owned(),
        }
    }
}

/// Bakes one triangle soup into fully attributed indexed geometry.
///
/// The corners are welded, smooth normals are reconstructed when the soup
/// carries none, missing texture coordinates are zero-filled, and a tangent
/// basis is generated per vertex. `name` only labels errors and log lines.
///
/// # Errors
///
/// Fails when welding rejects the soup or when attribute generation fails.
pub fn bake_mesh(name: &str, soup: &TriangleSoup, weld: &WeldParams) -> BakeResult<IndexedMesh> {
    let mut mesh = index_soup(soup, weld).map_err(|source| BakeError::Weld {
        name: name.to_owned(),
        source,
    })?;

    if !mesh.has_normals() {
        debug!("mesh '{name}' has no normals, reconstructing from faces");
        mesh.normals = compute_vertex_normals(&mesh.positions, &mesh.indices).map_err(|source| {
            BakeError::Tangent {
                name: name.to_owned(),
                source,
            }
        })?;
    }
    if !mesh.has_texcoords() {
        mesh.texcoords = vec![Vector2::zeros(); mesh.vertex_count()];
    }
    mesh.tangents = generate_tangents(&mesh).map_err(|source| BakeError::Tangent {
        name: name.to_owned(),
        source,
    })?;
    Ok(mesh)
}

/// Bakes every mesh of a source model into an in-memory baked model.
///
/// Meshes bake independently, in parallel when enabled, and land in the
/// output in scene order, so the result does not depend on the thread count.
/// `texture_dir_name` names the directory that texture table paths point
/// into.
///
/// # Errors
///
/// Fails when a mesh references a material outside the scene's table or when
/// baking any mesh fails.
pub fn bake_model(
    source: &SourceModel,
    params: &BakeParams,
    texture_dir_name: &str,
) -> BakeResult<BakedModel> {
    let plan = plan_textures(&source.materials, texture_dir_name);
    assemble_model(source, params, plan.textures, plan.materials)
}

/// Bakes a source model and writes the container plus its textures to disk.
///
/// The container goes to `output`. Referenced textures are copied into a
/// directory next to it, named after the output file stem plus the
/// configured suffix. Texture copy problems are logged and counted but do
/// not fail the bake; the container is complete without them. The returned
/// report has already been logged.
///
/// # Errors
///
/// Fails when the output path has no file stem, when baking fails, or when
/// the container cannot be written.
pub fn bake_to_file(
    source: &SourceModel,
    output: &Path,
    params: &BakeParams,
) -> BakeResult<BakeReport> {
    let texture_dir = texture_directory(output, &params.texture_dir_suffix)?;
    let texture_dir_name = texture_dir.file_name().map_or_else(
        || params.texture_dir_suffix.clone(),
        |name| name.to_string_lossy().into_owned(),
    );

    info!(
        "baking '{}' to '{}'",
        source.source_path.display(),
        output.display()
    );
    let TexturePlan {
        textures,
        materials,
        copies,
    } = plan_textures(&source.materials, &texture_dir_name);
    let model = assemble_model(source, params, textures, materials)?;

    if let Some(parent) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| BakeError::OutputDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    save_baked_model(output, &model)?;
    let (textures_copied, texture_failures) = copy_textures(&copies, &texture_dir);

    let report = BakeReport {
        meshes: model.meshes.len(),
        materials: model.materials.len(),
        textures: model.textures.len(),
        source_corners: source.corner_count(),
        baked_vertices: model.vertex_count(),
        baked_indices: model.index_count(),
        textures_copied,
        texture_failures,
    };
    report.log();
    Ok(report)
}

fn assemble_model(
    source: &SourceModel,
    params: &BakeParams,
    textures: Vec<BakedTexture>,
    materials: Vec<BakedMaterial>,
) -> BakeResult<BakedModel> {
    let material_count = source.materials.len();
    for mesh in &source.meshes {
        if mesh.material >= material_count {
            return Err(BakeError::MaterialOutOfRange {
                name: mesh.name.clone(),
                material: mesh.material,
                material_count,
            });
        }
    }

    let jobs: Vec<(&str, TriangleSoup)> = source
        .meshes
        .iter()
        .map(|mesh| (mesh.name.as_str(), source.soup_for(mesh)))
        .collect();

    let bake_one = |(name, soup): &(&str, TriangleSoup)| bake_mesh(name, soup, &params.weld);
    let baked: BakeResult<Vec<IndexedMesh>> = if params.parallel {
        jobs.par_iter().map(bake_one).collect()
    } else {
        jobs.iter().map(bake_one).collect()
    };
    let baked = baked?;

    let mut model = BakedModel {
        textures,
        materials,
        meshes: Vec::with_capacity(baked.len()),
    };
    for (mesh, indexed) in source.meshes.iter().zip(baked) {
        // In range per the check above.
        #[allow(clippy::cast_possible_truncation)]
        let material = mesh.material as u32;
        model.meshes.push(BakedMesh::from_indexed(material, indexed));
    }
    debug_assert!(model.is_consistent());
    Ok(model)
}

/// Derives the texture directory path for an output container path.
fn texture_directory(output: &Path, suffix: &str) -> BakeResult<PathBuf> {
    let stem = output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| BakeError::OutputPath {
            path: output.to_path_buf(),
        })?;
    Ok(output.with_file_name(format!("{stem}{suffix}")))
}

/// Copies planned texture files into the texture directory.
///
/// Existing destinations are never overwritten. Returns the number of files
/// copied and the number that failed.
fn copy_textures(copies: &[TextureCopy], texture_dir: &Path) -> (usize, usize) {
    if copies.is_empty() {
        return (0, 0);
    }
    if let Err(error) = fs::create_dir_all(texture_dir) {
        warn!(
            "cannot create texture directory '{}': {error}",
            texture_dir.display()
        );
        return (0, copies.len());
    }

    let mut copied = 0;
    let mut failed = 0;
    for copy in copies {
        let destination = texture_dir.join(&copy.file_name);
        if destination.exists() {
            debug!("texture '{}' already present, left alone", copy.file_name);
            continue;
        }
        match fs::copy(&copy.from, &destination) {
            Ok(_) => copied += 1,
            Err(error) => {
                warn!(
                    "cannot copy texture '{}' to '{}': {error}",
                    copy.from.display(),
                    destination.display()
                );
                failed += 1;
            }
        }
    }
    (copied, failed)
}
