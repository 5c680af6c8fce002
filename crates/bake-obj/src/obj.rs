//! OBJ scene loading.

use std::path::Path;

use tracing::{debug, info};

use bake_types::{Point3, SourceMaterial, SourceMesh, SourceModel, Vector2, Vector3};

use crate::error::{ObjError, ObjResult};

/// Loads an OBJ scene with its MTL materials into a [`SourceModel`].
///
/// Faces are triangulated on load and every corner is unrolled into the
/// model's shared soup, so downstream welding sees plain per-corner data.
/// Texture paths from the MTL are resolved relative to the OBJ file's
/// directory. Objects that bind no material share one synthesized default.
///
/// Normals are kept only when every object carries them; a scene mixing
/// objects with and without normals is treated as having none, and the
/// pipeline reconstructs them later. Missing texture coordinates are filled
/// with zeros per object.
///
/// # Errors
///
/// Fails when the file is missing, when the OBJ or a declared MTL does not
/// parse, or when the scene contains no triangles.
pub fn load_obj<P: AsRef<Path>>(path: P) -> ObjResult<SourceModel> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ObjError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
        ..tobj::LoadOptions::default()
    };
    let (models, materials) = tobj::load_obj(path, &load_options)?;
    let materials = materials?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut source = SourceModel::new(path);
    source.materials = materials
        .iter()
        .map(|material| convert_material(material, base_dir))
        .collect();

    // Normals are all-or-nothing across the scene; a partial set cannot be
    // stored per corner consistently.
    let use_normals = models
        .iter()
        .filter(|model| !model.mesh.indices.is_empty())
        .all(|model| !model.mesh.normals.is_empty());

    let mut default_material: Option<usize> = None;

    for (index, model) in models.iter().enumerate() {
        let mesh = &model.mesh;
        if mesh.indices.is_empty() {
            debug!("skipping object '{}' with no faces", model.name);
            continue;
        }

        let material = match mesh.material_id {
            Some(id) => id,
            None => *default_material.get_or_insert_with(|| {
                source.materials.push(SourceMaterial::untextured("default"));
                source.materials.len() - 1
            }),
        };

        let name = if model.name.is_empty() {
            format!("object{index}")
        } else {
            model.name.clone()
        };

        let first_corner = source.positions.len();
        for &vertex in &mesh.indices {
            let v = vertex as usize;
            source.positions.push(Point3::new(
                mesh.positions[3 * v],
                mesh.positions[3 * v + 1],
                mesh.positions[3 * v + 2],
            ));
            if use_normals {
                source.normals.push(Vector3::new(
                    mesh.normals[3 * v],
                    mesh.normals[3 * v + 1],
                    mesh.normals[3 * v + 2],
                ));
            }
            source.texcoords.push(if mesh.texcoords.is_empty() {
                Vector2::zeros()
            } else {
                Vector2::new(mesh.texcoords[2 * v], mesh.texcoords[2 * v + 1])
            });
        }

        let corner_count = source.positions.len() - first_corner;
        if corner_count % 3 != 0 {
            return Err(ObjError::NotTriangulated {
                name,
                count: corner_count,
            });
        }
        source.meshes.push(SourceMesh {
            name,
            material,
            first_corner,
            corner_count,
        });
    }

    if source.positions.is_empty() {
        return Err(ObjError::EmptyModel);
    }

    info!(
        "loaded '{}': {} meshes, {} materials, {} corners{}",
        path.display(),
        source.meshes.len(),
        source.materials.len(),
        source.corner_count(),
        if use_normals { "" } else { ", no normals" }
    );
    Ok(source)
}

/// Converts one MTL material, resolving texture paths against `base_dir`.
///
/// Roughness and metalness come from the PBR extension keywords `Pr`, `Pm`,
/// `map_Pr` and `map_Pm`, which the parser exposes as unknown parameters.
fn convert_material(material: &tobj::Material, base_dir: &Path) -> SourceMaterial {
    SourceMaterial {
        name: material.name.clone(),
        base_color: material
            .diffuse
            .map_or_else(|| Vector3::new(1.0, 1.0, 1.0), Vector3::from),
        roughness: scalar_param(material, "Pr").unwrap_or(1.0),
        metalness: scalar_param(material, "Pm").unwrap_or(0.0),
        base_color_texture: resolve(base_dir, material.diffuse_texture.as_ref()),
        roughness_texture: texture_param(material, "map_Pr", base_dir),
        metalness_texture: texture_param(material, "map_Pm", base_dir),
        alpha_mask_texture: resolve(base_dir, material.dissolve_texture.as_ref()),
        normal_map_texture: resolve(base_dir, material.normal_texture.as_ref())
            .or_else(|| texture_param(material, "norm", base_dir)),
    }
}

fn scalar_param(material: &tobj::Material, key: &str) -> Option<f32> {
    material
        .unknown_param
        .get(key)
        .and_then(|value| value.trim().parse().ok())
}

fn texture_param(material: &tobj::Material, key: &str, base_dir: &Path) -> Option<String> {
    resolve(base_dir, material.unknown_param.get(key))
}

fn resolve(base_dir: &Path, texture: Option<&String>) -> Option<String> {
    texture
        .map(|path| path.trim())
        .filter(|path| !path.is_empty())
        .map(|path| base_dir.join(path).to_string_lossy().into_owned())
}
