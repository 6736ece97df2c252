// src/mapping/pipeline.rs

use crate::config::Config;
use crate::error::FiError;
use crate::io::write_json_dump;
use crate::mapping::assign::{Resolution, VertexResolver};
use crate::mapping::color::emit;
use crate::mapping::point_cloud::{build_point_cloud, LabelRange, PointCloud};
use crate::mapping::spatial_index::SpatialIndex;
use crate::model::{AtomRecord, AtomSource, ColorLayer, PropertyTable, RadiusTable};
use crate::model::{SpecificToGenericMap, SurfaceMesh};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Result of a coloring pass.
#[derive(Clone, Debug)]
pub enum ColorOutcome {
    Colored(ColorReport),
    /// No atoms to build a cloud from; nothing was colored
    EmptyCloud,
}

#[derive(Clone, Debug)]
pub struct ColorReport {
    pub layer: ColorLayer,
    pub atoms: usize,
    /// Distinct surface vertices resolved
    pub vertices: usize,
    /// Vertices that got the fallback color
    pub unmatched: usize,
    /// Spatial searches performed
    pub queries: usize,
}

#[derive(Serialize)]
struct CloudDump<'a> {
    ranges: &'a [LabelRange],
    atoms: &'a [AtomRecord],
}

/// Runs cloud build, indexing, vertex resolution and color emission for
/// one surface. The layer is applied to `mesh` and becomes its active one.
pub fn color_surface<A: AtomSource>(
    atoms: &[A],
    properties: &PropertyTable,
    radii: &RadiusTable,
    generic: &SpecificToGenericMap,
    mesh: &mut SurfaceMesh,
    config: &Config,
) -> Result<ColorOutcome, FiError> {
    let cloud = build_point_cloud(atoms, properties, config.normalize)?;
    if cloud.is_empty() {
        log::warn!("No atoms in the point cloud, nothing to color");
        return Ok(ColorOutcome::EmptyCloud);
    }

    let dump_dir = config.dump_dir.as_deref();
    if let Some(dir) = dump_dir {
        dump_inputs(dir, generic, &cloud)?;
    }

    let index = SpatialIndex::build(cloud.coordinates());
    let mut resolver = VertexResolver::new(&cloud, &index, radii, generic, config.assign_options());

    if config.parallel {
        resolver.resolve_all(mesh)?;
    }
    let layer = emit(mesh, &config.layer_name, config.fallback_color, |v, co| {
        resolver.resolve(v, co)
    })?;

    if let Some(dir) = dump_dir {
        let values: BTreeMap<usize, Option<f64>> = resolver
            .cache()
            .iter()
            .map(|(v, r)| match r {
                Resolution::Value(x) => (*v, Some(*x)),
                Resolution::Unmatched => (*v, None),
            })
            .collect();
        write_json_dump(&dir.join("surface_vertex_values.json"), &values)?;
    }

    mesh.apply_color_layer(layer.clone());

    let report = ColorReport {
        atoms: cloud.len(),
        vertices: resolver.cache().len(),
        unmatched: resolver.unmatched_count(),
        queries: resolver.queries(),
        layer,
    };
    log::info!(
        "Colored {} loops from {} vertices ({} without data)",
        report.layer.colors.len(),
        report.vertices,
        report.unmatched
    );
    Ok(ColorOutcome::Colored(report))
}

fn dump_inputs(dir: &Path, generic: &SpecificToGenericMap, cloud: &PointCloud) -> Result<(), FiError> {
    write_json_dump(&dir.join("specific_to_generic.json"), generic)?;
    write_json_dump(
        &dir.join("point_cloud.json"),
        &CloudDump {
            ranges: cloud.ranges(),
            atoms: cloud.records(),
        },
    )
}
