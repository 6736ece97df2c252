// src/mapping/color.rs

use crate::error::FiError;
use crate::mapping::assign::Resolution;
use crate::model::{ColorLayer, Rgb, SurfaceMesh};
use nalgebra::Point3;

pub const DEFAULT_LAYER_NAME: &str = "fi_cols";

/// Color for vertices without a value: a neutral blue that no greyscale
/// value can produce.
pub const FALLBACK_COLOR: Rgb = [0.5, 0.5, 1.0];

/// Greyscale intensity for a value, the fallback color otherwise.
pub fn color_for(resolution: Resolution, fallback: Rgb) -> Rgb {
    match resolution {
        Resolution::Value(v) => {
            let c = v.clamp(0.0, 1.0);
            [c, c, c]
        }
        Resolution::Unmatched => fallback,
    }
}

/// Builds one color per polygon corner, in loop order.
///
/// `resolve` is called for every corner with its vertex index and
/// coordinate; callers pass a memoizing resolver so shared vertices are
/// only searched once.
pub fn emit<F>(
    mesh: &SurfaceMesh,
    layer_name: &str,
    fallback: Rgb,
    mut resolve: F,
) -> Result<ColorLayer, FiError>
where
    F: FnMut(usize, &Point3<f64>) -> Result<Resolution, FiError>,
{
    let mut colors = Vec::with_capacity(mesh.loop_count());
    for corner in mesh.corners() {
        let resolution = resolve(corner.vertex_index, corner.coordinate)?;
        colors.push(color_for(resolution, fallback));
    }

    Ok(ColorLayer {
        name: layer_name.to_string(),
        colors,
    })
}
