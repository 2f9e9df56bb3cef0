use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use terrain_core::{TerrainConfig, TerrainMesh, TerrainPreset, generate_terrain_with_stats};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Top-down render of a terrain mesh: biome color times a Lambert term
// from the smoothed vertex normals.
fn render_top_down(mesh: &TerrainMesh, width: u32, height: u32) -> RgbImage {
    let light = [0.5f32, 0.7, 0.5];
    let len = (light[0] * light[0] + light[1] * light[1] + light[2] * light[2]).sqrt();
    let light = [light[0] / len, light[1] / len, light[2] / len];

    let mut img = RgbImage::new(width, height);
    for (i, (color, normal)) in mesh.colors().iter().zip(mesh.normals()).enumerate() {
        let x = i as u32 % width;
        let z = i as u32 / width;
        let lambert = (normal[0] * light[0] + normal[1] * light[1] + normal[2] * light[2]).max(0.0);
        let shade = (0.35 + 0.65 * lambert).clamp(0.0, 1.0);
        let pixel = Rgb([
            (color[0] * shade * 255.0) as u8,
            (color[1] * shade * 255.0) as u8,
            (color[2] * shade * 255.0) as u8,
        ]);
        img.put_pixel(x, z, pixel);
    }
    img
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional arguments: a RON config path, or a preset name
    let arg = std::env::args().nth(1);
    let config = match arg.as_deref() {
        Some(a) if a.ends_with(".ron") => TerrainConfig::load(Path::new(a)).unwrap(),
        Some(a) => TerrainConfig {
            width: 256,
            height: 256,
            ..TerrainConfig::default()
        }
        .with_preset(a.parse::<TerrainPreset>().unwrap()),
        None => TerrainConfig {
            width: 256,
            height: 256,
            ..TerrainConfig::default()
        },
    };

    let (mesh, stats) = generate_terrain_with_stats(&config).unwrap();
    info!(
        "Generated {} vertices, {} triangles in {:.1} ms",
        stats.vertices,
        stats.triangles,
        stats.elapsed.as_secs_f64() * 1000.0
    );

    let img = render_top_down(&mesh, config.width, config.height);
    let path = PathBuf::from(format!("terrain_{}.png", config.seed));
    img.save(&path).unwrap();
    info!("Saved terrain preview to {:?}", path);
}
