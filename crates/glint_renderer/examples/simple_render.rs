//! Simple render example.
//!
//! Renders the demo scene twice, flat and lit, and saves both as PNG.

use glint_core::{demo::demo_scene, save_png};
use glint_renderer::{render, RenderConfig, ShadingModel};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let scene = demo_scene();
    println!(
        "Demo scene: {} spheres, {} lights",
        scene.sphere_count(),
        scene.light_count()
    );

    for (shading, filename) in [
        (ShadingModel::Flat, "flat.png"),
        (ShadingModel::Phong, "phong.png"),
    ] {
        let config = RenderConfig::default()
            .with_resolution(1024, 768)
            .with_shading(shading);

        let start = std::time::Instant::now();
        let image = render(&scene, &config).expect("demo scene is valid");
        println!("Rendered {:?} in {:?}", shading, start.elapsed());

        save_png(&image, filename).expect("Failed to save image");
        println!("Saved to {}", filename);
    }
}
