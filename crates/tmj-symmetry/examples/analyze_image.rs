use tmj_symmetry::detect::{self, PrecomputedDetections};
use tmj_symmetry::render::{self, RenderStyle, DEFAULT_JPEG_QUALITY};
use tmj_symmetry::SymmetryAnalyzer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(image_path), Some(detections_path)) = (args.next(), args.next()) else {
        eprintln!("Usage: analyze_image <image_path> <detections_json>");
        return Ok(());
    };

    let detector = PrecomputedDetections::load_json(&detections_path)?;
    let analyzer = SymmetryAnalyzer::default();
    let (image, result) = detect::analyze_image_path(&detector, &image_path, &analyzer)?;

    match &result.outcome {
        Ok(analysis) => {
            println!("{}", analysis.summary());
            let annotated = render::annotate(&image, &analysis.regions, &RenderStyle::default());
            render::save_jpeg(&annotated, "tmj_result.jpg", DEFAULT_JPEG_QUALITY)?;
            println!("wrote tmj_result.jpg");
        }
        Err(err) => println!("{}", err.status_text()),
    }

    Ok(())
}
