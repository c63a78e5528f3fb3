use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facemark_core::annotation::label_font::LabelFont;
use facemark_core::annotation::painter::{draw_all_result, draw_box, draw_marks, WHITE};
use facemark_core::landmarks::domain::landmark_backend::InputNormalization;
use facemark_core::landmarks::infrastructure::mark_detector_factory::{
    create_mark_detector, ModelPaths,
};
use facemark_core::shared::constants::{DEFAULT_DETECTOR_MODEL, DEFAULT_LANDMARK_MODEL};
use facemark_core::shared::image_io::{is_image, read_frame, write_frame};
use facemark_core::shared::model_resolver;

/// Radius of the dots drawn for each landmark.
const MARK_RADIUS: i32 = 1;

/// Face detection and facial landmark annotation for a single image.
#[derive(Parser)]
#[command(name = "facemark")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Annotated output image.
    output: PathBuf,

    /// Face detector weights (ONNX export of the SSD detector).
    #[arg(long, default_value = DEFAULT_DETECTOR_MODEL)]
    detector_model: PathBuf,

    /// Detector architecture descriptor (.prototxt). Checked but not parsed.
    #[arg(long)]
    detector_config: Option<PathBuf>,

    /// Download URL for the detector weights when not found locally.
    #[arg(long)]
    detector_url: Option<String>,

    /// Landmark model, a .pb frozen graph or an .onnx model.
    #[arg(long, default_value = DEFAULT_LANDMARK_MODEL)]
    landmark_model: PathBuf,

    /// Download URL for the landmark model when not found locally.
    #[arg(long)]
    landmark_url: Option<String>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f32,

    /// TTF/OTF font for confidence labels. Labels are drawn without text if omitted.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Multiplier applied to crop pixels before landmark regression.
    #[arg(long, default_value = "1.0")]
    input_scale: f32,

    /// Feed crops to the landmark model in BGR order.
    #[arg(long)]
    swap_rb: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let paths = ModelPaths {
        detector_weights: locate_model(&cli.detector_model, cli.detector_url.as_deref())?,
        detector_descriptor: cli.detector_config.clone(),
        landmark_model: locate_model(&cli.landmark_model, cli.landmark_url.as_deref())?,
    };
    let normalization = InputNormalization {
        scale: cli.input_scale,
        swap_rb: cli.swap_rb,
    };
    let font = cli.font.as_deref().map(LabelFont::load).transpose()?;

    let mut detector = create_mark_detector(&paths, normalization)?.with_confidence(cli.confidence);

    let mut frame = read_frame(&cli.input)?;
    let result = detector.detect(&frame)?;
    log::info!(
        "Detected {} faces, {} with landmarks",
        result.detections.len(),
        result.faces.len()
    );

    draw_all_result(&mut frame, &result.detections, font.as_ref());
    draw_box(&mut frame, result.faces.iter().map(|f| f.facebox), WHITE);
    for face in &result.faces {
        let marks = face.marks.to_image_space(&face.facebox);
        draw_marks(&mut frame, &marks, WHITE, MARK_RADIUS);
    }

    write_frame(&cli.output, &frame)?;
    log::info!("Output written to {}", cli.output.display());
    Ok(())
}

/// Use `path` as given if it exists, otherwise resolve the file name
/// through the model cache, downloading from `url` when provided.
fn locate_model(path: &Path, url: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("Invalid model path: {}", path.display()))?;

    log::info!("Resolving model: {name}");
    let resolved = model_resolver::resolve(
        name,
        url,
        path.parent(),
        Some(Box::new(download_progress)),
    )?;
    if url.is_some() {
        eprintln!();
    }
    Ok(resolved)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!("Input is not a supported image: {}", cli.input.display()).into());
    }
    if !is_image(&cli.output) {
        return Err(format!(
            "Output must have an image extension, got {}",
            cli.output.display()
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if !cli.input_scale.is_finite() || cli.input_scale <= 0.0 {
        return Err(format!("Input scale must be positive, got {}", cli.input_scale).into());
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
