use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use image::imageops::{self, FilterType};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::frames::Frame;

/// Extension of the text artifact the engine writes next to the image.
const ARTIFACT_EXT: &str = "txt";

/// The external text-recognition engine behind a seam.
///
/// `Ok(None)` means the engine ran but its output artifact could not be
/// read (soft failure, the frame is marked unreadable). `Err` means the
/// engine itself failed, which aborts the whole video.
pub trait Recognizer {
    fn recognize(&self, image: &Path) -> Result<Option<String>>;
}

/// Invokes a recognition engine binary with the image path as its final
/// argument. The engine writes a sibling `.txt` artifact with the same
/// base name, which is read back and trimmed.
pub struct EngineRecognizer {
    program: String,
    args: Vec<String>,
}

impl EngineRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> EngineRecognizer {
        EngineRecognizer {
            program: program.into(),
            args,
        }
    }
}

impl Recognizer for EngineRecognizer {
    fn recognize(&self, image: &Path) -> Result<Option<String>> {
        debug!(program = %self.program, image = ?image, "invoking recognition engine");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| PipelineError::ExternalTool {
                image: image.to_path_buf(),
                detail: format!("failed to run {}: {e}", self.program),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::ExternalTool {
                image: image.to_path_buf(),
                detail: format!("{} exited with {}: {stderr}", self.program, output.status),
            });
        }

        let artifact = image.with_extension(ARTIFACT_EXT);
        match std::fs::read_to_string(&artifact) {
            Ok(text) => Ok(Some(text.trim().to_string())),
            Err(e) => {
                warn!(artifact = ?artifact, %e, "recognition artifact unreadable");
                Ok(None)
            }
        }
    }
}

/// Run recognition over every surviving frame, strictly one at a time.
///
/// The engine is a shared external resource and artifact paths collide
/// under concurrency, so frames are processed in order. Each frame's crop
/// is upsampled with a smooth filter, persisted to the work directory, and
/// handed to the engine; the frame is released afterwards whether or not
/// its caption was readable.
pub fn recognize_survivors(
    frames: &mut [Frame],
    config: &PipelineConfig,
    recognizer: &dyn Recognizer,
) -> Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;

    let mut unreadable = 0usize;
    let mut failure: Option<PipelineError> = None;

    for frame in frames.iter_mut() {
        // An aborted video is retried from scratch; pending survivors
        // behind the failure point still end their lifecycle here.
        if failure.is_some() {
            frame.release();
            continue;
        }

        let result = upsampled_crop_path(frame, config)
            .and_then(|image| recognizer.recognize(&image));
        frame.release();

        match result {
            Ok(Some(text)) => {
                debug!(index = frame.index, chars = text.len(), "caption recognized");
                frame.text = Some(text);
            }
            Ok(None) => {
                warn!(index = frame.index, "caption unreadable, excluded from listing");
                frame.unreadable = true;
                unreadable += 1;
            }
            Err(e) => failure = Some(e),
        }
    }

    if let Some(e) = failure {
        return Err(e);
    }

    info!(
        recognized = frames.len() - unreadable,
        unreadable, "recognition complete"
    );
    Ok(())
}

/// Upsample the frame's text crop and persist it for the engine.
fn upsampled_crop_path(frame: &Frame, config: &PipelineConfig) -> Result<PathBuf> {
    let crop = frame.crop.expect("survivor has no crop rect");
    let cropped = crop.extract(frame.image());

    let scaled = imageops::resize(
        &cropped,
        crop.w * config.upsample_scale,
        crop.h * config.upsample_scale,
        FilterType::CatmullRom,
    );

    let path = config.work_dir.join(format!("{:06}.png", frame.index));
    scaled.save(&path)?;
    debug!(index = frame.index, path = ?path, "upsampled crop written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn missing_artifact_is_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("000001.png");
        std::fs::write(&image, b"stub").unwrap();

        // `true` exits cleanly without writing any artifact.
        let recognizer = EngineRecognizer::new("true", Vec::new());
        let text = recognizer.recognize(&image).unwrap();
        assert!(text.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn abnormal_engine_exit_is_hard_failure() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("000001.png");
        std::fs::write(&image, b"stub").unwrap();

        let recognizer = EngineRecognizer::new("false", Vec::new());
        let err = recognizer.recognize(&image).unwrap_err();
        assert!(matches!(err, PipelineError::ExternalTool { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn artifact_text_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("000001.png");
        std::fs::write(&image, b"stub").unwrap();
        std::fs::write(dir.path().join("000001.txt"), "  hello world \n").unwrap();

        let recognizer = EngineRecognizer::new("true", Vec::new());
        let text = recognizer.recognize(&image).unwrap();
        assert_eq!(text.as_deref(), Some("hello world"));
    }
}
