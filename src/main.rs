//! Session replay for the annotation editor.
//!
//! Usage: `annotator <image> <session.json> [out-dir]`
//!
//! Loads an image, replays a JSON array of editor messages against it, settles
//! pending renames and writes `<base>-annotations.json` and
//! `<base>-with-annotations.png` into `out-dir` (default: current directory).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

// Replay needs a filesystem; there is nothing to run on WASM
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use annotator::rename::SimulatedPersistence;
    use annotator::{Editor, EditorConfig, ExportError, Message, RenameOutcome};
    use thiserror::Error;
    use web_time::Instant;

    #[derive(Error, Debug)]
    pub enum ReplayError {
        #[error("usage: annotator <image> <session.json> [out-dir]")]
        Usage,

        #[error("Failed to load image {path:?}: {source}")]
        Image {
            path: PathBuf,
            source: image::ImageError,
        },

        #[error("Failed to read session {path:?}: {source}")]
        Io {
            path: PathBuf,
            source: std::io::Error,
        },

        #[error("Invalid session file: {0}")]
        Session(#[from] serde_json::Error),

        #[error("Export failed: {0}")]
        Export(#[from] ExportError),
    }

    pub fn run(args: Vec<String>) -> Result<(), ReplayError> {
        let (image_path, session_path, out_dir) = match args.as_slice() {
            [image, session] => (PathBuf::from(image), PathBuf::from(session), PathBuf::from(".")),
            [image, session, out] => (PathBuf::from(image), PathBuf::from(session), PathBuf::from(out)),
            _ => return Err(ReplayError::Usage),
        };

        let config = EditorConfig::load_from_default_path().unwrap_or_default();
        env_logger::Builder::new()
            .filter_level(config.preferences.log_level.to_level_filter())
            .parse_default_env()
            .init();

        let background = image::open(&image_path)
            .map_err(|source| ReplayError::Image {
                path: image_path.clone(),
                source,
            })?
            .to_rgba8();
        let messages = read_session(&session_path)?;

        let mut editor = Editor::new(&config);
        editor.update(Message::ImageLoaded {
            width: background.width(),
            height: background.height(),
        });
        editor.update(Message::Resized {
            width: f64::from(background.width()),
        });

        log::info!("Replaying {} messages from {:?}", messages.len(), session_path);
        let applied = messages
            .into_iter()
            .filter(|message| {
                let changed = editor.update(message.clone());
                if !changed {
                    log::debug!("No-op: {:?}", message);
                }
                changed
            })
            .count();
        log::info!("{} messages changed editor state", applied);

        settle_renames(&mut editor);

        let image_name = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let paths = editor.write_exports(&background, &image_name, &out_dir)?;
        println!("{}", paths.coordinates.display());
        println!("{}", paths.image.display());
        Ok(())
    }

    fn read_session(path: &Path) -> Result<Vec<Message>, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Complete every in-flight rename as if its delay had elapsed.
    fn settle_renames(editor: &mut Editor) {
        let mut backend = SimulatedPersistence::new();
        let deadline = Instant::now() + editor.preferences().rename_delay();
        for outcome in editor.poll_renames(deadline, &mut backend) {
            match outcome {
                RenameOutcome::Saved { id, name } => log::debug!("Name of {} saved as '{}'", id, name),
                RenameOutcome::Failed { id, restored, error } => {
                    log::warn!("Name of {} restored to '{}': {}", id, restored, error)
                }
                RenameOutcome::Cancelled { id, restored } => {
                    log::debug!("Name of {} restored to '{}'", id, restored)
                }
            }
        }
    }
}
