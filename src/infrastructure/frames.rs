use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::ports::{Frame, FramePoll, FrameSource};

const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Replays a directory of still images as a frame source, in path order.
/// Stands in for the live camera in the dev binary and in tests; a real
/// deployment plugs a camera-backed `FrameSource` into the same port.
#[derive(Debug)]
pub struct ImageDirSource {
    dir: PathBuf,
    queue: VecDeque<PathBuf>,
    acquired: bool,
}

impl ImageDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            queue: VecDeque::new(),
            acquired: false,
        }
    }
}

#[async_trait]
impl FrameSource for ImageDirSource {
    async fn acquire(&mut self) -> Result<(), DomainError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| DomainError::SourceUnavailable(format!("{}: {e}", self.dir.display())))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::SourceUnavailable(e.to_string()))?
        {
            let path = entry.path();
            let is_frame = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_frame {
                paths.push(path);
            }
        }
        paths.sort();

        self.queue = paths.into();
        self.acquired = true;
        log::info!(
            "frame source acquired: {} frames in {}",
            self.queue.len(),
            self.dir.display()
        );
        Ok(())
    }

    async fn next_frame(&mut self) -> Result<FramePoll, DomainError> {
        if !self.acquired {
            return Err(DomainError::SourceUnavailable(
                "frame source was not acquired".to_string(),
            ));
        }
        let Some(path) = self.queue.pop_front() else {
            return Ok(FramePoll::Ended);
        };

        // An unreadable file is a missed frame, not a session failure.
        match image::open(&path) {
            Ok(img) => {
                let luma = img.to_luma8();
                Ok(FramePoll::Frame(Frame {
                    width: luma.width(),
                    height: luma.height(),
                    luma: luma.into_raw(),
                }))
            }
            Err(e) => {
                log::warn!("skipping unreadable frame {}: {e}", path.display());
                Ok(FramePoll::Pending)
            }
        }
    }

    fn release(&mut self) {
        self.queue.clear();
        self.acquired = false;
    }
}

#[cfg(test)]
mod tests {
    use image::GrayImage;
    use uuid::Uuid;

    use super::*;

    fn temp_frame_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("order-scanner-frames-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[tokio::test]
    async fn replays_frames_then_ends() {
        let dir = temp_frame_dir();
        GrayImage::from_pixel(4, 4, image::Luma([128]))
            .save(dir.join("frame-0.png"))
            .expect("write frame");

        let mut source = ImageDirSource::new(&dir);
        source.acquire().await.expect("directory exists");

        match source.next_frame().await.expect("readable") {
            FramePoll::Frame(frame) => assert_eq!((frame.width, frame.height), (4, 4)),
            other => panic!("expected a frame, got {other:?}"),
        }
        assert!(matches!(
            source.next_frame().await.expect("readable"),
            FramePoll::Ended
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn missing_directory_fails_acquisition() {
        let mut source = ImageDirSource::new("/nonexistent/order-scanner-frames");
        let err = source.acquire().await.expect_err("must fail");
        assert!(matches!(err, DomainError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn polling_before_acquire_is_an_error() {
        let mut source = ImageDirSource::new(std::env::temp_dir());
        assert!(source.next_frame().await.is_err());
    }

    #[tokio::test]
    async fn release_drops_remaining_frames() {
        let dir = temp_frame_dir();
        GrayImage::from_pixel(2, 2, image::Luma([0]))
            .save(dir.join("frame-0.png"))
            .expect("write frame");

        let mut source = ImageDirSource::new(&dir);
        source.acquire().await.expect("directory exists");
        source.release();
        assert!(source.next_frame().await.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
