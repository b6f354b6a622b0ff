use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};

use crate::config::Settings;
use crate::domain::cart::{AddOutcome, Cart};
use crate::domain::errors::DomainError;
use crate::domain::ports::{Decoder, Frame, FramePoll, FrameSource, InventoryLookup};
use crate::domain::scan::{ScanEvent, ScanGate};
use crate::errors::Notice;

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub frame_interval: Duration,
    pub zoom_factor: f32,
    pub cooldown: Duration,
    pub inflight_expiry: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl CaptureConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            frame_interval: settings.frame_interval(),
            zoom_factor: settings.zoom_factor,
            cooldown: settings.scan_cooldown(),
            inflight_expiry: settings.inflight_expiry(),
        }
    }
}

/// The scan-to-cart pipeline: a single frame-tick task that crops and
/// decodes frames, gates duplicate scans, and spawns one inventory lookup
/// per accepted code. Completions merge into the shared cart; different
/// codes may resolve concurrently and out of order.
///
/// The frame source is owned by the task for its whole lifetime and released
/// on every exit path. Decode failures are silent; lookup failures surface
/// as notices and never stop the loop.
pub struct CapturePipeline {
    running: Arc<RwLock<bool>>,
    paused: Arc<RwLock<bool>>,
    handle: JoinHandle<()>,
}

impl CapturePipeline {
    /// Acquire the source and spawn the capture task.
    ///
    /// Acquisition failure is terminal for the session: a notice is emitted,
    /// no task is spawned, and the caller must retry explicitly.
    pub async fn start<S, D, L>(
        mut source: S,
        decoder: D,
        lookup: Arc<L>,
        cart: Arc<Mutex<Cart>>,
        notices: mpsc::UnboundedSender<Notice>,
        config: CaptureConfig,
    ) -> Result<Self, DomainError>
    where
        S: FrameSource,
        D: Decoder,
        L: InventoryLookup,
    {
        if let Err(e) = source.acquire().await {
            let _ = notices.send(Notice::SourceUnavailable(e.to_string()));
            return Err(e);
        }

        let running = Arc::new(RwLock::new(true));
        let paused = Arc::new(RwLock::new(false));

        let task_running = running.clone();
        let task_paused = paused.clone();
        let handle = tokio::spawn(async move {
            run_loop(
                &mut source,
                &decoder,
                lookup,
                cart,
                notices,
                config,
                task_running,
                task_paused,
            )
            .await;
            source.release();
        });

        Ok(Self {
            running,
            paused,
            handle,
        })
    }

    /// Suspend decoding without releasing the source (fullscreen toggle,
    /// panel hidden behind a dialog).
    pub async fn pause(&self) {
        *self.paused.write().await = true;
    }

    pub async fn resume(&self) {
        *self.paused.write().await = false;
    }

    /// Stop the loop and wait for the source to be released.
    pub async fn stop(self) {
        *self.running.write().await = false;
        let _ = self.handle.await;
    }

    /// Wait for the task to end on its own (source exhaustion).
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_loop<S, D, L>(
    source: &mut S,
    decoder: &D,
    lookup: Arc<L>,
    cart: Arc<Mutex<Cart>>,
    notices: mpsc::UnboundedSender<Notice>,
    config: CaptureConfig,
    running: Arc<RwLock<bool>>,
    paused: Arc<RwLock<bool>>,
) where
    S: FrameSource,
    D: Decoder,
    L: InventoryLookup,
{
    let mut gate = ScanGate::new(config.cooldown, config.inflight_expiry);
    let (settle_tx, mut settle_rx) = mpsc::unbounded_channel::<String>();
    let mut ticker = interval(config.frame_interval);

    loop {
        ticker.tick().await;

        if !*running.read().await {
            break;
        }
        if *paused.read().await {
            continue;
        }

        // Lookup completions reported since the last tick.
        while let Ok(code) = settle_rx.try_recv() {
            gate.settle(&code, Instant::now());
        }

        let frame = match source.next_frame().await {
            Ok(FramePoll::Frame(frame)) => frame,
            Ok(FramePoll::Pending) => continue,
            Ok(FramePoll::Ended) => break,
            Err(e) => {
                let _ = notices.send(Notice::SourceUnavailable(e.to_string()));
                break;
            }
        };

        let cropped = center_crop(&frame, config.zoom_factor);
        let Some(decoded) = decoder.decode(&cropped) else {
            continue;
        };
        let code = decoded.trim();
        if code.is_empty() {
            continue;
        }
        let event = ScanEvent::now(code);
        if !gate.accept(&event) {
            continue;
        }
        log::debug!("accepted scan for code {code}");

        let code = event.code;
        let lookup = lookup.clone();
        let cart = cart.clone();
        let notices = notices.clone();
        let settle = settle_tx.clone();
        tokio::spawn(async move {
            match lookup.find_by_code(&code).await {
                Ok(product) => {
                    let outcome = cart.lock().await.apply(&product);
                    if outcome == AddOutcome::StockExhausted {
                        let _ = notices.send(Notice::StockExhausted {
                            title: product.title.clone(),
                        });
                    }
                }
                Err(e) => {
                    log::warn!("lookup for {code} failed: {e}");
                    let _ = notices.send(Notice::lookup_failed(code.clone(), &e));
                }
            }
            let _ = settle.send(code);
        });
    }
}

/// Center-cropped, fixed-zoom view of a frame. Zoom at or below 1.0 is the
/// identity, as is a frame whose buffer does not match its declared
/// dimensions; the decoder rejects those downstream.
pub fn center_crop(frame: &Frame, zoom: f32) -> Frame {
    if zoom <= 1.0
        || frame.width == 0
        || frame.height == 0
        || frame.luma.len() != (frame.width * frame.height) as usize
    {
        return frame.clone();
    }

    let crop_w = ((frame.width as f32 / zoom) as u32).max(1);
    let crop_h = ((frame.height as f32 / zoom) as u32).max(1);
    let x0 = (frame.width - crop_w) / 2;
    let y0 = (frame.height - crop_h) / 2;

    let mut luma = Vec::with_capacity((crop_w * crop_h) as usize);
    for y in y0..y0 + crop_h {
        let row = (y * frame.width + x0) as usize;
        luma.extend_from_slice(&frame.luma[row..row + crop_w as usize]);
    }

    Frame {
        width: crop_w,
        height: crop_h,
        luma,
    }
}
