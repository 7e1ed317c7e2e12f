//! Pointer-backed automation driver for desktop hosts.
//!
//! Replays gesture paths with the mouse via `enigo` and captures the primary
//! monitor via `xcap`. Desktop hosts have no global navigation actions and
//! no embedder-provided UI tree, so those commands report unavailability and
//! the bridge degrades the same way it does with no driver at all.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};

use super::driver::{AutomationDriver, GlobalAction};
use super::gesture::GesturePath;
use super::node::NodeGuard;

pub struct DesktopDriver {
    pointer: Arc<Mutex<Enigo>>,
}

impl DesktopDriver {
    pub fn new() -> anyhow::Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow::anyhow!("failed to create input backend: {:?}", e))?;
        Ok(Self {
            pointer: Arc::new(Mutex::new(enigo)),
        })
    }

    fn replay(pointer: &mut Enigo, path: &GesturePath) -> anyhow::Result<()> {
        let start = path.start();
        pointer
            .move_mouse(start.x.round() as i32, start.y.round() as i32, Coordinate::Abs)
            .map_err(|e| anyhow::anyhow!("move failed: {:?}", e))?;

        if path.samples().len() == 1 {
            // Tap: a plain click at the start point
            thread::sleep(Duration::from_millis(path.duration_ms()));
            pointer
                .button(Button::Left, Direction::Click)
                .map_err(|e| anyhow::anyhow!("click failed: {:?}", e))?;
            return Ok(());
        }

        // Stroke: hold the button and walk the samples on their offsets
        pointer
            .button(Button::Left, Direction::Press)
            .map_err(|e| anyhow::anyhow!("press failed: {:?}", e))?;

        let mut elapsed = 0u64;
        let mut result = Ok(());
        for sample in &path.samples()[1..] {
            thread::sleep(Duration::from_millis(sample.offset_ms.saturating_sub(elapsed)));
            elapsed = sample.offset_ms;
            if let Err(e) = pointer.move_mouse(
                sample.x.round() as i32,
                sample.y.round() as i32,
                Coordinate::Abs,
            ) {
                result = Err(anyhow::anyhow!("move failed: {:?}", e));
                break;
            }
        }

        // The button is always released, even when a move failed mid-stroke
        pointer
            .button(Button::Left, Direction::Release)
            .map_err(|e| anyhow::anyhow!("release failed: {:?}", e))?;
        result
    }

    fn capture_primary_png() -> anyhow::Result<Vec<u8>> {
        use image::ImageEncoder;
        use std::io::Cursor;

        let monitors =
            xcap::Monitor::all().map_err(|e| anyhow::anyhow!("failed to get monitors: {}", e))?;
        let primary = monitors
            .into_iter()
            .find(|m| m.is_primary())
            .ok_or_else(|| anyhow::anyhow!("no primary monitor found"))?;
        let image = primary
            .capture_image()
            .map_err(|e| anyhow::anyhow!("failed to capture screen: {}", e))?;

        let mut buffer = Cursor::new(Vec::new());
        image::codecs::png::PngEncoder::new(&mut buffer)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| anyhow::anyhow!("failed to encode PNG: {}", e))?;
        Ok(buffer.into_inner())
    }
}

#[async_trait]
impl AutomationDriver for DesktopDriver {
    async fn dispatch_gesture(&self, path: &GesturePath) -> bool {
        let pointer = Arc::clone(&self.pointer);
        let path = path.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let mut guard = pointer.lock().unwrap_or_else(|e| e.into_inner());
            Self::replay(&mut guard, &path)
        })
        .await;

        match outcome {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!("gesture dispatch failed: {e}");
                false
            }
            Err(e) => {
                tracing::warn!("gesture worker panicked: {e}");
                false
            }
        }
    }

    async fn perform_global_action(&self, action: GlobalAction) -> bool {
        tracing::debug!("global action {:?} unsupported on desktop driver", action);
        false
    }

    async fn input_text(&self, text: &str) -> bool {
        let pointer = Arc::clone(&self.pointer);
        let text = text.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            let mut guard = pointer.lock().unwrap_or_else(|e| e.into_inner());
            guard.text(&text)
        })
        .await;

        match outcome {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!("text input failed: {:?}", e);
                false
            }
            Err(_) => false,
        }
    }

    fn root_node(&self) -> Option<NodeGuard> {
        // No embedder-provided UI tree on desktop hosts
        None
    }

    async fn take_screenshot(&self) -> Option<Vec<u8>> {
        match tokio::task::spawn_blocking(Self::capture_primary_png).await {
            Ok(Ok(bytes)) => Some(bytes),
            Ok(Err(e)) => {
                tracing::warn!("screenshot failed: {e}");
                None
            }
            Err(_) => None,
        }
    }
}
