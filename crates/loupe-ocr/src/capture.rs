use std::cell::RefCell;

use image::{DynamicImage, RgbImage, RgbaImage};
use loupe_core::geometry::capture_size;
use loupe_types::Rect;
use xcap::Monitor;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("cannot access the display: {0}")]
    Display(String),

    #[error("no monitor found")]
    NoMonitor,

    #[error("captured image is empty")]
    Empty,
}

/// Pixel source for a screen rectangle
pub trait ScreenGrabber: Send + Sync {
    /// Raw RGB pixels of `rect`, at least 1×1
    fn grab(&self, rect: Rect) -> Result<RgbImage, CaptureError>;
}

thread_local! {
    // The platform capture handles are not shareable between threads, so each
    // worker thread opens its own on first use.
    static MONITORS: RefCell<Option<Vec<Monitor>>> = const { RefCell::new(None) };
}

/// Screen grabber backed by xcap
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapGrabber;

impl ScreenGrabber for XcapGrabber {
    fn grab(&self, rect: Rect) -> Result<RgbImage, CaptureError> {
        MONITORS.with(|cell| {
            let mut slot = cell.borrow_mut();
            let monitors = cached_monitors(&mut *slot, || {
                Monitor::all().map_err(|e| CaptureError::Display(e.to_string()))
            })?;
            grab_from(monitors, rect)
        })
    }
}

/// Load the monitor list into `slot` on first use. Failed or empty lookups
/// are not kept, so a later call on the same thread tries again.
fn cached_monitors<T, F>(slot: &mut Option<Vec<T>>, load: F) -> Result<&[T], CaptureError>
where
    F: FnOnce() -> Result<Vec<T>, CaptureError>,
{
    let monitors = match slot.take() {
        Some(monitors) => monitors,
        None => {
            let monitors = load()?;
            if monitors.is_empty() {
                return Err(CaptureError::NoMonitor);
            }
            tracing::debug!(
                "capture context opened on {:?} ({} monitors)",
                std::thread::current().name(),
                monitors.len()
            );
            monitors
        }
    };
    Ok(slot.insert(monitors).as_slice())
}

fn grab_from(monitors: &[Monitor], rect: Rect) -> Result<RgbImage, CaptureError> {
    let (width, height) = capture_size(&rect);

    let monitor = monitors
        .iter()
        .find(|m| {
            rect.left >= m.x()
                && rect.top >= m.y()
                && rect.left < m.x() + m.width() as i32
                && rect.top < m.y() + m.height() as i32
        })
        .or(monitors.first())
        .ok_or(CaptureError::NoMonitor)?;

    let screen = monitor
        .capture_image()
        .map_err(|e| CaptureError::Display(e.to_string()))?;

    let cropped = xcap::image::imageops::crop_imm(
        &screen,
        (rect.left - monitor.x()).max(0) as u32,
        (rect.top - monitor.y()).max(0) as u32,
        width,
        height,
    )
    .to_image();

    let (width, height) = cropped.dimensions();
    if width == 0 || height == 0 {
        return Err(CaptureError::Empty);
    }

    let rgba = RgbaImage::from_raw(width, height, cropped.into_raw()).ok_or(CaptureError::Empty)?;
    Ok(DynamicImage::ImageRgba8(rgba).into_rgb8())
}

/// Bounds of the primary monitor, falling back to the first one listed
pub fn primary_screen() -> Result<Rect, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::Display(e.to_string()))?;
    let monitor = monitors
        .iter()
        .find(|m| m.is_primary())
        .or(monitors.first())
        .ok_or(CaptureError::NoMonitor)?;

    Ok(Rect {
        left: monitor.x(),
        top: monitor.y(),
        right: monitor.x() + monitor.width() as i32,
        bottom: monitor.y() + monitor.height() as i32,
    })
}
