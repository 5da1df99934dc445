//! A [`Popup`] that only lays out and logs.
//!
//! Drawing the menu belongs to a renderer outside this crate.  The headless
//! popup stacks one row per item using [`PopupConfig`], remembers where it
//! was shown and logs what a real window would display, which is enough to
//! drive the engine end to end.

use crate::action::MenuItem;
use crate::config::PopupConfig;
use crate::geometry::{Point, Rect, Size};
use crate::traits::Popup;
use log::{debug, info};

/// Largest width or height the popup lays itself out to.  Keeps padded
/// bounds well inside `i32`.
const MAX_EXTENT: i32 = 16_384;

/// Errors from the headless popup.
#[derive(Debug, thiserror::Error)]
pub enum HeadlessPopupError {
    #[error("show called before render")]
    NotRendered,
}

/// In-memory popup window.
#[derive(Debug, Clone)]
pub struct HeadlessPopup {
    config: PopupConfig,
    labels: Vec<String>,
    size: Option<Size>,
    origin: Option<Point>,
    shows: usize,
}

impl HeadlessPopup {
    pub fn new(config: PopupConfig) -> Self {
        Self {
            config,
            labels: Vec::new(),
            size: None,
            origin: None,
            shows: 0,
        }
    }

    /// Labels of the last rendered items.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// How many times the popup has been shown.
    pub fn show_count(&self) -> usize {
        self.shows
    }

    /// Size for `rows` rows; an empty menu still gets one row.  Both sides
    /// are capped at [`MAX_EXTENT`].
    fn layout(&self, rows: usize) -> Size {
        let rows = i32::try_from(rows.max(1)).unwrap_or(i32::MAX);
        let height = rows
            .saturating_mul(self.config.row_height.max(1))
            .saturating_add(self.config.padding.max(0).saturating_mul(2));
        Size::new(
            self.config.width.clamp(1, MAX_EXTENT),
            height.min(MAX_EXTENT),
        )
    }
}

impl Popup for HeadlessPopup {
    type Error = HeadlessPopupError;

    fn render(&mut self, items: &[MenuItem]) -> Result<Size, HeadlessPopupError> {
        self.labels = items.iter().map(|i| i.label.clone()).collect();
        let size = self.layout(items.len());
        debug!("rendered {} item(s) into {}x{}", items.len(), size.width, size.height);
        self.size = Some(size);
        Ok(size)
    }

    fn show(&mut self, at: Point) -> Result<(), HeadlessPopupError> {
        let size = self.size.ok_or(HeadlessPopupError::NotRendered)?;
        self.origin = Some(at);
        self.shows += 1;
        info!(
            "popup shown at {} ({}x{}): {}",
            at,
            size.width,
            size.height,
            self.labels.join(" | ")
        );
        Ok(())
    }

    fn close(&mut self) -> Result<(), HeadlessPopupError> {
        if self.origin.take().is_some() {
            info!("popup closed");
        }
        Ok(())
    }

    fn bounds(&self) -> Option<Rect> {
        Some(Rect::from_origin(self.origin?, self.size?))
    }

    fn is_visible(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    fn items() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Left", Action::SwitchLeft),
            MenuItem::new("Right", Action::SwitchRight),
            MenuItem::new("Quit", Action::Exit),
        ]
    }

    #[test]
    fn render_stacks_rows() {
        let mut p = HeadlessPopup::new(PopupConfig {
            width: 200,
            row_height: 20,
            padding: 5,
        });
        assert_eq!(p.render(&items()).unwrap(), Size::new(200, 70));
        assert_eq!(p.labels(), &["Left", "Right", "Quit"]);
    }

    #[test]
    fn empty_menu_gets_one_row() {
        let mut p = HeadlessPopup::new(PopupConfig::default());
        let size = p.render(&[]).unwrap();
        assert_eq!(size.height, 28 + 12);
    }

    #[test]
    fn huge_config_is_capped() {
        let mut p = HeadlessPopup::new(PopupConfig {
            width: i32::MAX,
            row_height: i32::MAX,
            padding: i32::MAX,
        });
        let size = p.render(&items()).unwrap();
        assert_eq!(size, Size::new(MAX_EXTENT, MAX_EXTENT));
        p.show(Point::new(0, 0)).unwrap();
        let padded = p.bounds().unwrap().inflate(8, 8);
        assert_eq!(padded.right, MAX_EXTENT + 8);
    }

    #[test]
    fn show_before_render_fails() {
        let mut p = HeadlessPopup::new(PopupConfig::default());
        assert!(p.show(Point::new(0, 0)).is_err());
        assert!(!p.is_visible());
    }

    #[test]
    fn show_and_close_track_bounds() {
        let mut p = HeadlessPopup::new(PopupConfig::default());
        let size = p.render(&items()).unwrap();
        p.show(Point::new(390, 0)).unwrap();
        assert!(p.is_visible());
        assert_eq!(p.bounds(), Some(Rect::from_origin(Point::new(390, 0), size)));
        p.close().unwrap();
        assert!(!p.is_visible());
        assert_eq!(p.bounds(), None);
        assert_eq!(p.show_count(), 1);
    }
}
