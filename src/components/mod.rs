pub mod card_grid;
pub mod catalog_display;
pub mod detail_panel;
pub mod notice_modal;
pub mod search_overlay;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_grid::{CardGrid, CardGridProps, CARD_HEIGHT, CARD_WIDTH};
pub use catalog_display::{CatalogDisplay, CatalogDisplayProps};
pub use detail_panel::{DetailPanel, DetailPanelProps, DETAIL_PANEL_WIDTH};
pub use notice_modal::{NoticeModal, NoticeModalProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};

use ratatui::style::Color;

pub(crate) const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
