//! Reusable Dioxus RSX components for BWR web apps.

mod address_dialog;
mod confirmation_step;
mod details_step;
mod error_display;
mod identity_step;
mod loading_spinner;
mod map_container;
mod mode_menu;
mod option_picker;
mod page_header;
mod reservoir_detail_panel;
mod reservoir_selector;
mod route_info_panel;
mod step_indicator;
mod time_slider;

pub use address_dialog::AddressDialog;
pub use confirmation_step::ConfirmationStep;
pub use details_step::DetailsStep;
pub use error_display::ErrorDisplay;
pub use identity_step::IdentityStep;
pub use loading_spinner::LoadingSpinner;
pub use map_container::MapContainer;
pub use mode_menu::ModeMenu;
pub use option_picker::OptionPicker;
pub use page_header::PageHeader;
pub use reservoir_detail_panel::{ReservoirDetailPanel, COMPLAINT_FORM_URL};
pub use reservoir_selector::ReservoirSelector;
pub use route_info_panel::RouteInfoPanel;
pub use step_indicator::StepIndicator;
pub use time_slider::TimeSlider;
