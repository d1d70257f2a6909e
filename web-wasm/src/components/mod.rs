pub mod header;
pub mod error_banner;
pub mod home_view;
pub mod upload_button;
pub mod history_list;
pub mod settings_panel;
pub mod camera_capture;
pub mod processing_view;
pub mod card_editor;
pub mod result_view;
