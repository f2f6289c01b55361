// Availability strategy implementations
pub mod controls;
pub mod page_text;
pub mod structured_data;

pub use controls::ControlLabelStrategy;
pub use page_text::PageTextStrategy;
pub use structured_data::StructuredDataStrategy;
