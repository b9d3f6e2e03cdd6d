mod formats;
mod xlsx;

pub use formats::ViewFormats;
pub use xlsx::{views_to_buffer, write_views, IDENTIFIER_HEADER};
