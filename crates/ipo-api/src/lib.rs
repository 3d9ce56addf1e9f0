#[macro_use]
mod logging;

pub mod client;
pub mod error;
pub mod format;
pub mod record;

pub use {
    client::{
        API_URL_ENV, DEFAULT_API_URL, IpoClient, LEGACY_API_URL_ENV, StatusResponse,
        resolve_base_url,
    },
    error::{IpoError, Result},
    format::{
        FieldIcon, StatusCategory, field_icon, field_label, format_number, format_value,
        status_category,
    },
    record::{FieldValue, IpoRecord},
};
