pub mod html;
pub mod xlsx;

pub use html::{html_response, redirect_response};
pub use xlsx::xlsx_response;

use crate::errors::ServerError;
use astra::Response;

pub type ResultResp = Result<Response, ServerError>;
