//! Error codes and the API response envelope
//!
//! Codes are u16 values grouped by range, so clients can branch on the
//! number and show the message:
//!
//! | Range | Category |
//! |-------|----------|
//! | 0xxx  | general |
//! | 1xxx  | auth |
//! | 2xxx  | permission |
//! | 3xxx  | catalog (flavours, toppings, consistencies) |
//! | 4xxx  | orders |
//! | 5xxx  | shop config |
//! | 9xxx  | system |
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::DrinkLimitExceeded, "Maximum 10 drinks allowed per order")
//!     .with_detail("max_drinks", 10);
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(4003));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
