//! Unified error codes for the milkshake ordering service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Catalog errors
//! - 4xxx: Order errors
//! - 5xxx: Shop configuration errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can
/// localize them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Resource not found
    NotFound = 1,
    /// Required field missing
    RequiredField = 2,
    /// Value could not be parsed (dates, emails)
    InvalidFormat = 3,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Password too short
    PasswordTooShort = 1005,
    /// Email already registered
    EmailAlreadyRegistered = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Manager role required
    ManagerRequired = 2002,

    // ==================== 3xxx: Catalog ====================
    /// Flavour not found
    FlavourNotFound = 3001,
    /// Topping not found
    ToppingNotFound = 3002,
    /// Consistency not found
    ConsistencyNotFound = 3003,
    /// A drink references a flavour/topping/consistency that does not exist
    InvalidDrinkSelection = 3004,
    /// Fee is negative or not a finite number
    InvalidFee = 3005,
    /// Catalog item name already exists
    CatalogNameExists = 3006,
    /// Catalog item is referenced by existing orders
    CatalogItemInUse = 3007,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no drinks
    OrderEmpty = 4002,
    /// Order has more drinks than the shop allows
    DrinkLimitExceeded = 4003,
    /// Pick-up location and time are required
    PickupDetailsRequired = 4004,
    /// Order has already been paid
    OrderAlreadyPaid = 4005,
    /// Pick-up time could not be parsed
    InvalidPickupTime = 4006,

    // ==================== 5xxx: Shop config ====================
    /// Shop configuration row is missing
    ConfigNotFound = 5001,
    /// Shop configuration value rejected
    InvalidConfigValue = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Config or order history could not be loaded for pricing
    PricingDataUnavailable = 9004,
    /// Too many requests from the same client
    TooManyRequests = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Access denied. No token provided",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Invalid or expired token",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::EmailAlreadyRegistered => "User with this email already exists",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ManagerRequired => "Access denied. Manager role required",

            // Catalog
            ErrorCode::FlavourNotFound => "Flavour not found",
            ErrorCode::ToppingNotFound => "Topping not found",
            ErrorCode::ConsistencyNotFound => "Consistency not found",
            ErrorCode::InvalidDrinkSelection => "Invalid flavour, topping, or consistency ID",
            ErrorCode::InvalidFee => "Fee must be a non-negative number",
            ErrorCode::CatalogNameExists => "An item with this name already exists",
            ErrorCode::CatalogItemInUse => "Item is referenced by existing orders",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Drinks array is required",
            ErrorCode::DrinkLimitExceeded => "Too many drinks for one order",
            ErrorCode::PickupDetailsRequired => "Pick up location and time are required",
            ErrorCode::OrderAlreadyPaid => "Order has already been paid",
            ErrorCode::InvalidPickupTime => "Pick up time is not a valid date/time",

            // Shop config
            ErrorCode::ConfigNotFound => "Config not found",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::PricingDataUnavailable => "Pricing data is unavailable",
            ErrorCode::TooManyRequests => "Too many requests, try again later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::NotFound),
            2 => Ok(ErrorCode::RequiredField),
            3 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::PasswordTooShort),
            1006 => Ok(ErrorCode::EmailAlreadyRegistered),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::ManagerRequired),

            // Catalog
            3001 => Ok(ErrorCode::FlavourNotFound),
            3002 => Ok(ErrorCode::ToppingNotFound),
            3003 => Ok(ErrorCode::ConsistencyNotFound),
            3004 => Ok(ErrorCode::InvalidDrinkSelection),
            3005 => Ok(ErrorCode::InvalidFee),
            3006 => Ok(ErrorCode::CatalogNameExists),
            3007 => Ok(ErrorCode::CatalogItemInUse),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::DrinkLimitExceeded),
            4004 => Ok(ErrorCode::PickupDetailsRequired),
            4005 => Ok(ErrorCode::OrderAlreadyPaid),
            4006 => Ok(ErrorCode::InvalidPickupTime),

            // Shop config
            5001 => Ok(ErrorCode::ConfigNotFound),
            5002 => Ok(ErrorCode::InvalidConfigValue),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9004 => Ok(ErrorCode::PricingDataUnavailable),
            9005 => Ok(ErrorCode::TooManyRequests),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
