//! HTTP status for each error code
//!
//! Most codes take their category's status; the arms below list the
//! exceptions.

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::FlavourNotFound
            | Self::ToppingNotFound
            | Self::ConsistencyNotFound
            | Self::OrderNotFound
            | Self::ConfigNotFound => StatusCode::NOT_FOUND,

            Self::EmailAlreadyRegistered
            | Self::CatalogNameExists
            | Self::CatalogItemInUse
            | Self::OrderAlreadyPaid => StatusCode::CONFLICT,

            Self::PasswordTooShort => StatusCode::BAD_REQUEST,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            _ => match self.category() {
                ErrorCategory::Auth => StatusCode::UNAUTHORIZED,
                ErrorCategory::Permission => StatusCode::FORBIDDEN,
                ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCategory::General
                | ErrorCategory::Catalog
                | ErrorCategory::Order
                | ErrorCategory::Config => StatusCode::BAD_REQUEST,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_rejections_are_client_errors() {
        for code in [
            ErrorCode::OrderEmpty,
            ErrorCode::DrinkLimitExceeded,
            ErrorCode::InvalidDrinkSelection,
            ErrorCode::PickupDetailsRequired,
            ErrorCode::InvalidPickupTime,
        ] {
            assert_eq!(code.http_status(), StatusCode::BAD_REQUEST, "{code}");
        }
    }

    #[test]
    fn test_lookup_misses_are_not_found() {
        assert_eq!(ErrorCode::ToppingNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ConfigNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_auth_category_defaults() {
        assert_eq!(ErrorCode::TokenExpired.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::InvalidCredentials.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::PasswordTooShort.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::EmailAlreadyRegistered.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::ManagerRequired.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_system_codes() {
        assert_eq!(
            ErrorCode::PricingDataUnavailable.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ErrorCode::TooManyRequests.http_status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
