//! API error type with HTTP status mapping.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use router_core::DepositError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code
	pub error: String,
	/// Human-readable description
	pub message: String,
}

#[derive(Debug, Error)]
pub enum APIError {
	/// Malformed request (400)
	#[error("Bad Request: {message}")]
	BadRequest { error_type: String, message: String },
	/// Resource does not exist (404)
	#[error("Not Found: {message}")]
	NotFound { error_type: String, message: String },
	/// Request conflicts with on-chain state that may still change (409)
	#[error("Conflict: {message}")]
	Conflict { error_type: String, message: String },
	/// Request is well-formed but cannot be served as configured (422)
	#[error("Unprocessable Entity: {message}")]
	UnprocessableEntity { error_type: String, message: String },
	/// An upstream service failed (502)
	#[error("Bad Gateway: {message}")]
	BadGateway { error_type: String, message: String },
}

impl APIError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			APIError::BadRequest { .. } => StatusCode::BAD_REQUEST,
			APIError::NotFound { .. } => StatusCode::NOT_FOUND,
			APIError::Conflict { .. } => StatusCode::CONFLICT,
			APIError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			APIError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
		}
	}

	pub fn to_error_response(&self) -> ErrorResponse {
		let (error_type, message) = match self {
			APIError::BadRequest { error_type, message }
			| APIError::NotFound { error_type, message }
			| APIError::Conflict { error_type, message }
			| APIError::UnprocessableEntity { error_type, message }
			| APIError::BadGateway { error_type, message } => (error_type, message),
		};
		ErrorResponse {
			error: error_type.clone(),
			message: message.clone(),
		}
	}
}

impl From<DepositError> for APIError {
	fn from(err: DepositError) -> Self {
		let message = err.to_string();
		match err {
			DepositError::InvalidArgument(_) => APIError::BadRequest {
				error_type: "INVALID_ARGUMENT".into(),
				message,
			},
			DepositError::NotConfigured(_) => APIError::UnprocessableEntity {
				error_type: "NOT_CONFIGURED".into(),
				message,
			},
			DepositError::AssetMismatch { .. } => APIError::UnprocessableEntity {
				error_type: "ASSET_MISMATCH".into(),
				message,
			},
			DepositError::NotFunded { .. } => APIError::Conflict {
				error_type: "NOT_FUNDED".into(),
				message,
			},
			DepositError::EstimationFailed(_) => APIError::BadGateway {
				error_type: "ESTIMATION_FAILED".into(),
				message,
			},
			DepositError::ProviderError(_) => APIError::BadGateway {
				error_type: "PROVIDER_ERROR".into(),
				message,
			},
		}
	}
}

impl IntoResponse for APIError {
	fn into_response(self) -> Response {
		(self.status_code(), Json(self.to_error_response())).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use router_types::Address;

	#[test]
	fn test_status_mapping() {
		let cases = [
			(DepositError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
			(DepositError::NotConfigured("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
			(
				DepositError::AssetMismatch {
					expected: Address::ZERO,
					actual: Address::repeat_byte(1),
				},
				StatusCode::UNPROCESSABLE_ENTITY,
			),
			(
				DepositError::NotFunded {
					contract: Address::ZERO,
					asset: Address::ZERO,
				},
				StatusCode::CONFLICT,
			),
			(DepositError::EstimationFailed("x".into()), StatusCode::BAD_GATEWAY),
			(DepositError::ProviderError("x".into()), StatusCode::BAD_GATEWAY),
		];
		for (err, status) in cases {
			assert_eq!(APIError::from(err).status_code(), status);
		}
	}

	#[test]
	fn test_error_body() {
		let err = APIError::from(DepositError::EstimationFailed("no toAmount".into()));
		let body = err.to_error_response();
		assert_eq!(body.error, "ESTIMATION_FAILED");
		assert_eq!(body.message, "Estimation failed: no toAmount");
	}
}
