//! Request extractors for authentication and authorization.
//!
//! - [`auth`]: bearer token parsing and the `AuthUser` / `MaybeAuthUser` extractors
//! - [`role`]: role-hierarchy gates and the `Require*` extractors
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::RequireStaff;
//!
//! async fn create_product(
//!     State(state): State<AppState>,
//!     headers: HeaderMap,
//!     RequireStaff(actor): RequireStaff,
//!     ValidatedJson(dto): ValidatedJson<CreateProductDto>,
//! ) -> Result<impl IntoResponse, AppError> {
//!     // Only staff, admin and superadmin reach this point
//! }
//! ```

pub mod auth;
pub mod role;
