// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Vine church portal.
//!
//! This crate sits between the HTTP server and persistence. It owns
//! authentication, role checks, request validation and the error taxonomy
//! exposed to clients. It knows nothing about HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;
mod static_content;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedActor, AuthenticationService, AuthorizationService, SERVICE_ACCOUNT_ID,
    SignedInSession,
};
pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AccountInfo, BootstrapStatusResponse, CheckOutRequest, ContentList, CreateCheckInRequest,
    DataSource, GalleryImageRequest, ImageUpload, LanguageQuery, ListCheckInsQuery,
    ListChildrenQuery, MemberChildRequest, MemberProfileRequest, MemberProfileResponse,
    PageQuery, ProfileSectionRequest, ScheduleEventRequest, SearchQuery, SermonRequest,
    SessionInfoResponse, SetRoleRequest, SignInRequest, SignInResponse, SignUpRequest,
    SpouseLinkRequest, UploadResponse, VisitorChildRequest, VisitorRequest, VolunteerRequest,
};
pub use static_content::{fallback_schedule_events, fallback_sermons};
