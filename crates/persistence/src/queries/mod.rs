// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, one module per resource.
//!
//! Each module owns the Diesel row structs for its table and converts them
//! into the public types of `data_models`.

pub mod accounts;
pub mod check_ins;
pub mod children;
pub mod gallery;
pub mod member_profiles;
pub mod schedule_events;
pub mod sermons;
pub mod sessions;
pub mod visitor_children;
pub mod visitors;
pub mod volunteers;
