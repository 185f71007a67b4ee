// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command line and environment configuration.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use vine_api::AuthenticationService;

/// Vine Server - HTTP API for the Vine church portal
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "VINE_DATABASE_URL")]
    pub database: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "VINE_BIND", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "VINE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Key required in the `apikey` header of public form submissions
    #[arg(long, env = "VINE_ANON_KEY")]
    pub anon_key: Option<String>,

    /// Bearer token that authenticates as the service account
    #[arg(long, env = "VINE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub service_role_key: Option<String>,

    /// Directory uploaded gallery images are written to
    #[arg(long, env = "VINE_UPLOAD_DIR", default_value = "./uploads")]
    pub upload_dir: PathBuf,

    /// URL prefix under which uploaded images are served
    #[arg(long, env = "VINE_PUBLIC_UPLOAD_BASE", default_value = "/uploads")]
    pub public_upload_base: String,

    /// Lifetime of a sign-in session in hours
    #[arg(
        long,
        env = "VINE_SESSION_TTL_HOURS",
        default_value_t = AuthenticationService::DEFAULT_SESSION_TTL_HOURS
    )]
    pub session_ttl_hours: i64,
}

impl Args {
    /// The socket address to listen on.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// The anonymous key, ignoring blank values.
    #[must_use]
    pub fn anon_key(&self) -> Option<String> {
        self.anon_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ToString::to_string)
    }
}
