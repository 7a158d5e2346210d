//! HTTP API CLI command

use std::net::SocketAddr;

use clap::Args;

use crate::api::{self, ApiState, EXPENSES_PATH};
use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::storage::Storage;

/// Arguments for `expenses serve`
#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3030")]
    pub addr: SocketAddr,
}

/// Serve the expense API until interrupted
pub fn handle_serve_command(
    storage: Storage,
    settings: &Settings,
    args: ServeArgs,
) -> ExpenseResult<()> {
    println!(
        "Serving http://{}{} (Ctrl-C to stop)",
        args.addr, EXPENSES_PATH
    );
    api::run(
        args.addr,
        ApiState {
            storage,
            user_id: settings.user_id.clone(),
        },
    )
}
