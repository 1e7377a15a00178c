// SPDX-License-Identifier: MPL-2.0
use iced_notify::app::{self, Flags};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iced_notify=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid --config-dir");
            None
        }),
        max_dialogs: args.opt_value_from_str("--max-dialogs").unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid --max-dialogs");
            None
        }),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unrecognized arguments");
    }

    app::run(flags)
}
