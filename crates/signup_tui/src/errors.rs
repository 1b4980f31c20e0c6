use std::{panic::PanicHookInfo, sync::OnceLock};

use color_eyre::{Result, config::PanicHook};
use tracing::error;

use crate::{config, tui};

static INIT: OnceLock<()> = OnceLock::new();

/// Install the eyre report hook and the panic hook. Safe to call twice.
///
/// A panic can fire while the form owns the terminal (raw mode, alternate
/// screen, bracketed paste), so the hook restores the terminal before
/// printing anything.
pub fn init() -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(format!(
            "The sign-up form crashed. Details are in {}.",
            config::get_data_dir().join(crate::logging::LOG_FILE.as_str()).display()
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |info| on_panic(&panic_hook, info)));

    let _ = INIT.set(());
    Ok(())
}

fn on_panic(panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    if let Err(err) = tui::restore() {
        error!("Unable to restore terminal after panic: {err:?}");
    }

    let report = panic_hook.panic_report(info).to_string();
    error!("panic: {}", strip_ansi_escapes::strip_str(&report));

    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let metadata = metadata!();
        let dump = handle_dump(&metadata, info);
        let _ = print_msg(dump, &metadata);
        eprintln!("{report}");
    }

    #[cfg(debug_assertions)]
    {
        better_panic::Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .create_panic_handler()(info);
    }

    std::process::exit(libc::EXIT_FAILURE);
}
